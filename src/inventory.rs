use std::collections::HashSet;

use log::{debug, info};

use crate::error::BorderlessResult;
use crate::models::{ApplicationIndex, WindowLookup, WindowRecord};
use crate::window_system::WindowSystem;

/// Visible, titled top-level windows, one per owning process.
///
/// The first window seen for a process wins; later windows of the same
/// process are dropped. Windows whose owner cannot be resolved (the
/// process exited mid-scan, or access was denied) are skipped.
pub fn list_running_apps<W: WindowSystem + ?Sized>(
    system: &W,
) -> BorderlessResult<Vec<WindowRecord>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut apps = Vec::new();

    for handle in system.top_level_windows()? {
        if !system.is_visible(handle) {
            continue;
        }

        let title = system.window_title(handle);
        let title = title.trim();
        if title.is_empty() {
            continue;
        }

        let Some(process_name) = system
            .owner_pid(handle)
            .filter(|pid| *pid != 0)
            .and_then(|pid| system.process_name(pid))
        else {
            debug!("Skipping window {} ({:?}): owner not resolvable", handle, title);
            continue;
        };

        if !seen.insert(process_name.clone()) {
            continue;
        }

        apps.push(WindowRecord {
            label: title.to_string(),
            process_name,
            handle,
        });
    }

    info!("Found {} unique applications", apps.len());
    Ok(apps)
}

pub fn build_index<W: WindowSystem + ?Sized>(system: &W) -> BorderlessResult<ApplicationIndex> {
    let apps = list_running_apps(system)?;
    Ok(ApplicationIndex::from_records(&apps))
}

/// First visible window of `process_name` (case-insensitive), from a
/// fresh scan.
pub fn find_window_by_process<W: WindowSystem + ?Sized>(
    system: &W,
    process_name: &str,
) -> BorderlessResult<WindowLookup> {
    let found = list_running_apps(system)?
        .into_iter()
        .find(|app| app.process_name.eq_ignore_ascii_case(process_name))
        .map(|app| app.handle);

    Ok(match found {
        Some(handle) => WindowLookup::Found(handle),
        None => WindowLookup::NotFound,
    })
}
