use log::{error, info, warn};

use crate::borderless::{ApplyOutcome, apply_borderless};
use crate::inventory::{build_index, find_window_by_process};
use crate::models::{ApplicationIndex, ParsedResolution, WindowLookup};
use crate::resolutions::parse_resolution;
use crate::window_system::WindowSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub text: String,
}

impl Status {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Status {
            severity,
            text: text.into(),
        }
    }
}

/// Owns the window system and the application list shown to the user.
///
/// The index is replaced wholesale on every refresh and only consulted
/// to map a selected label back to its process.
pub struct Controller<W: WindowSystem> {
    system: W,
    index: ApplicationIndex,
}

impl<W: WindowSystem> Controller<W> {
    pub fn new(system: W) -> Self {
        Controller {
            system,
            index: ApplicationIndex::default(),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.index.labels().map(str::to_string).collect()
    }

    pub fn refresh(&mut self) -> Status {
        match build_index(&self.system) {
            Ok(index) => {
                self.index = index;
                if self.index.is_empty() {
                    warn!("No visible application windows found");
                    return Status::new(Severity::Warning, "No applications with visible windows found.");
                }
                Status::new(
                    Severity::Info,
                    format!("Application list updated! ({} found)", self.index.len()),
                )
            }
            Err(e) => {
                error!("Window enumeration failed: {:?}", e);
                self.index = ApplicationIndex::default();
                Status::new(Severity::Error, "Could not list running applications.")
            }
        }
    }

    pub fn apply(&self, selection: Option<&str>, resolution_text: &str) -> Status {
        let Some(label) = selection.filter(|s| !s.is_empty()) else {
            info!("Apply requested without a selection");
            return Status::new(Severity::Warning, "No game selected!");
        };

        let target = match parse_resolution(resolution_text) {
            ParsedResolution::Parsed(target) => target,
            ParsedResolution::Invalid(text) => {
                warn!("Rejected resolution {:?}", text);
                return Status::new(
                    Severity::Warning,
                    format!("Invalid resolution {text:?}, expected WIDTHxHEIGHT."),
                );
            }
        };

        let Some(process) = self.index.process_for(label) else {
            warn!("Selection {:?} is not in the application list", label);
            return Status::new(
                Severity::Warning,
                "Selected application is no longer listed, refresh and try again.",
            );
        };

        info!("Applying borderless mode to {} ({}) at {}", label, process, target);

        let handle = match find_window_by_process(&self.system, process) {
            Ok(WindowLookup::Found(handle)) => handle,
            Ok(WindowLookup::NotFound) => {
                warn!("No visible window for process {}", process);
                return Status::new(
                    Severity::Warning,
                    "No valid window found for this application!",
                );
            }
            Err(e) => {
                error!("Window lookup for {} failed: {:?}", process, e);
                return Status::new(Severity::Error, "Could not look up the application window.");
            }
        };

        match apply_borderless(&self.system, handle, target) {
            ApplyOutcome::Applied => Status::new(
                Severity::Success,
                format!("Applied borderless mode to {label} at {target}!"),
            ),
            ApplyOutcome::Partial(mismatches) => {
                let detail: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
                Status::new(
                    Severity::Warning,
                    format!(
                        "Borderless mode partially applied to {label}: {}",
                        detail.join("; ")
                    ),
                )
            }
            ApplyOutcome::Failed(_) => Status::new(
                Severity::Error,
                format!("Failed to apply borderless mode to {label}. See the log for details."),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_system::fake::{FakeWindow, FakeWindowSystem};
    use crate::window_system::style;

    fn controller() -> Controller<FakeWindowSystem> {
        let system = FakeWindowSystem::new(
            vec![
                FakeWindow::new(1, "Elden Ring", 10)
                    .with_style(style::CAPTION | style::THICK_FRAME, style::EX_WINDOW_EDGE),
                FakeWindow::new(2, "Notes", 11),
            ],
            &[(10, "eldenring.exe"), (11, "notepad.exe")],
        );
        let mut controller = Controller::new(system);
        controller.refresh();
        controller
    }

    #[test]
    fn refresh_lists_applications() {
        let mut controller = controller();
        let status = controller.refresh();

        assert_eq!(status.severity, Severity::Info);
        assert_eq!(controller.labels(), vec!["Elden Ring", "Notes"]);
    }

    #[test]
    fn refresh_replaces_stale_entries() {
        let mut controller = controller();
        controller.system.windows.borrow_mut().remove(1);

        controller.refresh();

        assert_eq!(controller.labels(), vec!["Elden Ring"]);
    }

    #[test]
    fn empty_desktop_is_a_warning() {
        let mut controller = Controller::new(FakeWindowSystem::new(Vec::new(), &[]));

        let status = controller.refresh();

        assert_eq!(status.severity, Severity::Warning);
        assert!(controller.labels().is_empty());
    }

    #[test]
    fn missing_selection_is_rejected_before_any_mutation() {
        let controller = controller();

        for selection in [None, Some("")] {
            let status = controller.apply(selection, "2560x1440");
            assert_eq!(status.text, "No game selected!");
        }
        assert_eq!(controller.system.mutation_count(), 0);
    }

    #[test]
    fn malformed_resolution_is_rejected_before_any_mutation() {
        let controller = controller();

        let status = controller.apply(Some("Elden Ring"), "abcx123");

        assert_eq!(status.severity, Severity::Warning);
        assert!(status.text.contains("abcx123"));
        assert_eq!(controller.system.mutation_count(), 0);
    }

    #[test]
    fn closed_window_is_a_lookup_miss() {
        let controller = controller();
        controller.system.windows.borrow_mut().remove(0);

        let status = controller.apply(Some("Elden Ring"), "2560x1440");

        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.text, "No valid window found for this application!");
        assert_eq!(controller.system.mutation_count(), 0);
    }

    #[test]
    fn successful_apply_reports_success() {
        let controller = controller();

        let status = controller.apply(Some("Elden Ring"), "1920x1080");

        assert_eq!(status.severity, Severity::Success);
        assert_eq!(status.text, "Applied borderless mode to Elden Ring at 1920x1080!");
        let window = controller.system.window(crate::models::WindowHandle::from_raw(1)).unwrap();
        assert_eq!(window.style & style::FRAME_BITS, 0);
        assert_eq!(window.ex_style, 0);
    }

    #[test]
    fn partial_apply_is_not_reported_as_success() {
        let mut controller = controller();
        controller.system.size_clamp = Some((1280, 720));

        let status = controller.apply(Some("Elden Ring"), "1920x1080");

        assert_eq!(status.severity, Severity::Warning);
        assert!(status.text.contains("partially"), "{}", status.text);
    }

    #[test]
    fn os_failure_keeps_session_usable() {
        let mut controller = controller();
        controller.system.fail_place = true;

        let failed = controller.apply(Some("Elden Ring"), "1920x1080");
        assert_eq!(failed.severity, Severity::Error);

        controller.system.fail_place = false;
        let retried = controller.apply(Some("Elden Ring"), "1920x1080");
        assert_eq!(retried.severity, Severity::Success);
    }
}
