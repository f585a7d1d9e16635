use std::fmt;

use log::{error, info, warn};

use crate::error::{BorderlessError, BorderlessResult};
use crate::models::{StyleMutation, TargetResolution, WindowHandle};
use crate::window_system::{WindowRect, WindowSystem, style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Style(StyleMutation),
    ExStyle(StyleMutation),
    Size {
        expected: (i32, i32),
        actual: (i32, i32),
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Style(m) => write!(
                f,
                "style is {:#010x}, expected {:#010x}",
                m.confirmed, m.intended
            ),
            Mismatch::ExStyle(m) => write!(
                f,
                "extended style is {:#010x}, expected {:#010x}",
                m.confirmed, m.intended
            ),
            Mismatch::Size { expected, actual } => write!(
                f,
                "size is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

#[derive(Debug)]
pub enum ApplyOutcome {
    Applied,
    /// Every step ran but the window does not look the way it was told to.
    Partial(Vec<Mismatch>),
    /// Stopped at the failing step; earlier steps are not rolled back.
    Failed(BorderlessError),
}

/// Horizontal origin that centres `target_width` on a display of
/// `display_width`. Floors, so a target wider than the display starts
/// left of the screen edge.
pub fn centered_offset(display_width: i32, target_width: i32) -> i32 {
    (display_width - target_width).div_euclid(2)
}

/// Strips the title bar, sizing frame and edge decorations from `handle`
/// and pins it to the top centre of the primary display at `target`.
pub fn apply_borderless<W: WindowSystem + ?Sized>(
    system: &W,
    handle: WindowHandle,
    target: TargetResolution,
) -> ApplyOutcome {
    if !handle.is_valid() {
        error!("Refusing to modify window: handle is null");
        return ApplyOutcome::Failed(BorderlessError::InvalidHandle);
    }

    match strip_and_place(system, handle, target) {
        Ok(mismatches) if mismatches.is_empty() => {
            info!("Borderless mode applied to window {} at {}", handle, target);
            ApplyOutcome::Applied
        }
        Ok(mismatches) => {
            for mismatch in &mismatches {
                warn!("Window {} verification mismatch: {}", handle, mismatch);
            }
            ApplyOutcome::Partial(mismatches)
        }
        Err(e) => {
            error!(
                "Borderless mode failed for window {} at {}: {:?}",
                handle, target, e
            );
            ApplyOutcome::Failed(e)
        }
    }
}

fn strip_and_place<W: WindowSystem + ?Sized>(
    system: &W,
    handle: WindowHandle,
    target: TargetResolution,
) -> BorderlessResult<Vec<Mismatch>> {
    let mut mismatches = Vec::new();

    let frame = clear_bits(
        handle,
        style::FRAME_BITS,
        |h| system.style(h),
        |h, v| system.set_style(h, v),
    )?;
    info!(
        "Style {:#010x} -> {:#010x} (confirmed {:#010x})",
        frame.before, frame.intended, frame.confirmed
    );
    if !frame.matches() {
        mismatches.push(Mismatch::Style(frame));
    }

    let edges = clear_bits(
        handle,
        style::EDGE_BITS,
        |h| system.ex_style(h),
        |h, v| system.set_ex_style(h, v),
    )?;
    info!(
        "Extended style {:#010x} -> {:#010x} (confirmed {:#010x})",
        edges.before, edges.intended, edges.confirmed
    );
    if !edges.matches() {
        mismatches.push(Mismatch::ExStyle(edges));
    }

    match system.dpi_awareness() {
        Ok(awareness) => info!("Process DPI awareness: {}", awareness),
        Err(e) => warn!("Could not query DPI awareness: {}", e),
    }

    let width = to_coord(target.width);
    let height = to_coord(target.height);
    let (display_width, display_height) = system.primary_display_size();
    let x = centered_offset(display_width, width);
    info!(
        "Primary display {}x{}, placing window at ({}, 0) size {}x{}",
        display_width, display_height, x, width, height
    );

    system.place_window(handle, WindowRect::from_origin_size(x, 0, width, height))?;

    let actual = system.window_rect(handle)?;
    if actual.width() != width || actual.height() != height {
        mismatches.push(Mismatch::Size {
            expected: (width, height),
            actual: (actual.width(), actual.height()),
        });
    }

    Ok(mismatches)
}

fn clear_bits(
    handle: WindowHandle,
    bits: u32,
    read: impl Fn(WindowHandle) -> BorderlessResult<u32>,
    write: impl Fn(WindowHandle, u32) -> BorderlessResult<()>,
) -> BorderlessResult<StyleMutation> {
    let before = read(handle)?;
    let intended = before & !bits;
    write(handle, intended)?;
    let confirmed = read(handle)?;

    Ok(StyleMutation {
        before,
        intended,
        confirmed,
    })
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
