use std::fmt;

use crate::error::BorderlessResult;
use crate::models::WindowHandle;

/// Win32 style bits touched when stripping a window's decorations.
pub mod style {
    /// `WS_CAPTION`: title bar (includes the thin border).
    pub const CAPTION: u32 = 0x00C0_0000;
    /// `WS_THICKFRAME`: resizable sizing border.
    pub const THICK_FRAME: u32 = 0x0004_0000;

    pub const EX_DLG_MODAL_FRAME: u32 = 0x0000_0001;
    pub const EX_WINDOW_EDGE: u32 = 0x0000_0100;
    pub const EX_CLIENT_EDGE: u32 = 0x0000_0200;
    pub const EX_STATIC_EDGE: u32 = 0x0002_0000;

    pub const FRAME_BITS: u32 = CAPTION | THICK_FRAME;
    pub const EDGE_BITS: u32 =
        EX_DLG_MODAL_FRAME | EX_WINDOW_EDGE | EX_CLIENT_EDGE | EX_STATIC_EDGE;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        WindowRect {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpiAwareness {
    Unaware,
    SystemAware,
    PerMonitorAware,
    Other(u32),
}

impl fmt::Display for DpiAwareness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DpiAwareness::Unaware => write!(f, "unaware"),
            DpiAwareness::SystemAware => write!(f, "system aware"),
            DpiAwareness::PerMonitorAware => write!(f, "per-monitor aware"),
            DpiAwareness::Other(value) => write!(f, "unknown ({value})"),
        }
    }
}

/// The host window manager, as far as this tool needs it.
///
/// Every call is synchronous and expected to return quickly. Queries
/// about a window that vanished mid-scan return empty/`None` rather
/// than an error.
pub trait WindowSystem {
    /// All top-level windows in the OS's enumeration order.
    fn top_level_windows(&self) -> BorderlessResult<Vec<WindowHandle>>;

    fn is_visible(&self, handle: WindowHandle) -> bool;

    fn window_title(&self, handle: WindowHandle) -> String;

    fn owner_pid(&self, handle: WindowHandle) -> Option<u32>;

    /// Executable name of a process, `None` if it exited or access is denied.
    fn process_name(&self, pid: u32) -> Option<String>;

    fn style(&self, handle: WindowHandle) -> BorderlessResult<u32>;

    fn set_style(&self, handle: WindowHandle, style: u32) -> BorderlessResult<()>;

    fn ex_style(&self, handle: WindowHandle) -> BorderlessResult<u32>;

    fn set_ex_style(&self, handle: WindowHandle, ex_style: u32) -> BorderlessResult<()>;

    fn dpi_awareness(&self) -> BorderlessResult<DpiAwareness>;

    /// Primary display size in pixels.
    fn primary_display_size(&self) -> (i32, i32);

    /// Moves and resizes without touching z-order, forcing a frame
    /// change notification and showing the window.
    fn place_window(&self, handle: WindowHandle, rect: WindowRect) -> BorderlessResult<()>;

    fn window_rect(&self, handle: WindowHandle) -> BorderlessResult<WindowRect>;
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::error::BorderlessError;

    #[derive(Debug, Clone)]
    pub struct FakeWindow {
        pub handle: WindowHandle,
        pub title: String,
        pub visible: bool,
        pub pid: Option<u32>,
        pub style: u32,
        pub ex_style: u32,
        pub rect: WindowRect,
    }

    impl FakeWindow {
        pub fn new(raw: isize, title: &str, pid: u32) -> Self {
            FakeWindow {
                handle: WindowHandle::from_raw(raw),
                title: title.to_string(),
                visible: true,
                pid: Some(pid),
                style: 0,
                ex_style: 0,
                rect: WindowRect::from_origin_size(100, 100, 800, 600),
            }
        }

        pub fn hidden(mut self) -> Self {
            self.visible = false;
            self
        }

        pub fn with_style(mut self, style: u32, ex_style: u32) -> Self {
            self.style = style;
            self.ex_style = ex_style;
            self
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Mutation {
        SetStyle(WindowHandle, u32),
        SetExStyle(WindowHandle, u32),
        Place(WindowHandle, WindowRect),
    }

    /// In-memory window manager that records every mutating call.
    ///
    /// The knobs let tests model a window manager that ignores or clamps
    /// what it is told.
    #[derive(Debug)]
    pub struct FakeWindowSystem {
        pub windows: RefCell<Vec<FakeWindow>>,
        pub processes: HashMap<u32, String>,
        pub display: (i32, i32),
        pub mutations: RefCell<Vec<Mutation>>,
        pub sticky_style_bits: u32,
        pub size_clamp: Option<(i32, i32)>,
        pub fail_place: bool,
        pub dpi: Option<DpiAwareness>,
    }

    impl FakeWindowSystem {
        pub fn new(windows: Vec<FakeWindow>, processes: &[(u32, &str)]) -> Self {
            FakeWindowSystem {
                windows: RefCell::new(windows),
                processes: processes
                    .iter()
                    .map(|(pid, name)| (*pid, name.to_string()))
                    .collect(),
                display: (3840, 2160),
                mutations: RefCell::new(Vec::new()),
                sticky_style_bits: 0,
                size_clamp: None,
                fail_place: false,
                dpi: Some(DpiAwareness::PerMonitorAware),
            }
        }

        pub fn window(&self, handle: WindowHandle) -> Option<FakeWindow> {
            self.windows
                .borrow()
                .iter()
                .find(|w| w.handle == handle)
                .cloned()
        }

        pub fn mutation_count(&self) -> usize {
            self.mutations.borrow().len()
        }

        fn with_window<T>(
            &self,
            handle: WindowHandle,
            call: &'static str,
            f: impl FnOnce(&mut FakeWindow) -> T,
        ) -> BorderlessResult<T> {
            let mut windows = self.windows.borrow_mut();
            match windows.iter_mut().find(|w| w.handle == handle) {
                Some(window) => Ok(f(window)),
                None => Err(BorderlessError::Os { call, code: 1400 }),
            }
        }
    }

    impl WindowSystem for FakeWindowSystem {
        fn top_level_windows(&self) -> BorderlessResult<Vec<WindowHandle>> {
            Ok(self.windows.borrow().iter().map(|w| w.handle).collect())
        }

        fn is_visible(&self, handle: WindowHandle) -> bool {
            self.window(handle).is_some_and(|w| w.visible)
        }

        fn window_title(&self, handle: WindowHandle) -> String {
            self.window(handle).map(|w| w.title).unwrap_or_default()
        }

        fn owner_pid(&self, handle: WindowHandle) -> Option<u32> {
            self.window(handle).and_then(|w| w.pid)
        }

        fn process_name(&self, pid: u32) -> Option<String> {
            self.processes.get(&pid).cloned()
        }

        fn style(&self, handle: WindowHandle) -> BorderlessResult<u32> {
            self.with_window(handle, "GetWindowLongPtrW", |w| w.style)
        }

        fn set_style(&self, handle: WindowHandle, style: u32) -> BorderlessResult<()> {
            self.mutations
                .borrow_mut()
                .push(Mutation::SetStyle(handle, style));
            let sticky = self.sticky_style_bits;
            self.with_window(handle, "SetWindowLongPtrW", |w| {
                w.style = style | (w.style & sticky)
            })
        }

        fn ex_style(&self, handle: WindowHandle) -> BorderlessResult<u32> {
            self.with_window(handle, "GetWindowLongPtrW", |w| w.ex_style)
        }

        fn set_ex_style(&self, handle: WindowHandle, ex_style: u32) -> BorderlessResult<()> {
            self.mutations
                .borrow_mut()
                .push(Mutation::SetExStyle(handle, ex_style));
            self.with_window(handle, "SetWindowLongPtrW", |w| w.ex_style = ex_style)
        }

        fn dpi_awareness(&self) -> BorderlessResult<DpiAwareness> {
            self.dpi.ok_or(BorderlessError::Os {
                call: "GetProcessDpiAwareness",
                code: 5,
            })
        }

        fn primary_display_size(&self) -> (i32, i32) {
            self.display
        }

        fn place_window(&self, handle: WindowHandle, rect: WindowRect) -> BorderlessResult<()> {
            self.mutations.borrow_mut().push(Mutation::Place(handle, rect));
            if self.fail_place {
                return Err(BorderlessError::Os {
                    call: "SetWindowPos",
                    code: 5,
                });
            }
            let clamp = self.size_clamp;
            self.with_window(handle, "SetWindowPos", |w| {
                let (width, height) = match clamp {
                    Some((max_w, max_h)) => (rect.width().min(max_w), rect.height().min(max_h)),
                    None => (rect.width(), rect.height()),
                };
                w.rect = WindowRect::from_origin_size(rect.left, rect.top, width, height);
                w.visible = true;
            })
        }

        fn window_rect(&self, handle: WindowHandle) -> BorderlessResult<WindowRect> {
            self.with_window(handle, "GetWindowRect", |w| w.rect)
        }
    }
}
