use std::ptr::null_mut;

use winapi::shared::minwindef::{BOOL, DWORD, FALSE, LPARAM, TRUE};
use winapi::shared::windef::{HWND, RECT};
use winapi::shared::winerror::SUCCEEDED;
use winapi::um::errhandlingapi::{GetLastError, SetLastError};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::shellscalingapi::{
    GetProcessDpiAwareness, PROCESS_DPI_AWARENESS, PROCESS_DPI_UNAWARE,
    PROCESS_PER_MONITOR_DPI_AWARE, PROCESS_SYSTEM_DPI_AWARE, SetProcessDpiAwareness,
};
use winapi::um::winbase::QueryFullProcessImageNameW;
use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;
use winapi::um::winuser::{
    EnumWindows, GWL_EXSTYLE, GWL_STYLE, GetSystemMetrics, GetWindowLongPtrW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsWindowVisible,
    SM_CXSCREEN, SM_CYSCREEN, SWP_FRAMECHANGED, SWP_NOZORDER, SWP_SHOWWINDOW, SetWindowLongPtrW,
    SetWindowPos, WS_CAPTION, WS_EX_CLIENTEDGE, WS_EX_DLGMODALFRAME, WS_EX_STATICEDGE,
    WS_EX_WINDOWEDGE, WS_THICKFRAME,
};

use crate::error::{BorderlessError, BorderlessResult};
use crate::models::WindowHandle;
use crate::window_system::{DpiAwareness, WindowRect, WindowSystem, style};

const _: () = {
    assert!(style::CAPTION == WS_CAPTION);
    assert!(style::THICK_FRAME == WS_THICKFRAME);
    assert!(style::EX_DLG_MODAL_FRAME == WS_EX_DLGMODALFRAME);
    assert!(style::EX_WINDOW_EDGE == WS_EX_WINDOWEDGE);
    assert!(style::EX_CLIENT_EDGE == WS_EX_CLIENTEDGE);
    assert!(style::EX_STATIC_EDGE == WS_EX_STATICEDGE);
};

fn hwnd(handle: WindowHandle) -> HWND {
    handle.raw() as HWND
}

fn last_error(call: &'static str) -> BorderlessError {
    let code = unsafe { GetLastError() };
    BorderlessError::Os { call, code }
}

/// Declares per-monitor DPI awareness so display metrics and window
/// rectangles are physical pixels. Fails quietly if already set, e.g. by
/// a manifest.
pub fn enable_dpi_awareness() {
    let hr = unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) };
    if !SUCCEEDED(hr) {
        log::debug!("SetProcessDpiAwareness returned {:#x}", hr);
    }
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = unsafe { &mut *(lparam as *mut Vec<WindowHandle>) };
    handles.push(WindowHandle::from_raw(hwnd as isize));
    TRUE
}

pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    fn top_level_windows(&self) -> BorderlessResult<Vec<WindowHandle>> {
        let mut handles: Vec<WindowHandle> = Vec::new();
        // EnumWindows is synchronous, so the Vec outlives every callback.
        let ok = unsafe {
            EnumWindows(
                Some(collect_window),
                &mut handles as *mut Vec<WindowHandle> as LPARAM,
            )
        };
        if ok == FALSE {
            return Err(last_error("EnumWindows"));
        }
        Ok(handles)
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowVisible(hwnd(handle)) != FALSE }
    }

    fn window_title(&self, handle: WindowHandle) -> String {
        unsafe {
            let len = GetWindowTextLengthW(hwnd(handle));
            if len <= 0 {
                return String::new();
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd(handle), buf.as_mut_ptr(), buf.len() as i32);
            String::from_utf16_lossy(&buf[..copied.max(0) as usize])
        }
    }

    fn owner_pid(&self, handle: WindowHandle) -> Option<u32> {
        let mut pid: DWORD = 0;
        let thread = unsafe { GetWindowThreadProcessId(hwnd(handle), &mut pid) };
        (thread != 0).then_some(pid)
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        unsafe {
            let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid);
            if process.is_null() {
                return None;
            }

            let mut buf = [0u16; 1024];
            let mut size = buf.len() as DWORD;
            let ok = QueryFullProcessImageNameW(process, 0, buf.as_mut_ptr(), &mut size);
            CloseHandle(process);
            if ok == FALSE {
                return None;
            }

            let path = String::from_utf16_lossy(&buf[..size as usize]);
            path.rsplit(['\\', '/']).next().map(str::to_string)
        }
    }

    fn style(&self, handle: WindowHandle) -> BorderlessResult<u32> {
        read_long(handle, GWL_STYLE)
    }

    fn set_style(&self, handle: WindowHandle, style: u32) -> BorderlessResult<()> {
        write_long(handle, GWL_STYLE, style)
    }

    fn ex_style(&self, handle: WindowHandle) -> BorderlessResult<u32> {
        read_long(handle, GWL_EXSTYLE)
    }

    fn set_ex_style(&self, handle: WindowHandle, ex_style: u32) -> BorderlessResult<()> {
        write_long(handle, GWL_EXSTYLE, ex_style)
    }

    fn dpi_awareness(&self) -> BorderlessResult<DpiAwareness> {
        let mut value: PROCESS_DPI_AWARENESS = PROCESS_DPI_UNAWARE;
        let hr = unsafe { GetProcessDpiAwareness(null_mut(), &mut value) };
        if !SUCCEEDED(hr) {
            return Err(BorderlessError::Os {
                call: "GetProcessDpiAwareness",
                code: hr as u32,
            });
        }

        Ok(match value {
            PROCESS_DPI_UNAWARE => DpiAwareness::Unaware,
            PROCESS_SYSTEM_DPI_AWARE => DpiAwareness::SystemAware,
            PROCESS_PER_MONITOR_DPI_AWARE => DpiAwareness::PerMonitorAware,
            other => DpiAwareness::Other(other),
        })
    }

    fn primary_display_size(&self) -> (i32, i32) {
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }

    fn place_window(&self, handle: WindowHandle, rect: WindowRect) -> BorderlessResult<()> {
        let ok = unsafe {
            SetWindowPos(
                hwnd(handle),
                null_mut(),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_FRAMECHANGED | SWP_NOZORDER | SWP_SHOWWINDOW,
            )
        };
        if ok == FALSE {
            return Err(last_error("SetWindowPos"));
        }
        Ok(())
    }

    fn window_rect(&self, handle: WindowHandle) -> BorderlessResult<WindowRect> {
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        if unsafe { GetWindowRect(hwnd(handle), &mut rect) } == FALSE {
            return Err(last_error("GetWindowRect"));
        }
        Ok(WindowRect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        })
    }
}

// A zero return is also a legitimate style value, so failure is only
// signalled through the thread's last-error code.
fn read_long(handle: WindowHandle, index: i32) -> BorderlessResult<u32> {
    unsafe {
        SetLastError(0);
        let value = GetWindowLongPtrW(hwnd(handle), index);
        if value == 0 && GetLastError() != 0 {
            return Err(last_error("GetWindowLongPtrW"));
        }
        Ok(value as u32)
    }
}

fn write_long(handle: WindowHandle, index: i32, value: u32) -> BorderlessResult<()> {
    unsafe {
        SetLastError(0);
        let previous = SetWindowLongPtrW(hwnd(handle), index, value as i32 as isize);
        if previous == 0 && GetLastError() != 0 {
            return Err(last_error("SetWindowLongPtrW"));
        }
        Ok(())
    }
}
