//! Window placement for the installer
//!
//! Centers the installer window on the monitor under the cursor on Windows.
//! Other platforms get a fixed offset and leave the rest to the window manager.

#[cfg(windows)]
pub fn calculate_window_position(window_size: [f32; 2]) -> eframe::egui::Pos2 {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONEAREST};
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let fallback = eframe::egui::Pos2::new(100.0, 100.0);
    unsafe {
        let mut point = POINT { x: 0, y: 0 };
        if GetCursorPos(&mut point).is_err() {
            return fallback;
        }
        let monitor = MonitorFromPoint(point, MONITOR_DEFAULTTONEAREST);
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !GetMonitorInfoW(monitor, &mut info).as_bool() {
            return fallback;
        }
        let work = info.rcWork;
        centered_in(
            [work.left as f32, work.top as f32],
            [(work.right - work.left) as f32, (work.bottom - work.top) as f32],
            window_size,
        )
    }
}

#[cfg(not(windows))]
pub fn calculate_window_position(_window_size: [f32; 2]) -> eframe::egui::Pos2 {
    eframe::egui::Pos2::new(100.0, 100.0)
}

/// Top-left corner that centers a window of `window_size` in the given work area.
pub fn centered_in(origin: [f32; 2], area: [f32; 2], window_size: [f32; 2]) -> eframe::egui::Pos2 {
    eframe::egui::Pos2::new(
        origin[0] + (area[0] - window_size[0]) / 2.0,
        origin[1] + (area[1] - window_size[1]) / 2.0,
    )
}
