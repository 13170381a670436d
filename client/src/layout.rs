/// Frame height shared by the map and the chart.
pub const FRAME_HEIGHT: f64 = 460.0;

/// Split the window into the map frame (42.5% of the width) and the
/// chart frame (50%); the remainder is breathing room between them.
pub fn split_frames(window_width: f64) -> (f64, f64) {
    (window_width * 0.425, window_width * 0.5)
}

/// Current window size, with a fallback for detached contexts.
pub fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1200.0, 800.0);
    };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1200.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    (w, h)
}
