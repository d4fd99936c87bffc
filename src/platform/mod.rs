//! Browser platform glue
//!
//! Everything that talks to the DOM lives here; the field core and draw
//! pass stay platform-free. Frame pacing diagnostics sit at this level so
//! they can be unit tested off the browser.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::FieldAnimator;

/// Rolling frames-per-second estimate over the last 60 frame timestamps
#[derive(Debug)]
pub struct FpsCounter {
    times: [f64; 60],
    idx: usize,
    filled: bool,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            times: [0.0; 60],
            idx: 0,
            filled: false,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame timestamp (milliseconds, monotonic)
    pub fn record(&mut self, time_ms: f64) {
        self.times[self.idx] = time_ms;
        self.idx = (self.idx + 1) % self.times.len();
        if self.idx == 0 {
            self.filled = true;
        }
    }

    /// Average FPS over the recorded window; 0 until two frames exist
    pub fn average(&self) -> f64 {
        let len = self.times.len();
        let n = if self.filled { len } else { self.idx };
        if n < 2 {
            return 0.0;
        }
        let newest = self.times[(self.idx + len - 1) % len];
        let oldest = if self.filled {
            self.times[self.idx]
        } else {
            self.times[0]
        };
        let span_ms = newest - oldest;
        if span_ms <= 0.0 {
            0.0
        } else {
            (n as f64 - 1.0) * 1000.0 / span_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_needs_two_frames() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.average(), 0.0);
        fps.record(0.0);
        assert_eq!(fps.average(), 0.0);
    }

    #[test]
    fn test_fps_counter_two_frames() {
        let mut fps = FpsCounter::new();
        fps.record(0.0);
        fps.record(100.0);
        assert!((fps.average() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_fps_counter_steady_sixty() {
        let mut fps = FpsCounter::new();
        for i in 0..200 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert!((fps.average() - 60.0).abs() < 0.1);
    }
}
