//! Reveal timing for the animated diagram.
//!
//! The animation is a single normalized clock: each connector and label
//! carries an activation threshold, and its opacity ramps linearly from the
//! moment the clock passes that threshold.

/// Fade scale most elements use: full opacity 0.2 progress units after the
/// activation threshold.
pub const DEFAULT_FADE_SCALE: f64 = 5.0;

/// Normalized animation time in `[0,1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    /// Everything revealed; the value still diagrams render at.
    pub const COMPLETE: Progress = Progress(1.0);

    /// Clamp an arbitrary value into `[0,1]`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Progress of frame `index` in an animation of `frames` total frames.
    ///
    /// Divides by the total frame count, so the last frame of an animation
    /// sits just short of 1.0.
    pub fn from_frame(index: u32, frames: u32) -> Self {
        if frames == 0 {
            return Self::COMPLETE;
        }
        Self::new(f64::from(index) / f64::from(frames))
    }

    /// The underlying value.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Opacity of an element with activation threshold `reveal_at` at `progress`.
///
/// Computes `(progress - reveal_at) * fade_scale` clamped to `[0,1]`: zero at
/// or before the threshold, then a linear ramp to full opacity.
pub fn reveal_opacity(progress: Progress, reveal_at: f64, fade_scale: f64) -> f64 {
    ((progress.value() - reveal_at) * fade_scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_or_before_threshold() {
        for p in [0.0, 0.1, 0.3] {
            assert_eq!(reveal_opacity(Progress::new(p), 0.3, DEFAULT_FADE_SCALE), 0.0);
        }
    }

    #[test]
    fn ramps_linearly_then_clamps() {
        let o = reveal_opacity(Progress::new(0.4), 0.3, DEFAULT_FADE_SCALE);
        assert!((o - 0.5).abs() < 1e-12);
        assert_eq!(reveal_opacity(Progress::new(0.9), 0.3, DEFAULT_FADE_SCALE), 1.0);
    }

    #[test]
    fn monotone_in_progress() {
        let mut prev = -1.0;
        for i in 0..=40 {
            let p = Progress::from_frame(i, 40);
            let o = reveal_opacity(p, 0.55, DEFAULT_FADE_SCALE);
            assert!(o >= prev);
            assert!((0.0..=1.0).contains(&o));
            prev = o;
        }
    }

    #[test]
    fn frame_progress_divides_by_total() {
        assert_eq!(Progress::from_frame(0, 40).value(), 0.0);
        assert_eq!(Progress::from_frame(20, 40).value(), 0.5);
        // The final frame never reaches 1.0.
        assert!(Progress::from_frame(39, 40).value() < 1.0);
        assert_eq!(Progress::from_frame(0, 0), Progress::COMPLETE);
    }
}
