/// What a frame callback did with its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Commands were submitted and the frame was presented.
    Presented,
    /// No presentable surface was available; nothing was submitted and no
    /// accumulation progress was consumed.
    Skipped,
}

/// Capability interface for receiving a per-frame draw callback.
///
/// The windowing layer drives whatever implements this once per loop
/// iteration. Backends implement the capability instead of overriding a
/// toolkit view class, which keeps the orchestrator independent of any
/// particular dispatch mechanism.
pub trait FrameDelegate {
    /// Error type for unrecoverable per-frame failures. Recoverable
    /// conditions (no surface this frame) are [`FrameOutcome::Skipped`],
    /// not errors.
    type Error;

    /// Render one frame. `delta_time` is the seconds elapsed since the
    /// previous call, already clamped by the caller.
    fn draw_frame(&mut self, delta_time: f32) -> Result<FrameOutcome, Self::Error>;
}

/// Headless delegate — counts frames instead of rendering them.
///
/// Useful for exercising a frame loop in tests and for CLI smoke runs where
/// no GPU surface exists.
#[derive(Debug, Default)]
pub struct DebugFrameDelegate {
    frames: u32,
    elapsed: f32,
}

impl DebugFrameDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Total delta time observed across all frames.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl FrameDelegate for DebugFrameDelegate {
    type Error = std::convert::Infallible;

    fn draw_frame(&mut self, delta_time: f32) -> Result<FrameOutcome, Self::Error> {
        self.frames += 1;
        self.elapsed += delta_time;
        Ok(FrameOutcome::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_delegate_counts_frames() {
        let mut delegate = DebugFrameDelegate::new();
        for _ in 0..3 {
            let outcome = delegate.draw_frame(0.016).unwrap();
            assert_eq!(outcome, FrameOutcome::Presented);
        }
        assert_eq!(delegate.frames(), 3);
        assert!((delegate.elapsed() - 0.048).abs() < 1e-6);
    }

    fn drive(delegate: &mut dyn FrameDelegate<Error = std::convert::Infallible>, n: u32) {
        for _ in 0..n {
            let _ = delegate.draw_frame(0.01);
        }
    }

    #[test]
    fn delegate_is_object_safe() {
        let mut delegate = DebugFrameDelegate::new();
        drive(&mut delegate, 5);
        assert_eq!(delegate.frames(), 5);
    }
}
