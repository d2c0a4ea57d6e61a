//! Renderer-agnostic view model for the daedalus path tracer.
//!
//! # Invariants
//! - The camera basis is orthonormal at every observation point; pitch cannot
//!   reach the poles.
//! - Backends receive frames through the [`FrameDelegate`] capability, never
//!   by subclassing a toolkit view type.

mod camera;
mod delegate;

pub use camera::{CameraBasis, FirstPersonCamera};
pub use delegate::{DebugFrameDelegate, FrameDelegate, FrameOutcome};

pub fn crate_info() -> &'static str {
    "daedalus-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
