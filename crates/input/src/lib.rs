//! Input events and camera integration for the daedalus path tracer.
//!
//! # Invariants
//! - Opposing movement keys cancel at integration time, never at
//!   state-setting time.
//! - Pointer and scroll deltas accumulate across events and affect exactly
//!   one frame's integration.
//! - A zero delta-time update leaves the camera untouched.

pub mod controller;
pub mod event;

pub use controller::CameraController;
pub use event::{InputEvent, Key};
