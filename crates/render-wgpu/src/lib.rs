//! wgpu path-tracing backend for daedalus.
//!
//! Each frame blends one new radiance sample per pixel into a ping-pong pair
//! of accumulation textures; any viewpoint change restarts the estimate.
//!
//! # Invariants
//! - The uniform record for a frame carries the pre-increment frame count,
//!   which equals the number of prior samples the kernel blends against.
//! - The frame counter advances only after a successful present; a skipped
//!   frame neither loses nor double-counts accumulation progress.
//! - Accumulation textures are sized to the surface once; a resize
//!   re-initializes them rather than resizing in place.

mod accumulation;
mod context;
mod frame;
mod shaders;
mod tracer;
mod uniforms;

pub use context::{GpuContext, InitError};
pub use frame::{FrameClock, WriteTarget};
pub use tracer::PathTracer;
pub use uniforms::{CameraUniforms, FrameUniforms};
