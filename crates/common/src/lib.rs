//! Shared configuration types for the daedalus path tracer.
//!
//! # Invariants
//! - Config values are validated before any GPU resource is sized from them.
//! - File values never silently win over explicit CLI flags; merging is the
//!   caller's job via [`TracerConfig`] field overrides.

mod config;

pub use config::{ConfigError, TracerConfig};
