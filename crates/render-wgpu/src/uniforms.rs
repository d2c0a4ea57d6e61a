use bytemuck::{Pod, Zeroable};
use daedalus_render::CameraBasis;

/// Camera record in the device kernel's expected layout.
///
/// Field order is the binary contract: origin, u, v, w. The `_pad` fields
/// satisfy the 16-byte vec3 alignment of the WGSL uniform address space and
/// carry no data.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub origin: [f32; 3],
    _pad0: f32,
    pub u: [f32; 3],
    _pad1: f32,
    pub v: [f32; 3],
    _pad2: f32,
    pub w: [f32; 3],
    _pad3: f32,
}

impl From<CameraBasis> for CameraUniforms {
    fn from(basis: CameraBasis) -> Self {
        Self {
            origin: basis.origin.to_array(),
            _pad0: 0.0,
            u: basis.u.to_array(),
            _pad1: 0.0,
            v: basis.v.to_array(),
            _pad2: 0.0,
            w: basis.w.to_array(),
            _pad3: 0.0,
        }
    }
}

/// The per-frame uniform record, uploaded once per frame into a single-slot
/// buffer. `frame_count` is the number of samples already accumulated — the
/// kernel blends the new sample against exactly that many priors.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub camera: CameraUniforms,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    _pad: u32,
}

impl FrameUniforms {
    pub fn new(basis: CameraBasis, width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            camera: basis.into(),
            width,
            height,
            frame_count,
            _pad: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::mem::offset_of;

    #[test]
    fn layout_matches_wgsl_uniform_block() {
        assert_eq!(size_of::<CameraUniforms>(), 64);
        assert_eq!(size_of::<FrameUniforms>(), 80);
        assert_eq!(offset_of!(CameraUniforms, origin), 0);
        assert_eq!(offset_of!(CameraUniforms, u), 16);
        assert_eq!(offset_of!(CameraUniforms, v), 32);
        assert_eq!(offset_of!(CameraUniforms, w), 48);
        assert_eq!(offset_of!(FrameUniforms, width), 64);
        assert_eq!(offset_of!(FrameUniforms, height), 68);
        assert_eq!(offset_of!(FrameUniforms, frame_count), 72);
    }

    #[test]
    fn basis_fields_carried_in_order() {
        let basis = CameraBasis {
            origin: Vec3::new(1.0, 2.0, 3.0),
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::NEG_Z,
        };
        let uniforms = FrameUniforms::new(basis, 800, 600, 7);
        assert_eq!(uniforms.camera.origin, [1.0, 2.0, 3.0]);
        assert_eq!(uniforms.camera.u, [1.0, 0.0, 0.0]);
        assert_eq!(uniforms.camera.v, [0.0, 1.0, 0.0]);
        assert_eq!(uniforms.camera.w, [0.0, 0.0, -1.0]);
        assert_eq!(uniforms.frame_count, 7);

        let bytes = bytemuck::bytes_of(&uniforms);
        assert_eq!(bytes.len(), 80);
        // width sits immediately after the four padded vec3 slots
        assert_eq!(&bytes[64..68], &800u32.to_ne_bytes());
    }
}
