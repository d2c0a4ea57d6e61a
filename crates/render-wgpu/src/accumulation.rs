use crate::frame::WriteTarget;

/// Two equally sized radiance textures that swap read/write roles every
/// frame. Allocated once per surface size; wgpu zero-initializes them, so a
/// frame count of zero blends against an empty estimate.
pub struct AccumulationPair {
    first: wgpu::TextureView,
    second: wgpu::TextureView,
}

impl AccumulationPair {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let first = Self::create_texture(device, width, height, "radiance_samples_0");
        let second = Self::create_texture(device, width, height, "radiance_samples_1");
        Self { first, second }
    }

    /// `(prior_read, write_target)` views for the given target.
    pub fn views(&self, target: WriteTarget) -> (&wgpu::TextureView, &wgpu::TextureView) {
        match target {
            WriteTarget::First => (&self.second, &self.first),
            WriteTarget::Second => (&self.first, &self.second),
        }
    }

    fn create_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::STORAGE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}
