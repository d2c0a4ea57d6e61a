use crate::accumulation::AccumulationPair;
use crate::context::GpuContext;
use crate::frame::{FrameClock, WriteTarget};
use crate::shaders;
use crate::uniforms::FrameUniforms;
use daedalus_common::TracerConfig;
use daedalus_input::{CameraController, InputEvent};
use daedalus_render::{FirstPersonCamera, FrameDelegate, FrameOutcome};
use wgpu::util::DeviceExt;

/// Progressive path tracer: owns the camera, the input integrator, the
/// frame counter, and the ping-pong accumulation pair, and drives one
/// render pass per frame.
///
/// Per frame: integrate input, upload the uniform record with the
/// pre-increment frame count, render into the parity-selected write target
/// while reading the other texture, present, then advance the counter.
pub struct PathTracer {
    context: GpuContext,
    camera: FirstPersonCamera,
    controller: CameraController,
    clock: FrameClock,
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
    accumulation: AccumulationPair,
    bind_group_even: wgpu::BindGroup,
    bind_group_odd: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl PathTracer {
    pub fn new(context: GpuContext, config: &TracerConfig) -> Self {
        let camera = FirstPersonCamera::new(
            config.initial_position,
            config.initial_yaw_degrees.to_radians(),
            config.initial_pitch_degrees.to_radians(),
        );
        let controller = CameraController::new(config.speed, config.sensitivity);
        let clock = FrameClock::new();
        let (width, height) = (config.width, config.height);

        let uniform_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("uniform_buffer"),
                    contents: bytemuck::bytes_of(&FrameUniforms::new(
                        camera.basis(),
                        width,
                        height,
                        0,
                    )),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

        let bind_group_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("tracer_bind_group_layout"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: None,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::StorageTexture {
                                access: wgpu::StorageTextureAccess::WriteOnly,
                                format: wgpu::TextureFormat::Rgba32Float,
                                view_dimension: wgpu::TextureViewDimension::D2,
                            },
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("tracer_pipeline_layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

        let shader = context
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("tracer_shader"),
                source: wgpu::ShaderSource::Wgsl(shaders::TRACER_SHADER.into()),
            });

        let pipeline = context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("tracer_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });

        let accumulation = AccumulationPair::new(&context.device, width, height);
        let (bind_group_even, bind_group_odd) = Self::create_bind_groups(
            &context.device,
            &bind_group_layout,
            &uniform_buffer,
            &accumulation,
        );

        Self {
            context,
            camera,
            controller,
            clock,
            uniform_buffer,
            bind_group_layout,
            pipeline,
            accumulation,
            bind_group_even,
            bind_group_odd,
            width,
            height,
        }
    }

    /// One bind group per parity so the swap is a pointer selection, not a
    /// per-frame allocation.
    fn create_bind_groups(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        accumulation: &AccumulationPair,
    ) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let build = |label: &str, target: WriteTarget| {
            let (read, write) = accumulation.views(target);
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(read),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(write),
                    },
                ],
            })
        };
        (
            build("tracer_bind_group_even", WriteTarget::First),
            build("tracer_bind_group_odd", WriteTarget::Second),
        )
    }

    /// Forward one drained input event. Camera-affecting events discard the
    /// accumulated estimate before they are integrated.
    pub fn handle_event(&mut self, event: InputEvent) {
        if event.is_camera_affecting() {
            self.clock.invalidate();
        }
        match event {
            InputEvent::Key { key, pressed } => self.controller.process_key(key, pressed),
            InputEvent::PointerMotion { dx, dy, right_held } => {
                if right_held {
                    self.controller.process_pointer(dx, dy);
                }
            }
            InputEvent::Scroll { delta } => self.controller.process_scroll(delta),
            InputEvent::Quit => {}
        }
    }

    /// Samples accumulated so far.
    pub fn frame_count(&self) -> u32 {
        self.clock.frame_count()
    }

    /// Current camera position, for status display.
    pub fn camera_position(&self) -> glam::Vec3 {
        self.camera.position
    }

    /// Reconfigure the surface after a lost or outdated swapchain, keeping
    /// the current size.
    pub fn recover_surface(&self) {
        self.context.reconfigure();
    }

    /// Re-initialize size-dependent state for a new surface size: the
    /// surface configuration, the accumulation pair, and the parity bind
    /// groups. Discards all accumulated samples.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.width = width;
        self.height = height;
        self.accumulation = AccumulationPair::new(&self.context.device, width, height);
        let (even, odd) = Self::create_bind_groups(
            &self.context.device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &self.accumulation,
        );
        self.bind_group_even = even;
        self.bind_group_odd = odd;
        self.clock.invalidate();
        tracing::info!(width, height, "accumulation surfaces re-initialized");
    }

    fn bind_group(&self) -> &wgpu::BindGroup {
        match self.clock.write_target() {
            WriteTarget::First => &self.bind_group_even,
            WriteTarget::Second => &self.bind_group_odd,
        }
    }
}

impl FrameDelegate for PathTracer {
    type Error = wgpu::SurfaceError;

    fn draw_frame(&mut self, delta_time: f32) -> Result<FrameOutcome, wgpu::SurfaceError> {
        // Integrate exactly once per frame; events were drained upstream.
        self.controller.update(&mut self.camera, delta_time);

        // Single-slot overwrite; the device reads it during this frame's
        // pass only.
        let uniforms = FrameUniforms::new(
            self.camera.basis(),
            self.width,
            self.height,
            self.clock.frame_count(),
        );
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = match self.context.acquire_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("no presentable surface this frame; skipping");
                return Ok(FrameOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("tracer_encoder"),
                });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tracer_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, self.bind_group(), &[]);
            pass.draw(0..3, 0..1);
        }
        self.context.queue.submit(std::iter::once(encoder.finish()));

        frame.present();
        self.clock.advance();
        Ok(FrameOutcome::Presented)
    }
}
