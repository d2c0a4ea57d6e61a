use anyhow::Result;
use clap::Parser;
use daedalus_common::TracerConfig;
use daedalus_input::{InputEvent, Key};
use daedalus_render::{FrameDelegate, FrameOutcome};
use daedalus_render_wgpu::{GpuContext, PathTracer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "daedalus", about = "Progressive GPU path tracer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file; explicit flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Camera translation speed in units per second
    #[arg(long)]
    speed: Option<f32>,

    /// Rotation and scroll-dolly sensitivity
    #[arg(long)]
    sensitivity: Option<f32>,
}

impl Cli {
    fn resolve_config(&self) -> Result<TracerConfig> {
        let mut config = match &self.config {
            Some(path) => TracerConfig::load(path)?,
            None => TracerConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(sensitivity) = self.sensitivity {
            config.sensitivity = sensitivity;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Map winit key codes into the tracer's key vocabulary.
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::KeyW),
        KeyCode::KeyA => Some(Key::KeyA),
        KeyCode::KeyS => Some(Key::KeyS),
        KeyCode::KeyD => Some(Key::KeyD),
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        KeyCode::ArrowLeft => Some(Key::ArrowLeft),
        KeyCode::ArrowRight => Some(Key::ArrowRight),
        KeyCode::Space => Some(Key::Space),
        KeyCode::ShiftLeft => Some(Key::ShiftLeft),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

struct App {
    config: TracerConfig,
    window: Option<Arc<Window>>,
    tracer: Option<PathTracer>,
    right_held: bool,
    last_frame: Instant,
}

impl App {
    fn new(config: TracerConfig) -> Self {
        Self {
            config,
            window: None,
            tracer: None,
            right_held: false,
            last_frame: Instant::now(),
        }
    }
}

/// Create the window and the GPU session. Any failure here is fatal: it is
/// reported by the caller and the frame loop never starts.
fn init_session(
    event_loop: &ActiveEventLoop,
    config: &TracerConfig,
) -> Result<(Arc<Window>, PathTracer)> {
    let attrs = Window::default_attributes()
        .with_title("Daedalus")
        .with_inner_size(PhysicalSize::new(config.width, config.height));
    let window = Arc::new(event_loop.create_window(attrs)?);

    // The surface and accumulation textures are sized to the actual inner
    // size, which may differ from the requested one on HiDPI displays.
    let size = window.inner_size();
    let context = pollster::block_on(GpuContext::new(
        window.clone(),
        size.width,
        size.height,
    ))?;

    let session_config = TracerConfig {
        width: size.width.max(1),
        height: size.height.max(1),
        ..*config
    };
    let tracer = PathTracer::new(context, &session_config);
    Ok((window, tracer))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match init_session(event_loop, &self.config) {
            Ok((window, tracer)) => {
                self.window = Some(window);
                self.tracer = Some(tracer);
                self.last_frame = Instant::now();
            }
            Err(e) => {
                tracing::error!("initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(tracer) = &mut self.tracer {
                    tracer.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if code == KeyCode::Escape && pressed {
                    tracing::info!("escape pressed; quitting");
                    event_loop.exit();
                    return;
                }
                if let (Some(key), Some(tracer)) = (map_key(code), &mut self.tracer) {
                    tracer.handle_event(InputEvent::Key { key, pressed });
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.right_held = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.right_held);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(tracer) = &mut self.tracer {
                    tracer.handle_event(InputEvent::Scroll { delta: amount });
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.1);
                self.last_frame = now;

                let Some(tracer) = &mut self.tracer else {
                    return;
                };
                match tracer.draw_frame(dt) {
                    Ok(FrameOutcome::Presented | FrameOutcome::Skipped) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        tracing::warn!("swapchain lost; reconfiguring");
                        tracer.recover_surface();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("out of GPU memory; exiting");
                        event_loop.exit();
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.right_held {
                if let Some(tracer) = &mut self.tracer {
                    tracer.handle_event(InputEvent::PointerMotion {
                        dx: delta.0 as f32,
                        dy: delta.1 as f32,
                        right_held: true,
                    });
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.resolve_config()?;
    tracing::info!(
        "daedalus starting at {}x{}, speed {}, sensitivity {}",
        config.width,
        config.height,
        config.speed,
        config.sensitivity
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
