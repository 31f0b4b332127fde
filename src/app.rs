// src/app.rs

use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{Key, NamedKey},
    window::Window,
};
use clipper_demo::controls::{command_for_char, command_for_special_key, Command, SpecialKey};
use clipper_demo::polygon_file::PolygonFileError;
use clipper_demo::{Bounds, ClipperDemo, DemoConfig, Outcome};
use crate::rendering::{Renderer, WGSL_SHADER_SOURCE};
use crate::ui::{build_ui, repaint_request, status_text, Repaint, STATUS_BAR_HEIGHT};

const BACKGROUND: wgpu::Color = wgpu::Color::WHITE;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to load initial polygons: {0}")]
    Load(#[from] PolygonFileError),
}

pub struct ClipperApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    demo: ClipperDemo,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    show_help: bool,
    geometry_dirty: bool,
    // Deadline of a delayed egui repaint. Always `None` on wasm.
    repaint_at: Option<Instant>,
}

impl ClipperApp {
    pub async fn new(window: Arc<Window>, demo_config: &DemoConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        // Colours are authored like classic GL colours, so prefer a linear
        // target and skip the sRGB encode.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter().copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            config.width as f32, config.height as f32,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device, config.format, None, 1,
        );

        let demo = ClipperDemo::start(demo_config, generation_bounds(&window))?;
        window.set_title(&demo.title());

        Ok(Self {
            surface, device, queue, config, size,
            renderer, demo,
            egui_ctx, egui_state, egui_renderer,
            show_help: false,
            geometry_dirty: true,
            repaint_at: None,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.queue, new_size.width as f32, new_size.height as f32);
        }
    }

    /// Routes a window event to egui first, then to the demo. Returns the
    /// demo's outcome when the event was a command.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> Option<Outcome> {
        let response = self.egui_state.on_window_event(window, event);
        if response.repaint {
            window.request_redraw();
        }
        if response.consumed {
            return None;
        }

        let command = match event {
            WindowEvent::KeyboardInput { event: key_event, .. }
                if key_event.state == ElementState::Pressed =>
            {
                match &key_event.logical_key {
                    Key::Named(NamedKey::Enter) => Some(command_for_special_key(SpecialKey::Enter)),
                    Key::Named(NamedKey::Space) => Some(command_for_special_key(SpecialKey::Space)),
                    Key::Named(NamedKey::Escape) => Some(command_for_special_key(SpecialKey::Escape)),
                    Key::Named(NamedKey::F1) => Some(command_for_special_key(SpecialKey::F1)),
                    Key::Character(text) => text.chars().next().and_then(command_for_char),
                    _ => None,
                }
            }
            WindowEvent::MouseInput { state: ElementState::Released, button: MouseButton::Left, .. } => {
                Some(Command::Regenerate)
            }
            _ => None,
        }?;

        Some(self.apply(command, window))
    }

    fn apply(&mut self, command: Command, window: &Window) -> Outcome {
        let outcome = self.demo.apply(command, generation_bounds(window));
        match outcome {
            Outcome::Changed => {
                log::debug!("{}", self.demo.title());
                self.geometry_dirty = true;
                window.set_title(&self.demo.title());
                window.request_redraw();
            }
            Outcome::Repaint => window.request_redraw(),
            Outcome::ToggleHelp => {
                self.show_help = !self.show_help;
                window.request_redraw();
            }
            Outcome::Quit => {}
        }
        outcome
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        if self.geometry_dirty {
            let mesh = self.demo.build_mesh();
            log::trace!("uploading {} vertices, {} indices", mesh.vertices.len(), mesh.indices.len());
            self.renderer.upload(&self.device, &self.queue, &mesh);
            self.geometry_dirty = false;
        }

        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        self.renderer.render(&mut encoder, &view, BACKGROUND);

        let status = status_text(self.demo.pending_vertex_count());
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            build_ui(ctx, &mut self.show_help, &status);
        });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        if let Some(viewport) = full_output.viewport_output.get(&egui::ViewportId::ROOT) {
            self.schedule_repaint(window, repaint_request(viewport.repaint_delay));
        }
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }
}

impl ClipperApp {
    fn schedule_repaint(&mut self, window: &Window, repaint: Repaint) {
        self.repaint_at = None;
        match repaint {
            Repaint::Now => window.request_redraw(),
            Repaint::After(delay) => {
                cfg_if::cfg_if! {
                    if #[cfg(target_arch = "wasm32")] {
                        let _ = delay;
                        window.request_redraw();
                    } else {
                        self.repaint_at = Instant::now().checked_add(delay);
                    }
                }
            }
            Repaint::Idle => {}
        }
    }

    /// Sleep until the next event, or until egui's delayed repaint is due.
    pub fn control_flow(&self) -> ControlFlow {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                ControlFlow::Wait
            } else {
                self.repaint_at.map_or(ControlFlow::Wait, ControlFlow::WaitUntil)
            }
        }
    }

    /// Called when the loop wakes from `WaitUntil`.
    pub fn repaint_if_due(&mut self, window: &Window) {
        if let Some(at) = self.repaint_at {
            if Instant::now() >= at {
                self.repaint_at = None;
                window.request_redraw();
            }
        }
    }
}

/// Client area available to random polygons: the window minus the status bar.
fn generation_bounds(window: &Window) -> Bounds {
    let size = window.inner_size();
    let status_height = (STATUS_BAR_HEIGHT as f64 * window.scale_factor()).ceil() as u32;
    Bounds::new(size.width, size.height.saturating_sub(status_height))
}
