//! Application shell: the overlay window, the control panel and the event loop.

use inkglass_core::{Canvas, ToolKind};
use inkglass_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use kurbo::Size;
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::{CompositeAlphaMode, PresentMode};
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::config::AppConfig;
use crate::event_handler::EventHandler;
use crate::toolbar::{render_toolbar, UiAction, UiState};

/// Control panel size in logical pixels.
const PANEL_SIZE: (f64, f64) = (240.0, 560.0);
/// Overlay size when the platform reports no monitor.
const FALLBACK_OVERLAY_SIZE: (f64, f64) = (1280.0, 800.0);
const PANEL_CLEAR: vello::wgpu::Color = vello::wgpu::Color {
    r: 0.98,
    g: 0.98,
    b: 0.99,
    a: 1.0,
};

fn overlay_attributes(event_loop: &ActiveEventLoop) -> WindowAttributes {
    let attrs = Window::default_attributes()
        .with_title("InkGlass")
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop);

    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next());
    match monitor {
        Some(monitor) => attrs
            .with_position(monitor.position())
            .with_inner_size(monitor.size()),
        None => {
            log::warn!("No monitor reported, using a default overlay size");
            attrs.with_inner_size(LogicalSize::new(
                FALLBACK_OVERLAY_SIZE.0,
                FALLBACK_OVERLAY_SIZE.1,
            ))
        }
    }
}

fn panel_attributes(config: &AppConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title("InkGlass Tools")
        .with_inner_size(LogicalSize::new(PANEL_SIZE.0, PANEL_SIZE.1))
        .with_position(PhysicalPosition::new(config.toolbar_x, config.toolbar_y))
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
}

fn create_window(event_loop: &ActiveEventLoop, attrs: WindowAttributes) -> RenderResult<Arc<Window>> {
    event_loop
        .create_window(attrs)
        .map(Arc::new)
        .map_err(|e| RendererError::InitFailed(format!("window: {e}")))
}

fn create_surface(
    gpu: &mut vello::util::RenderContext,
    window: Arc<Window>,
) -> RenderResult<RenderSurface<'static>> {
    let size = window.inner_size();
    pollster::block_on(gpu.create_surface(
        window,
        size.width.max(1),
        size.height.max(1),
        PresentMode::AutoVsync,
    ))
    .map_err(|e| RendererError::Surface(e.to_string()))
}

/// Switch the overlay surface to premultiplied alpha so the desktop shows
/// through unpainted pixels.
fn prefer_premultiplied_alpha(gpu: &vello::util::RenderContext, surface: &mut RenderSurface<'static>) {
    let handle = &gpu.devices[surface.dev_id];
    let caps = surface.surface.get_capabilities(handle.adapter());
    if caps.alpha_modes.contains(&CompositeAlphaMode::PreMultiplied) {
        surface.config.alpha_mode = CompositeAlphaMode::PreMultiplied;
        surface.surface.configure(&handle.device, &surface.config);
    } else {
        log::warn!("Surface has no premultiplied alpha mode: {:?}", caps.alpha_modes);
    }
}

/// The full-screen drawing window.
struct Overlay {
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Copies Vello's RGBA output onto the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,
    event_handler: EventHandler,
    /// Whether pointer input currently falls through to the desktop.
    passthrough: bool,
}

impl Overlay {
    fn new(gpu: &mut vello::util::RenderContext, window: Arc<Window>) -> RenderResult<Self> {
        let mut surface = create_surface(gpu, window.clone())?;
        prefer_premultiplied_alpha(gpu, &mut surface);

        let device = &gpu.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        Ok(Self {
            event_handler: EventHandler::new(window.scale_factor()),
            window,
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(),
            texture_blitter,
            passthrough: false,
        })
    }

    fn set_passthrough(&mut self, passthrough: bool) {
        if passthrough == self.passthrough {
            return;
        }
        self.passthrough = passthrough;
        if let Err(e) = self.window.set_cursor_hittest(!passthrough) {
            log::warn!("Click-through is not available: {e}");
        }
    }

    fn render(&mut self, gpu: &vello::util::RenderContext, canvas: &Canvas) -> RenderResult<()> {
        let width = self.surface.config.width;
        let height = self.surface.config.height;
        let scale = self.window.scale_factor();
        let viewport = Size::new(f64::from(width) / scale, f64::from(height) / scale);

        let ctx = RenderContext::new(canvas, viewport).with_scale_factor(scale);
        self.scene_renderer.build_scene(&ctx);
        let base_color = self.scene_renderer.background_color(&ctx);
        let scene = self.scene_renderer.take_scene();

        let handle = &gpu.devices[self.surface.dev_id];
        let device = &handle.device;
        let queue = &handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        // Vello needs a storage-bindable Rgba8Unorm target; the surface may be BGRA.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("overlay render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };
        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("overlay blit encoder"),
        });
        self.texture_blitter
            .copy(device, &mut encoder, &render_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

/// The control panel window.
struct Panel {
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    /// Shortcut keys pressed while the panel has focus.
    keys: EventHandler,
}

impl Panel {
    fn new(gpu: &mut vello::util::RenderContext, window: Arc<Window>) -> RenderResult<Self> {
        let surface = create_surface(gpu, window.clone())?;
        let device = &gpu.devices[surface.dev_id].device;

        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        Ok(Self {
            keys: EventHandler::new(window.scale_factor()),
            window,
            surface,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    /// Run the UI for one frame and paint it.
    fn render(&mut self, gpu: &vello::util::RenderContext, ui_state: &mut UiState) -> Option<UiAction> {
        let input = self.egui_state.take_egui_input(&self.window);
        let mut action = None;
        let output = self.egui_ctx.run(input, |ctx| {
            action = render_toolbar(ctx, ui_state);
        });
        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = output;
        self.egui_state.handle_platform_output(&self.window, platform_output);
        let primitives = self.egui_ctx.tessellate(shapes, pixels_per_point);

        let handle = &gpu.devices[self.surface.dev_id];
        let device = &handle.device;
        let queue = &handle.queue;

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        match self.surface.surface.get_current_texture() {
            Ok(surface_texture) => {
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [self.surface.config.width, self.surface.config.height],
                    pixels_per_point,
                };
                let view = surface_texture
                    .texture
                    .create_view(&vello::wgpu::TextureViewDescriptor::default());
                let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("panel encoder"),
                });
                self.egui_renderer.update_buffers(
                    device,
                    queue,
                    &mut encoder,
                    &primitives,
                    &screen_descriptor,
                );

                let render_pass = encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                    label: Some("panel render pass"),
                    color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: vello::wgpu::Operations {
                            load: vello::wgpu::LoadOp::Clear(PANEL_CLEAR),
                            store: vello::wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                // egui-wgpu wants a 'static pass.
                let mut render_pass = render_pass.forget_lifetime();
                self.egui_renderer
                    .render(&mut render_pass, &primitives, &screen_descriptor);
                drop(render_pass);

                queue.submit(std::iter::once(encoder.finish()));
                surface_texture.present();
            }
            Err(e) => log::warn!("Failed to get panel surface texture: {e:?}"),
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        if self.egui_ctx.has_requested_repaint() {
            self.window.request_redraw();
        }
        action
    }
}

/// Runtime state for the application.
struct AppState {
    overlay: Overlay,
    panel: Panel,
    canvas: Canvas,
    ui_state: UiState,
}

impl AppState {
    fn overlay_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        gpu: &mut vello::util::RenderContext,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                gpu.resize_surface(&mut self.overlay.surface, size.width, size.height);
                self.overlay.window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.overlay.event_handler.set_scale_factor(scale_factor);
                self.overlay.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.overlay.render(gpu, &self.canvas) {
                    log::warn!("Overlay frame skipped: {e}");
                }
            }
            event => {
                self.overlay.event_handler.handle(&event, &mut self.canvas);
            }
        }
    }

    fn panel_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        gpu: &mut vello::util::RenderContext,
        event: WindowEvent,
    ) {
        let response = self.panel.egui_state.on_window_event(&self.panel.window, &event);
        if response.repaint {
            self.panel.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                gpu.resize_surface(&mut self.panel.surface, size.width, size.height);
                self.panel.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Some(action) = self.panel.render(gpu, &mut self.ui_state) {
                    log::debug!("Panel action {action:?}");
                    if action.apply(&mut self.canvas, &mut self.ui_state) {
                        event_loop.exit();
                    }
                    self.panel.window.request_redraw();
                }
            }
            WindowEvent::ModifiersChanged(_) | WindowEvent::KeyboardInput { .. } => {
                if !response.consumed && !self.panel.egui_ctx.wants_keyboard_input() {
                    self.panel.keys.handle(&event, &mut self.canvas);
                }
            }
            _ => {}
        }
    }

    /// Mirror canvas changes into both windows.
    fn sync(&mut self) {
        let before = self.ui_state.clone();
        self.ui_state.sync(&mut self.canvas);
        if self.ui_state != before {
            self.panel.window.request_redraw();
        }
        if self.canvas.take_repaint() {
            self.overlay.window.request_redraw();
        }
        self.overlay
            .set_passthrough(self.ui_state.desktop_mode || self.ui_state.tool == ToolKind::Cursor);
    }
}

/// Main application.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    gpu: Option<vello::util::RenderContext>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            gpu: None,
        }
    }

    /// Run the application until the overlay or the panel closes.
    pub fn run(config: AppConfig) {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let mut app = App::new(config);
        event_loop.run_app(&mut app).expect("Event loop error");
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> RenderResult<AppState> {
        let overlay_window = create_window(event_loop, overlay_attributes(event_loop))?;
        let panel_window = create_window(event_loop, panel_attributes(&self.config))?;

        let gpu = self.gpu.get_or_insert_with(vello::util::RenderContext::new);
        let overlay = Overlay::new(gpu, overlay_window)?;
        let panel = Panel::new(gpu, panel_window)?;

        let canvas = Canvas::with_session(self.config.session(), self.config.background);
        let ui_state = UiState::from_canvas(&canvas);

        log::info!(
            "InkGlass initialized - {}x{} overlay",
            overlay.surface.config.width,
            overlay.surface.config.height
        );
        overlay.window.request_redraw();
        panel.window.request_redraw();

        Ok(AppState {
            overlay,
            panel,
            canvas,
            ui_state,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Could not start InkGlass: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(state), Some(gpu)) = (self.state.as_mut(), self.gpu.as_mut()) else {
            return;
        };

        if window_id == state.overlay.window.id() {
            state.overlay_event(event_loop, gpu, event);
        } else if window_id == state.panel.window.id() {
            state.panel_event(event_loop, gpu, event);
        }
        state.sync();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            self.config.capture(&state.canvas);
            match state.panel.window.outer_position() {
                Ok(position) => {
                    self.config.toolbar_x = position.x;
                    self.config.toolbar_y = position.y;
                }
                Err(e) => log::debug!("Panel position unavailable: {e}"),
            }
        }
        self.config.save();
    }
}
