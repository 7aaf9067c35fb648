//! Windowed animation loop.
//!
//! Drives the backdrop from winit events: cursor movement retargets the
//! camera and each redraw advances the animation by exactly one step.
//! Closing the window (or pressing Escape) tears the backdrop down before
//! the loop exits, so no callback can run against dead state.

use std::sync::Arc;

use anyhow::Result;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::Window,
};

use crate::backdrop::Backdrop;
use crate::config::BackdropConfig;
use crate::content;
use crate::gpu::context::GpuContext;
use crate::gpu::renderer::Renderer;

/// Open a window and run the backdrop until it is closed.
pub fn run(config: BackdropConfig, width: u32, height: u32) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = BackdropApp::new(config, width, height);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.init_error.take() {
        return Err(err);
    }
    Ok(())
}

struct BackdropApp {
    config: BackdropConfig,
    initial_size: (u32, u32),
    window: Option<Arc<Window>>,
    ctx: Option<GpuContext>,
    renderer: Option<Renderer>,
    backdrop: Option<Backdrop>,
    init_error: Option<anyhow::Error>,
}

impl BackdropApp {
    fn new(config: BackdropConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            initial_size: (width, height),
            window: None,
            ctx: None,
            renderer: None,
            backdrop: None,
            init_error: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.teardown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let attributes = Window::default_attributes()
            .with_title(content::NAME)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.init_error = Some(err.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let ctx = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(ctx) => ctx,
            Err(err) => {
                self.init_error = Some(err);
                event_loop.exit();
                return;
            }
        };

        let backdrop = Backdrop::new(self.config, ctx.config.width, ctx.config.height);
        let renderer = Renderer::new(
            ctx.device.clone(),
            ctx.queue.clone(),
            ctx.surface_format(),
            &backdrop,
        );

        log::info!(
            "backdrop running: {} particles at {}x{}",
            backdrop.field().len(),
            ctx.config.width,
            ctx.config.height
        );

        self.backdrop = Some(backdrop);
        self.renderer = Some(renderer);
        self.ctx = Some(ctx);
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.on_pointer_move(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::Resized(size) => {
                if let (Some(ctx), Some(backdrop)) = (&mut self.ctx, &mut self.backdrop) {
                    ctx.resize(size.width, size.height);
                    backdrop.on_resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                {
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(ctx), Some(renderer), Some(backdrop)) =
            (&mut self.ctx, &mut self.renderer, &mut self.backdrop)
        else {
            return;
        };

        if !backdrop.step() {
            return;
        }

        let frame = match ctx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                ctx.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, shutting down");
                self.shutdown(event_loop);
                return;
            }
            Err(err) => {
                log::warn!("dropped frame: {:?}", err);
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(&view, backdrop);
        frame.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
