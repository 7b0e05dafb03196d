use std::sync::Arc;

use anyhow::{Context, Result};
use canvas::{DrawingApp, SurfaceRenderer};
use euclid::default::{Point2D, Size2D};
use input::{CursorIcon, MouseEvent};
use renderer::State;
use tracing::{debug, error, info, instrument, trace};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::ModifiersState,
    window::{Window, WindowId},
};

use crate::{
    config::WindowConfig,
    frame_loop::{FrameLoop, WindowHandle, WindowState},
};

/// A winit window as seen by the frame loop.
pub struct WinitWindow {
    window: Arc<Window>,
    close_requested: bool,
}

impl WinitWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            close_requested: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub const fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn window_state(&self) -> WindowState {
        if self.window.is_minimized().unwrap_or(false) {
            WindowState::Minimized
        } else if self.window.is_maximized() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }
}

impl WindowHandle for WinitWindow {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn close(&mut self) {
        self.close_requested = true;
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        self.window.set_cursor(input::winit::cursor_icon(icon));
    }
}

type DesktopLoop = FrameLoop<SurfaceRenderer, WinitWindow>;

/// Owns the window once the platform lets us create one, and feeds its events to the frame loop.
pub struct DesktopApp {
    config: WindowConfig,
    runtime: tokio::runtime::Runtime,

    frame_loop: Option<DesktopLoop>,
    cursor_position: Point2D<f32>,
    modifiers: ModifiersState,

    error: Option<anyhow::Error>,
}

impl DesktopApp {
    pub fn new(config: WindowConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build the async runtime")?;
        Ok(Self {
            config,
            runtime,

            frame_loop: None,
            cursor_position: Point2D::zero(),
            modifiers: ModifiersState::empty(),

            error: None,
        })
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    #[instrument(skip_all)]
    fn create_frame_loop(&self, event_loop: &ActiveEventLoop) -> Result<DesktopLoop> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create the window")?,
        );
        let size = window.inner_size();
        info!("Created a {}x{} window", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create a surface for the window")?;
        let state = self
            .runtime
            .block_on(State::init(instance, Some(&surface)))?;

        let size = Size2D::new(size.width, size.height);
        let renderer = SurfaceRenderer::new(state, surface, size, self.config.vsync)?;
        let app = DrawingApp::new(size);

        let mut frame_loop = FrameLoop::new(
            self.config.clone(),
            renderer,
            WinitWindow::new(window),
            Box::new(app),
        );
        frame_loop.start();
        Ok(frame_loop)
    }

    fn handle_window_event(&mut self, event: WindowEvent) -> Result<()> {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            return Ok(());
        };
        match event {
            WindowEvent::RedrawRequested => frame_loop.frame()?,
            WindowEvent::Resized(size) => {
                let size = Size2D::new(size.width, size.height);
                let state = frame_loop.window().window_state();
                if state == frame_loop.window_state() {
                    // Synthetic begin/end pair, winit reports no interactive resize bounds.
                    frame_loop.on_resize_begin();
                    frame_loop.on_resize_end(size)?;
                } else {
                    frame_loop.on_resized(size, state)?;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = Point2D::new(position.x as f32, position.y as f32);
                frame_loop.on_mouse_event(MouseEvent::motion(self.cursor_position));
            }
            WindowEvent::CursorEntered { .. } => {
                frame_loop.on_mouse_event(MouseEvent::enter(self.cursor_position));
            }
            WindowEvent::CursorLeft { .. } => {
                frame_loop.on_mouse_event(MouseEvent::leave(self.cursor_position));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = input::winit::mouse_button(button);
                let event = match state {
                    ElementState::Pressed => MouseEvent::press(self.cursor_position, button),
                    ElementState::Released => MouseEvent::release(self.cursor_position, button),
                };
                frame_loop.on_mouse_event(event);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                frame_loop.on_keyboard_event(input::winit::modifiers_changed(self.modifiers));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                frame_loop.on_keyboard_event(input::winit::keyboard_event(&event, self.modifiers));
            }
            WindowEvent::CloseRequested => {
                debug!("The window manager asked to close the window");
                frame_loop.exit();
            }
            _ => trace!("Ignoring {event:?}"),
        }
        Ok(())
    }

    /// Tears the frame loop down once its window asked to close.
    fn close_if_requested(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            return;
        };
        if frame_loop.window().close_requested() {
            frame_loop.on_closed();
            frame_loop.teardown();
            self.frame_loop = None;
            event_loop.exit();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        error!("{error:#}");
        self.error = Some(error);
        if let Some(frame_loop) = self.frame_loop.as_mut() {
            frame_loop.on_closed();
            frame_loop.teardown();
        }
        self.frame_loop = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.is_some() {
            return;
        }
        match self.create_frame_loop(event_loop) {
            Ok(frame_loop) => {
                event_loop.set_control_flow(ControlFlow::Poll);
                self.frame_loop = Some(frame_loop);
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self
            .frame_loop
            .as_ref()
            .is_none_or(|frame_loop| frame_loop.window().id() != window_id)
        {
            return;
        }
        if let Err(error) = self.handle_window_event(event) {
            self.fail(event_loop, error);
            return;
        }
        self.close_if_requested(event_loop);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(frame_loop) = self.frame_loop.as_ref() {
            frame_loop.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.on_closed();
            frame_loop.teardown();
        }
    }
}
