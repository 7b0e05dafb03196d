use anyhow::Result;
use canvas::{Application, EventResponse};
use euclid::default::Size2D;
use graphics::DrawList;
use input::{CursorIcon, KeyboardEvent, MouseEvent};
use renderer::Renderer;
use tracing::{debug, info, trace};

use crate::{config::WindowConfig, timer::Timer};

/// The parts of a native window the frame loop drives.
#[allow(unused_variables)]
pub trait WindowHandle {
    fn set_title(&mut self, title: &str);
    /// Asks the platform to close the window, which later reports back through
    /// [`FrameLoop::on_closed`].
    fn close(&mut self);
    fn set_cursor(&mut self, icon: CursorIcon) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
    Closing,
    /// Terminal, every resource has been released.
    Stopped,
}

/// Runs the update and draw cycle of an [`Application`] against a renderer and a window.
pub struct FrameLoop<R: Renderer, W: WindowHandle> {
    config: WindowConfig,

    renderer: R,
    window: W,
    app: Box<dyn Application>,

    timer: Timer,
    state: LoopState,

    frame_count: u32,
    frame_time_accumulator: f64,
    current_fps: f64,
    frame_delta: f64,

    window_size: Size2D<u32>,
    window_state: WindowState,
    is_resizing: bool,
    is_closed: bool,

    cursor: Option<CursorIcon>,
    disposed: bool,
}

impl<R: Renderer, W: WindowHandle> FrameLoop<R, W> {
    pub fn new(config: WindowConfig, renderer: R, window: W, app: Box<dyn Application>) -> Self {
        Self {
            window_size: config.size(),
            config,

            renderer,
            window,
            app,

            timer: Timer::new(),
            state: LoopState::NotStarted,

            frame_count: 0,
            frame_time_accumulator: 0.,
            current_fps: 0.,
            frame_delta: 0.,

            window_state: WindowState::Normal,
            is_resizing: false,
            is_closed: false,

            cursor: None,
            disposed: false,
        }
    }

    /// Starts measuring time, the first frame measures its delta from here.
    pub fn start(&mut self) {
        if self.state != LoopState::NotStarted {
            return;
        }
        self.timer.start();
        self.state = LoopState::Running;
        self.window.set_title(&self.config.title);
        info!("Frame loop started");
    }

    /// Runs one frame, timed against the wall clock.
    pub fn frame(&mut self) -> Result<()> {
        if self.is_closed {
            return Ok(());
        }
        let delta = self.timer.update();
        self.step(delta)
    }

    /// Runs one frame that took `delta` seconds.
    pub fn step(&mut self, delta: f64) -> Result<()> {
        if self.is_closed || self.state != LoopState::Running {
            return Ok(());
        }
        self.frame_delta = delta;
        self.app.update(delta);
        self.sync_cursor();

        if self.is_resizing {
            trace!("Skipping draw while resizing");
            return Ok(());
        }
        self.draw(delta)
    }

    fn draw(&mut self, delta: f64) -> Result<()> {
        self.frame_count += 1;
        self.frame_time_accumulator += delta;
        if self.frame_time_accumulator >= 1. && self.config.show_fps {
            self.current_fps = f64::from(self.frame_count) / self.frame_time_accumulator;
            let title = self.config.fps_title(self.current_fps);
            self.window.set_title(&title);
            self.frame_count = 0;
            self.frame_time_accumulator = 0.;
        }

        self.renderer.begin_draw()?;
        let mut list = DrawList::new();
        self.app.render(&mut list);
        self.renderer.draw(&list)?;
        self.renderer.end_draw()?;
        self.renderer.present();
        Ok(())
    }

    pub fn on_mouse_event(&mut self, event: MouseEvent) {
        if self.is_closed {
            return;
        }
        let response = self.app.mouse_event(event);
        self.respond(response);
        self.sync_cursor();
    }

    pub fn on_keyboard_event(&mut self, event: KeyboardEvent) {
        if self.is_closed {
            return;
        }
        let response = self.app.keyboard_event(event);
        self.respond(response);
    }

    fn respond(&mut self, response: EventResponse) {
        match response {
            EventResponse::Continue => {}
            EventResponse::Exit => self.exit(),
        }
    }

    fn sync_cursor(&mut self) {
        let icon = self.app.cursor_icon();
        if self.cursor != Some(icon) {
            self.cursor = Some(icon);
            self.window.set_cursor(icon);
        }
    }

    /// An interactive resize started, nothing is drawn until it ends.
    pub fn on_resize_begin(&mut self) {
        self.is_resizing = true;
    }

    pub fn on_resize_end(&mut self, size: Size2D<u32>) -> Result<()> {
        self.is_resizing = false;
        self.recreate(size)
    }

    /// The window was maximized, minimized or restored.
    ///
    /// Nothing is recreated while minimized, there is nothing to draw into.
    pub fn on_resized(&mut self, size: Size2D<u32>, state: WindowState) -> Result<()> {
        let changed = state != self.window_state;
        self.window_state = state;
        if !changed {
            return Ok(());
        }
        if state == WindowState::Minimized {
            debug!("Minimized, keeping the current surface");
            return Ok(());
        }
        self.recreate(size)
    }

    fn recreate(&mut self, size: Size2D<u32>) -> Result<()> {
        debug!("Recreating the surface at {size:?}");
        self.renderer.release_target();
        self.renderer.resize_buffers(size)?;
        self.renderer.recreate_target()?;
        self.window_size = size;
        self.app.resize(size);
        Ok(())
    }

    /// Asks the window to close.
    pub fn exit(&mut self) {
        if self.is_closed {
            return;
        }
        info!("Exit requested");
        self.window.close();
    }

    /// The window is gone, no further frame runs.
    pub fn on_closed(&mut self) {
        self.is_closed = true;
        if self.state != LoopState::Stopped {
            self.state = LoopState::Closing;
        }
    }

    /// Releases the renderer. Only the first call does anything.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.is_closed = true;
        self.renderer.dispose();
        self.state = LoopState::Stopped;
        info!("Frame loop stopped");
    }

    pub const fn state(&self) -> LoopState {
        self.state
    }
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }
    pub const fn frame_time_accumulator(&self) -> f64 {
        self.frame_time_accumulator
    }
    pub const fn current_fps(&self) -> f64 {
        self.current_fps
    }
    /// Duration of the last frame, in seconds.
    pub const fn frame_delta(&self) -> f64 {
        self.frame_delta
    }

    pub const fn window_size(&self) -> Size2D<u32> {
        self.window_size
    }
    pub const fn window_state(&self) -> WindowState {
        self.window_state
    }
    pub const fn is_resizing(&self) -> bool {
        self.is_resizing
    }
    pub const fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub const fn window(&self) -> &W {
        &self.window
    }
}

impl<R: Renderer, W: WindowHandle> Drop for FrameLoop<R, W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use euclid::default::Point2D;
    use input::{Key, MouseButton, SpecialKey};

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeRenderer {
        log: Log,
    }

    impl Renderer for FakeRenderer {
        fn begin_draw(&mut self) -> Result<()> {
            self.log.borrow_mut().push("begin_draw".into());
            Ok(())
        }
        fn draw(&mut self, list: &DrawList) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("draw {}", list.commands().len()));
            Ok(())
        }
        fn end_draw(&mut self) -> Result<()> {
            self.log.borrow_mut().push("end_draw".into());
            Ok(())
        }
        fn present(&mut self) {
            self.log.borrow_mut().push("present".into());
        }
        fn release_target(&mut self) {
            self.log.borrow_mut().push("release_target".into());
        }
        fn resize_buffers(&mut self, size: Size2D<u32>) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("resize_buffers {}x{}", size.width, size.height));
            Ok(())
        }
        fn recreate_target(&mut self) -> Result<()> {
            self.log.borrow_mut().push("recreate_target".into());
            Ok(())
        }
        fn dispose(&mut self) {
            self.log.borrow_mut().push("dispose".into());
        }
    }

    #[derive(Default)]
    struct FakeWindow {
        titles: Rc<RefCell<Vec<String>>>,
        closes: Rc<RefCell<u32>>,
    }

    impl WindowHandle for FakeWindow {
        fn set_title(&mut self, title: &str) {
            self.titles.borrow_mut().push(title.to_string());
        }
        fn close(&mut self) {
            *self.closes.borrow_mut() += 1;
        }
    }

    struct FakeApp {
        log: Log,
    }

    impl Application for FakeApp {
        fn update(&mut self, delta: f64) {
            self.log.borrow_mut().push(format!("update {delta}"));
        }
        fn render(&self, list: &mut DrawList) {
            list.line(
                Point2D::new(0., 0.),
                Point2D::new(1., 1.),
                color::PremulColor::WHITE,
                1.,
            );
        }
        fn mouse_event(&mut self, _event: MouseEvent) -> EventResponse {
            EventResponse::Continue
        }
        fn keyboard_event(&mut self, event: KeyboardEvent) -> EventResponse {
            match event.pressed() {
                Some(Key::SpecialKey(SpecialKey::Escape)) => EventResponse::Exit,
                _ => EventResponse::Continue,
            }
        }
        fn resize(&mut self, size: Size2D<u32>) {
            self.log
                .borrow_mut()
                .push(format!("app resize {}x{}", size.width, size.height));
        }
    }

    struct Harness {
        frame_loop: FrameLoop<FakeRenderer, FakeWindow>,
        log: Log,
        titles: Rc<RefCell<Vec<String>>>,
        closes: Rc<RefCell<u32>>,
    }

    impl Harness {
        fn new(config: WindowConfig) -> Self {
            let log = Log::default();
            let window = FakeWindow::default();
            let titles = window.titles.clone();
            let closes = window.closes.clone();
            let mut frame_loop = FrameLoop::new(
                config,
                FakeRenderer { log: log.clone() },
                window,
                Box::new(FakeApp { log: log.clone() }),
            );
            frame_loop.start();
            Self {
                frame_loop,
                log,
                titles,
                closes,
            }
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    #[test]
    fn a_frame_updates_then_draws_in_order() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness.frame_loop.step(0.5).expect("frame");
        assert_eq!(
            harness.take_log(),
            ["update 0.5", "begin_draw", "draw 1", "end_draw", "present"]
        );
        assert_eq!(harness.frame_loop.frame_delta(), 0.5);
        assert_eq!(harness.frame_loop.state(), LoopState::Running);
    }

    #[test]
    fn fps_is_reported_once_per_second() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        // Exactly representable, so 60 frames add up to exactly one second.
        for _ in 0..59 {
            harness.frame_loop.step(0.015625).expect("frame");
        }
        assert_eq!(harness.frame_loop.frame_count(), 59);
        assert_eq!(*harness.titles.borrow(), ["LineDrawer"]);

        harness.frame_loop.step(0.078125).expect("frame");
        assert_eq!(harness.frame_loop.current_fps(), 60.);
        assert_eq!(harness.frame_loop.frame_count(), 0);
        assert_eq!(harness.frame_loop.frame_time_accumulator(), 0.);
        assert_eq!(
            harness.titles.borrow().last().map(String::as_str),
            Some("LineDrawer - FPS: 60.0")
        );
    }

    #[test]
    fn title_is_left_alone_without_fps_display() {
        let config = WindowConfig {
            show_fps: false,
            ..WindowConfig::line_drawer()
        };
        let mut harness = Harness::new(config);
        harness.frame_loop.step(0.5).expect("frame");
        harness.frame_loop.step(0.5).expect("frame");
        assert_eq!(*harness.titles.borrow(), ["LineDrawer"]);

        // Without the display the counters are never sampled, so they keep accumulating.
        assert_eq!(harness.frame_loop.frame_count(), 2);
        assert_eq!(harness.frame_loop.frame_time_accumulator(), 1.);
        assert_eq!(harness.frame_loop.current_fps(), 0.);
    }

    #[test]
    fn nothing_is_drawn_during_an_interactive_resize() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness.frame_loop.on_resize_begin();
        harness.frame_loop.step(0.25).expect("frame");
        assert_eq!(harness.take_log(), ["update 0.25"]);
        assert_eq!(harness.frame_loop.frame_count(), 0);

        harness
            .frame_loop
            .on_resize_end(Size2D::new(640, 480))
            .expect("resize");
        assert_eq!(
            harness.take_log(),
            [
                "release_target",
                "resize_buffers 640x480",
                "recreate_target",
                "app resize 640x480"
            ]
        );
        assert!(!harness.frame_loop.is_resizing());
        assert_eq!(harness.frame_loop.window_size(), Size2D::new(640, 480));
    }

    #[test]
    fn minimizing_skips_recreation() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness
            .frame_loop
            .on_resized(Size2D::new(0, 0), WindowState::Minimized)
            .expect("resize");
        assert!(harness.take_log().is_empty());
        assert_eq!(harness.frame_loop.window_state(), WindowState::Minimized);

        harness
            .frame_loop
            .on_resized(Size2D::new(1024, 768), WindowState::Normal)
            .expect("resize");
        assert_eq!(
            harness.take_log(),
            [
                "release_target",
                "resize_buffers 1024x768",
                "recreate_target",
                "app resize 1024x768"
            ]
        );
    }

    #[test]
    fn unchanged_state_does_not_recreate() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness
            .frame_loop
            .on_resized(Size2D::new(1024, 768), WindowState::Normal)
            .expect("resize");
        assert!(harness.take_log().is_empty());
    }

    #[test]
    fn escape_closes_the_window_and_stops_frames() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness.frame_loop.on_mouse_event(MouseEvent::press(
            Point2D::new(1., 1.),
            MouseButton::Left,
        ));
        assert_eq!(*harness.closes.borrow(), 0);

        harness
            .frame_loop
            .on_keyboard_event(KeyboardEvent::press(Key::SpecialKey(SpecialKey::Escape)));
        assert_eq!(*harness.closes.borrow(), 1);
        assert!(!harness.frame_loop.is_closed());

        harness.frame_loop.on_closed();
        assert_eq!(harness.frame_loop.state(), LoopState::Closing);
        harness.take_log();
        harness.frame_loop.frame().expect("frame");
        harness.frame_loop.step(0.1).expect("frame");
        assert!(harness.take_log().is_empty());
    }

    #[test]
    fn teardown_disposes_exactly_once() {
        let mut harness = Harness::new(WindowConfig::line_drawer());
        harness.frame_loop.teardown();
        harness.frame_loop.teardown();
        assert_eq!(harness.frame_loop.state(), LoopState::Stopped);

        let log = harness.log.clone();
        drop(harness);
        assert_eq!(
            log.borrow().iter().filter(|call| *call == "dispose").count(),
            1
        );
    }

    #[test]
    fn frames_wait_for_start() {
        let log = Log::default();
        let mut frame_loop = FrameLoop::new(
            WindowConfig::default(),
            FakeRenderer { log: log.clone() },
            FakeWindow::default(),
            Box::new(FakeApp { log: log.clone() }),
        );
        frame_loop.step(0.1).expect("frame");
        assert!(log.borrow().is_empty());
        assert_eq!(frame_loop.state(), LoopState::NotStarted);
    }
}
