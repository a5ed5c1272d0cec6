//! The windowed page: winit event loop, frame driving and rendering.
//!
//! Contact submissions go to a [`SubmitWorker`] thread and come back on a
//! later frame. Clicked links open in the system browser.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::assets::{AssetStore, ImageAsset};
use crate::config::FolioConfig;
use crate::contact::{FormClient, SubmitWorker};
use crate::content::Content;
use crate::error::{ContactError, RunError};
use crate::gpu::{Renderer, Scene};
use crate::input::{Input, KeyCode};
use crate::page::{Outbound, Page};
use crate::scheduler::FrameScheduler;
use crate::time::FrameClock;
use crate::viewport::Viewport;

/// Frames between FPS log lines.
const FPS_LOG_FRAMES: u64 = 600;

/// Open the portfolio window and run until it is closed.
pub fn run(config: FolioConfig) -> Result<(), RunError> {
    let content = Content::load_or_embedded(config.content.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, content);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub struct App {
    config: FolioConfig,
    page: Page,
    assets: AssetStore,
    input: Input,
    viewport: Viewport,
    clock: FrameClock,
    scene: Scene,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scheduler: Option<FrameScheduler<Arc<Window>>>,
    worker: Option<SubmitWorker>,
    pointer_cursor: bool,
    title: String,
    error: Option<RunError>,
}

impl App {
    pub fn new(config: FolioConfig, content: Content) -> Self {
        let viewport = Viewport::new(config.window.width, config.window.height);
        let page = Page::new(content, &config, viewport.size());
        let assets = AssetStore::new(&config.assets);
        let worker = match SubmitWorker::spawn(FormClient::new(&config.contact)) {
            Ok(worker) => Some(worker),
            Err(err) => {
                tracing::error!(error = %err, "contact worker did not start");
                None
            }
        };
        Self {
            page,
            assets,
            input: Input::new(),
            viewport,
            clock: FrameClock::new(),
            scene: Scene::default(),
            window: None,
            renderer: None,
            scheduler: None,
            worker,
            pointer_cursor: false,
            title: String::new(),
            error: None,
            config,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        tracing::error!(error = %err, "cannot start the page");
        self.error = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scheduler) = &mut self.scheduler {
            scheduler.cancel();
        }
        event_loop.exit();
    }

    /// Hand finished and new contact submissions between page and worker.
    fn pump_contact(&mut self) {
        if let Some(result) = self.worker.as_mut().and_then(SubmitWorker::poll) {
            self.page.finish_submission(result);
        }
        let Some(submission) = self.page.take_submission() else {
            return;
        };
        let sent = match &mut self.worker {
            Some(worker) => worker.send(submission),
            None => Err(ContactError::Transport("contact worker not running".into())),
        };
        if let Err(err) = sent {
            self.page.finish_submission(Err(err));
        }
    }

    fn open_outbound(&mut self) {
        for link in self.page.take_outbound() {
            let opened = match &link {
                Outbound::Url(url) => open::that_detached(url),
                Outbound::Asset(path) => open::that_detached(self.assets.resolve(path)),
            };
            match opened {
                Ok(()) => tracing::info!(?link, "opened link"),
                Err(err) => tracing::warn!(?link, error = %err, "cannot open link"),
            }
        }
    }

    fn update_cursor(&mut self) {
        let hovering = self.page.is_hovering_target();
        if hovering == self.pointer_cursor {
            return;
        }
        self.pointer_cursor = hovering;
        if let Some(window) = &self.window {
            window.set_cursor(if hovering { CursorIcon::Pointer } else { CursorIcon::Default });
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(scheduler), Some(renderer)) = (&mut self.scheduler, &mut self.renderer) else {
            return;
        };
        if !scheduler.on_frame() {
            return;
        }

        if let Some((width, height)) = self.viewport.take_resize() {
            renderer.resize(width, height);
            self.page.resize(self.viewport.size());
        }

        let dt = self.clock.tick_now();
        if self.clock.frame() % FPS_LOG_FRAMES == 0 {
            tracing::debug!(fps = self.clock.fps(), frame = self.clock.frame(), "frame rate");
        }
        self.page.update(dt, &self.input);
        self.input.end_frame();
        self.pump_contact();
        self.open_outbound();
        self.update_cursor();

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        self.page.build(&mut self.scene, &mut self.assets);

        for draw in &self.scene.images {
            if renderer.has_image(&draw.key) {
                continue;
            }
            if let ImageAsset::Decoded(image) = self.assets.image(&draw.key) {
                renderer.upload_image(&draw.key, image);
            }
        }

        match renderer.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory");
                self.shutdown(event_loop);
                return;
            }
            Err(e) => tracing::error!(error = ?e, "render error"),
        }

        let title = format!("{} | {}", self.config.window.title, self.page.title_line());
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }

        if let Some(scheduler) = &mut self.scheduler {
            scheduler.request();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => renderer,
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let size = window.inner_size();
        self.viewport.resize(size.width, size.height);

        let mut scheduler = FrameScheduler::new(window.clone());
        scheduler.request();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.scheduler = Some(scheduler);
        self.clock = FrameClock::new();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if self.viewport.resize(size.width, size.height) {
                    tracing::debug!(width = size.width, height = size.height, "viewport resized");
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }

        // Escape leaves a focused contact field before it closes the window
        if self.input.key_pressed(KeyCode::Escape) && self.page.focus().is_none() {
            self.shutdown(event_loop);
        }
    }
}
