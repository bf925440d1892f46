use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use scene_demos::cli::Cli;
use scene_demos::core::runner::SceneRunner;
use scene_demos::render::renderer::Renderer;
use scene_demos::render::texture::TextureStore;
use scene_demos::scenes;
use scene_demos::settings::Settings;
use scene_demos::traits::controller::{Button, Controller};

struct App {
    runner: SceneRunner,
    textures: TextureStore,
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
}

impl App {
    fn new(runner: SceneRunner, textures: TextureStore, size: (u32, u32)) -> Self {
        let title = runner.scene().name().to_string();
        Self {
            runner,
            textures,
            title,
            size,
            window: None,
            renderer: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.runner.advance();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let camera = self.runner.scene().camera();
        let lighting = self.runner.scene().lighting();
        if let Err(err) = renderer.render(self.runner.draw_list(), &camera, &lighting) {
            log::error!("render failed: {err:#}");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.size.0, self.size.1));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("window creation failed: {err}");
                event_loop.exit();
                return;
            }
        };

        match Renderer::new(window.clone()) {
            Ok(mut renderer) => {
                renderer.upload_textures(&self.textures);
                let size = window.inner_size();
                self.runner.set_viewport(size.width, size.height);
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("renderer setup failed: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.runner.set_viewport(size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                let controller = self.runner.controller_mut();
                controller.process_event(&other);
                if controller.is_down(Button::Escape) {
                    event_loop.exit();
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

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.rows.is_some() {
        settings.rows = cli.rows;
    }

    let scene = scenes::create_scene(cli.scene, settings.rows, settings.spin_rate);
    let mut textures = TextureStore::new();
    let mut runner = SceneRunner::new(scene, (settings.width, settings.height));
    runner.init(&mut textures)?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(runner, textures, (settings.width, settings.height));
    event_loop.run_app(&mut app).context("running event loop")?;
    Ok(())
}
