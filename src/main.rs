//! Particle Field
//!
//! Animated background of drifting, fading particles linked by faint lines,
//! drawn into a desktop window.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use field_input::PointerTracker;
use particle_field::config::AppConfig;
use particle_field::input::{InputAction, InputMapper};
use particle_field::systems::{
    logical_size, RenderError, RenderSystem, SimulationSystem, WindowFrameScheduler, WindowSystem,
};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: Option<SimulationSystem>,
    pointer: PointerTracker,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            render: None,
            simulation: None,
            pointer: PointerTracker::new(),
        }
    }

    /// Create window, GPU context and simulation on first resume
    fn create_systems(&mut self, event_loop: &ActiveEventLoop) {
        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.background_color,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialize GPU: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.pointer.set_scale_factor(window.scale_factor());
        let (width, height) = window.logical_size();
        self.pointer.set_surface_size(width, height);
        let simulation = SimulationSystem::new(
            self.config.to_field_config(),
            self.config.to_render_config(),
            self.config.field.seed,
            window.logical_size(),
            WindowFrameScheduler::new(window.window().clone()),
        );

        self.window = Some(window);
        self.render = Some(render);
        self.simulation = Some(simulation);
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => self.shutdown(event_loop),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::TogglePause => {
                if let Some(simulation) = &mut self.simulation {
                    simulation.toggle_pause();
                }
                self.refresh_title();
                // Repaint once so the paused title and last frame are shown
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            InputAction::Reseed => {
                if let Some(simulation) = &mut self.simulation {
                    simulation.reseed();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(simulation), Some(render)) = (&mut self.simulation, &mut self.render) else {
            return;
        };

        let ticked = simulation.frame().is_some();
        let Some(canvas) = simulation.canvas() else {
            return;
        };

        match render.present(canvas) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfiguring");
                render.recover();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                self.shutdown(event_loop);
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        if ticked {
            self.refresh_title();
        }
    }

    fn refresh_title(&self) {
        if !self.config.debug.show_stats {
            return;
        }
        if let (Some(window), Some(simulation)) = (&self.window, &self.simulation) {
            window.update_title(
                simulation.particle_count(),
                simulation.fps(),
                simulation.is_paused(),
            );
        }
    }

    /// Stop the frame loop before leaving the event loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(simulation) = &mut self.simulation {
            simulation.stop();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.create_systems(event_loop);
        }
        if let Some(simulation) = &mut self.simulation {
            if simulation.start() {
                log::info!("Particle field running with {} particles", simulation.particle_count());
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(simulation) = &mut self.simulation {
            simulation.stop();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                let (width, height) = logical_size(physical_size, self.pointer.scale_factor());
                self.pointer.set_surface_size(width, height);
                if let Some(simulation) = &mut self.simulation {
                    simulation.on_resize(width, height);
                }
                log::info!("Resized to {}x{} ({}x{} logical)",
                    physical_size.width, physical_size.height, width, height);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.pointer.set_scale_factor(scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let Some(point) = self.pointer.process_cursor_moved(position) else {
                    return;
                };
                if let Some(simulation) = &mut self.simulation {
                    if simulation.on_pointer_move(point.x, point.y) {
                        log::trace!("Injected particle at ({:.1}, {:.1})", point.x, point.y);
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Particle Field");

    // Frames are driven by redraw requests from the simulation
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
