use anyhow::Result;
use clap::Parser;
use glam::Vec3;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use terrain_nav::cli::Cli;
use terrain_nav::demo;
use terrain_nav::input::WinitInputAdapter;
use terrain_nav::timer::{Clock, Throttled};
use terrain_nav::{
    Camera, FirstPersonControls, NavControls, NavSettings, OrbitControls, SceneContext,
};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

// === Constants ===

const POSE_LOG_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

// === Application ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Walk,
    Orbit,
}

/// Frames the whole collision set from the south at a comfortable height
fn overview_pose(scene: &SceneContext) -> (Vec3, Vec3) {
    let (center, extent) = match scene.collision_bounds() {
        Some(bounds) => {
            let center = (bounds.min + bounds.max) * 0.5;
            let extent = (bounds.max - bounds.min).truncate().length().max(10.0);
            (Vec3::new(center.x, center.y, 0.0), extent)
        }
        None => (Vec3::ZERO, 40.0),
    };
    (center + Vec3::new(0.0, -extent, extent * 0.9), center)
}

struct App {
    window: Option<Arc<Window>>,
    scene: Rc<SceneContext>,
    settings: NavSettings,
    walk: FirstPersonControls,
    orbit: OrbitControls,
    mode: Mode,
    adapter: WinitInputAdapter,
    clock: Clock,
    pose_log: Throttled,
    // Set from inside the descent animation's completion callback, consumed
    // on the next frame
    walk_pending: Rc<Cell<bool>>,
}

impl App {
    fn new(cli: &Cli, settings: NavSettings) -> Self {
        let scene = demo::build_scene(&cli.scene);

        let (ground, look) = demo::start_pose(&cli.scene);
        let stand = ground + Vec3::Z * settings.first_person.person_height;
        let walk_camera = Camera::new(
            stand - look * settings.first_person.camera_offset,
            stand,
        );

        let (view_position, view_target) = overview_pose(&scene);
        let orbit_camera = Camera::new(view_position, view_target);

        let mut walk = FirstPersonControls::new(walk_camera, settings.first_person.clone());
        let mut orbit = OrbitControls::new(orbit_camera, settings.orbit.clone());

        let mode = if cli.orbit {
            orbit.connect(Rc::clone(&scene));
            orbit.set_view(view_position, view_target);
            Mode::Orbit
        } else {
            walk.connect(Rc::clone(&scene));
            walk.set_view(stand, look, None);
            Mode::Walk
        };

        Self {
            window: None,
            scene,
            settings,
            walk,
            orbit,
            mode,
            adapter: WinitInputAdapter::new(),
            clock: Clock::new(),
            pose_log: Throttled::new(POSE_LOG_INTERVAL),
            walk_pending: Rc::new(Cell::new(false)),
        }
    }

    fn active_controls(&mut self) -> &mut dyn NavControls {
        match self.mode {
            Mode::Walk => &mut self.walk,
            Mode::Orbit => &mut self.orbit,
        }
    }

    fn switch_mode(&mut self) {
        match self.mode {
            Mode::Walk => self.begin_ascent(),
            Mode::Orbit => self.begin_descent(),
        }
    }

    /// Hand the camera from the walk pose to the orbit controller, then
    /// glide out to the overview framing
    fn begin_ascent(&mut self) {
        let position = self.walk.camera().position;
        let stand = self.walk.target();
        self.walk.disconnect();

        self.orbit.connect(Rc::clone(&self.scene));
        self.orbit.set_view(position, stand);

        let (view_position, view_target) = overview_pose(&self.scene);
        self.orbit.animate_to(view_position, view_target, 0.0, None);
        self.mode = Mode::Orbit;
        log::info!("orbit controls active");
    }

    /// Glide the orbit camera down to eye level over its current target; the
    /// walk controller takes over when the animation completes
    fn begin_descent(&mut self) {
        self.walk_pending.set(false);

        let target = self.orbit.target();
        let ground = self
            .scene
            .terrain_height_at(target.truncate())
            .unwrap_or(0.0);
        let stand = Vec3::new(
            target.x,
            target.y,
            ground + self.settings.first_person.person_height,
        );

        let mut look = self.orbit.camera().forward();
        look.z = 0.0;
        let look = look.normalize_or_zero();
        let look = if look == Vec3::ZERO { Vec3::Y } else { look };

        let eye = stand - look * self.settings.first_person.camera_offset;
        let azimuth = (-look.x).atan2(look.y);

        let pending = Rc::clone(&self.walk_pending);
        self.orbit.animate_to(
            eye,
            stand,
            azimuth,
            Some(Box::new(move || pending.set(true))),
        );
    }

    fn finish_descent(&mut self) {
        let stand = self.orbit.target();
        let look = self.orbit.camera().forward();
        self.orbit.disconnect();

        self.walk.connect(Rc::clone(&self.scene));
        self.walk.set_view(stand, look, None);
        self.mode = Mode::Walk;
        log::info!("first-person controls active");
    }

    fn step(&mut self, delta: f32) {
        self.active_controls().tick(delta);
        if self.walk_pending.take() {
            self.finish_descent();
        }
        self.log_pose(delta);
    }

    fn log_pose(&mut self, delta: f32) {
        if !self.pose_log.try_tick(delta) {
            return;
        }
        let controls = self.active_controls();
        let kind = controls.kind();
        let position = controls.camera().position;
        let target = controls.camera().look_target;
        log::info!(
            "{:?} camera at ({:.1}, {:.1}, {:.1}) looking at ({:.1}, {:.1}, {:.1})",
            kind,
            position.x,
            position.y,
            position.z,
            target.x,
            target.y,
            target.z
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("terrain-nav")
            .with_inner_size(winit::dpi::LogicalSize::new(
                INITIAL_WINDOW_WIDTH,
                INITIAL_WINDOW_HEIGHT,
            ));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                self.scene
                    .set_viewport_height(window.inner_size().height as f32);
                self.clock.reset();
                self.window = Some(window);
            }
            Err(err) => {
                eprintln!("Failed to create window: {err}");
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
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyV),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.switch_mode();
            }
            WindowEvent::Resized(size) => {
                self.scene.set_viewport_height(size.height as f32);
            }
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();
                self.step(delta);
            }
            event => {
                if let Some(input) = self.adapter.process_event(&event) {
                    self.active_controls().handle_event(&input);
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
    env_logger::init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => NavSettings::load(path)?,
        None => NavSettings::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli, settings);

    println!("Controls: drag or arrow keys to move, right-drag to look around,");
    println!("scroll to zoom (orbit), PageUp/PageDown for height, V to switch modes, Esc to quit");

    event_loop.run_app(&mut app)?;
    Ok(())
}
