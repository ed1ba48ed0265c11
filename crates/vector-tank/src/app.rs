//! Window and frame loop via winit.
//!
//! [`TankDemo`] implements [`winit::application::ApplicationHandler`]. Key
//! events only touch the live [`Input`] set; all simulation happens on
//! `RedrawRequested`, strictly after the frame's events:
//!
//! ```text
//!  KeyboardInput ... KeyboardInput   RedrawRequested
//!        │                 │               │
//!        ▼                 ▼               ▼
//!     Input::press / release        Time::update
//!                                   InputState::capture  (snapshot)
//!                                   quit? → exit
//!                                   Tank::update(dt, &snapshot)
//!                                   LineBatch / TextBatch rebuilt
//!                                   Renderer::render_frame
//!                                   Input::clear_just
//!                                   request_redraw
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::config::DemoConfig;
use crate::error::{Error, Result};
use crate::input::{Input, InputState, KeyBindings, KeyCode};
use crate::math::Vec2;
use crate::object::{GameObject, TextureId};
use crate::overlay::{display_transform_matrix, draw_global_axes};
use crate::render::{GpuContext, Renderer, fit_viewplane};
use crate::render2d::{GlyphAtlas, LineBatch, TextBatch};
use crate::tank::Tank;
use crate::time::Time;

/// The demo state that winit drives.
pub struct TankDemo {
    config: DemoConfig,
    bindings: KeyBindings,
    keys: Input<KeyCode>,
    time: Time,
    tank: Tank,
    lines: LineBatch,
    text: TextBatch,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    error: Option<Error>,
}

impl TankDemo {
    pub fn new(config: DemoConfig) -> Self {
        let tank = Tank::from_pose(config.tank, TextureId(0));
        Self {
            config,
            bindings: KeyBindings::default(),
            keys: Input::new(),
            time: Time::new(),
            tank,
            lines: LineBatch::new(),
            text: TextBatch::new(),
            window: None,
            renderer: None,
            error: None,
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn lines(&self) -> &LineBatch {
        &self.lines
    }

    pub fn text(&self) -> &TextBatch {
        &self.text
    }

    /// Advance one frame: snapshot input, update the tank, and rebuild the
    /// draw batches for a `viewplane`-sized view. Returns `false` once quit
    /// has been requested, in which case nothing is updated.
    pub fn step(&mut self, dt: f32, viewplane: Vec2) -> bool {
        let input = InputState::capture(&self.keys, &self.bindings);
        if input.quit {
            log::info!(
                "Quit requested after {} frames ({:.1}s), exiting.",
                self.time.frame_count(),
                self.time.elapsed_secs()
            );
            return false;
        }

        GameObject::update(&mut self.tank, dt, &input);

        self.lines.clear();
        if self.config.show_global_axes {
            draw_global_axes(&mut self.lines, viewplane);
        }
        GameObject::render(&self.tank, &mut self.lines);

        self.text.clear();
        display_transform_matrix(&mut self.text, &self.tank);
        true
    }

    /// Drops held keys when the window loses focus.
    pub fn focus_changed(&mut self, focused: bool) {
        if !focused {
            log::debug!("Focus lost, releasing held keys.");
            self.keys.release_all();
        }
    }

    /// Current viewplane after fitting to the window's aspect ratio.
    fn viewplane(&self) -> Vec2 {
        match &self.renderer {
            Some(renderer) => {
                let (w, h) = renderer.surface_size();
                fit_viewplane(self.config.viewplane, w, h)
            }
            None => self.config.viewplane,
        }
    }

    fn load_font(&self) -> Option<GlyphAtlas> {
        let Some(font) = self.config.font.as_ref().filter(|f| !f.path.as_os_str().is_empty())
        else {
            log::warn!("No overlay font configured; matrix readout disabled.");
            return None;
        };
        match GlyphAtlas::load(&font.path, font.size) {
            Ok(atlas) => Some(atlas),
            Err(e) => {
                log::warn!("{e}. Matrix readout disabled.");
                None
            }
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);
        log::info!("Window created: {}", self.config.title);

        let gpu = GpuContext::new(window.clone())?;
        let atlas = self.load_font();
        self.renderer = Some(Renderer::new(gpu, atlas, self.config.clear_color()));
        self.window = Some(window);
        self.time.reset_frame();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.time.update();
        let viewplane = self.viewplane();
        let running = self.step(self.time.delta_secs(), viewplane);
        self.keys.clear_just();
        if !running {
            event_loop.exit();
            return;
        }

        if let Some(renderer) = &mut self.renderer {
            match renderer.render_frame(viewplane, &self.lines, &self.text) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = renderer.surface_size();
                    renderer.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory!");
                    event_loop.exit();
                    return;
                }
                Err(e) => {
                    log::warn!("Surface error: {e:?}");
                }
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for TankDemo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_graphics(event_loop) {
                self.fail(event_loop, e);
                return;
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::Focused(focused) => self.focus_changed(focused),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.keys.press(key_code),
                        ElementState::Released => self.keys.release(key_code),
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Open the window and run until the user quits. This blocks.
pub fn run(config: DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = TankDemo::new(config);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Pose;

    fn demo() -> TankDemo {
        TankDemo::new(DemoConfig::default())
    }

    #[test]
    fn tank_starts_at_configured_pose() {
        let config = DemoConfig {
            tank: Pose::new(Vec2::new(1.0, 2.0), 0.5, Vec2::ONE),
            ..DemoConfig::default()
        };
        let app = TankDemo::new(config);
        assert_eq!(app.tank().position(), Vec2::new(1.0, 2.0));
        assert_eq!(app.tank().orientation(), 0.5);
    }

    #[test]
    fn held_key_drives_the_tank() {
        let mut app = demo();
        app.keys.press(KeyCode::KeyW);
        assert!(app.step(1.0, Vec2::splat(5.0)));
        assert!(app.tank().position().abs_diff_eq(Vec2::new(0.5, 0.0), 1e-5));

        app.keys.release(KeyCode::KeyW);
        app.keys.clear_just();
        assert!(app.step(1.0, Vec2::splat(5.0)));
        assert!(app.tank().position().abs_diff_eq(Vec2::new(0.5, 0.0), 1e-5));
    }

    #[test]
    fn losing_focus_stops_a_held_key() {
        let mut app = demo();
        app.keys.press(KeyCode::KeyW);
        assert!(app.step(1.0, Vec2::splat(5.0)));
        app.keys.clear_just();

        app.focus_changed(false);
        assert!(app.step(1.0, Vec2::splat(5.0)));
        assert!(app.tank().position().abs_diff_eq(Vec2::new(0.5, 0.0), 1e-5));
    }

    #[test]
    fn escape_stops_before_updating() {
        let mut app = demo();
        app.keys.press(KeyCode::KeyW);
        app.keys.press(KeyCode::Escape);
        assert!(!app.step(1.0, Vec2::splat(5.0)));
        assert_eq!(app.tank().position(), Vec2::ZERO);
    }

    #[test]
    fn step_rebuilds_batches_each_frame() {
        let mut app = demo();
        app.step(0.016, Vec2::splat(5.0));
        let first = app.lines().segment_count();
        assert!(first > 9, "axes plus tank, got {first}");
        assert_eq!(app.text().runs().len(), 17);

        app.step(0.016, Vec2::splat(5.0));
        assert_eq!(app.lines().segment_count(), first);
        assert_eq!(app.text().runs().len(), 17);
    }

    #[test]
    fn hidden_axes_leave_only_the_tank() {
        let config = DemoConfig {
            show_global_axes: false,
            ..DemoConfig::default()
        };
        let mut app = TankDemo::new(config);
        app.step(0.0, Vec2::splat(5.0));
        assert_eq!(app.lines().segment_count(), 9);
    }

    #[test]
    fn custom_bindings_apply() {
        let bindings = KeyBindings {
            rotate_left: KeyCode::ArrowLeft,
            ..KeyBindings::default()
        };
        let mut app = demo().with_bindings(bindings);
        app.keys.press(KeyCode::ArrowLeft);
        app.step(1.0, Vec2::splat(5.0));
        assert!((app.tank().orientation() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
