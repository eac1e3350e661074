//! Core engine implementation

use crate::{
    application::Application,
    core::config::EngineConfig,
    foundation::time::Timer,
    scene::Logic,
};
use thiserror::Error;

/// Main engine struct
///
/// Hosts the scene scheduler and drives it once per frame.
#[derive(Debug)]
pub struct Engine {
    /// Scene scheduler
    logic: Logic,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    ///
    /// The configured initial scene is requested here and becomes active at
    /// the first frame.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::ConfigError)?;
        log::info!("Initializing engine...");

        let logic = Logic::with_config(config.scene.clone());
        if let Some(scene) = &config.initial_scene {
            logic.load_empty_scene(scene.clone());
        }
        let timer = config.fixed_delta_time.map_or_else(Timer::new, Timer::fixed);

        Ok(Self {
            logic,
            timer,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Each frame calls [`Application::update`] and then the scheduler. The
    /// loop ends on [`quit`](Self::quit) or once `max_frames` frames ran.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = engine.timer.tick();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            engine.logic.update(delta_time);
            engine.check_frame_limit();
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.2}s)",
            engine.timer.frame_count(),
            engine.timer.total_time()
        );
        Ok(())
    }

    /// Run exactly one frame without an application; returns its delta time
    pub fn tick(&mut self) -> f32 {
        let delta_time = self.timer.tick();
        self.logic.update(delta_time);
        self.check_frame_limit();
        delta_time
    }

    fn check_frame_limit(&mut self) {
        if let Some(max) = self.config.max_frames {
            if self.running && self.timer.frame_count() >= max {
                log::info!("Reached frame limit ({})", max);
                self.running = false;
            }
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop will run another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the scene scheduler
    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    /// Get mutable access to the scene scheduler
    pub fn logic_mut(&mut self) -> &mut Logic {
        &mut self.logic
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Frames started so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::scene::SpawnParams;

    #[derive(Default)]
    struct Recorder {
        updates: u32,
        quit_after: Option<u32>,
        cleaned_up: bool,
    }

    impl Application for Recorder {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            engine.logic().spawn_game_object(SpawnParams::new("player"));
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            if self.quit_after == Some(self.updates) {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, engine: &mut Engine) {
            self.cleaned_up = true;
            assert_eq!(engine.logic_mut().find_game_objects_by_name("player").len(), 1);
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let config = EngineConfig::new().with_max_frames(3).with_fixed_delta_time(0.1);
        let mut app = Recorder::default();
        Engine::run(config, &mut app).unwrap();

        assert_eq!(app.updates, 3);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_quit_ends_loop() {
        let config = EngineConfig::new().with_fixed_delta_time(0.1);
        let mut app = Recorder { quit_after: Some(2), ..Default::default() };
        Engine::run(config, &mut app).unwrap();

        assert_eq!(app.updates, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::new().with_log_level("chatty");
        assert!(matches!(Engine::new(config), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_tick_loads_initial_scene() {
        let config = EngineConfig::new().with_initial_scene("arena").with_fixed_delta_time(0.5);
        let mut engine = Engine::new(config).unwrap();
        assert!(engine.logic().scene().is_none());

        assert_eq!(engine.tick(), 0.5);
        assert_eq!(engine.logic().scene().map(|scene| scene.name()), Some("arena"));
        assert_eq!(engine.frame_count(), 1);
    }

    #[test]
    fn test_application_errors_abort_run() {
        struct Failing;

        impl Application for Failing {
            fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
                Ok(())
            }

            fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
                Err(AppError::GameLogic("boom".to_string()))
            }

            fn cleanup(&mut self, _engine: &mut Engine) {}
        }

        let err = Engine::run(EngineConfig::new().with_fixed_delta_time(0.1), &mut Failing).unwrap_err();
        assert!(matches!(err, EngineError::ApplicationError(message) if message.contains("boom")));
    }
}
