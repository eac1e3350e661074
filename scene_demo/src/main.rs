//! Headless scene demo
//!
//! Builds a small sun/planet/moon hierarchy, spins it for a fixed number of
//! frames and toggles the planet subtree halfway through. Pass a `.toml` or
//! `.ron` engine config as the first argument to override the defaults.

use scene_engine::prelude::*;

/// Rotates its object around the y axis
struct Spin {
    radians_per_second: f32,
}

impl Component for Spin {
    fn on_start(&mut self, ctx: &mut ComponentContext<'_>) {
        log::debug!("Spin started on {}", ctx.object());
    }

    fn on_update(&mut self, ctx: &mut ComponentContext<'_>) {
        let angle = self.radians_per_second * ctx.delta_time();
        ctx.transform_mut().rotate(Quat::from_axis_angle(&Vec3::y_axis(), angle));
    }
}

#[derive(Default)]
struct SolarSystemApp {
    planet: Option<GameObjectId>,
    frames: u64,
}

impl SolarSystemApp {
    const TOGGLE_OFF_FRAME: u64 = 60;
    const TOGGLE_ON_FRAME: u64 = 90;
}

impl Application for SolarSystemApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building solar system...");
        let logic = engine.logic_mut();

        let sun = logic.spawn_game_object(SpawnParams::new("Sun"));
        let planet = logic.spawn_game_object(
            SpawnParams::new("Planet")
                .with_parent(sun)
                .with_position(Vec3::new(5.0, 0.0, 0.0)),
        );
        let moon = logic.spawn_game_object(
            SpawnParams::new("Moon")
                .with_parent(planet)
                .with_position(Vec3::new(1.5, 0.0, 0.0))
                .with_scale(Vec3::new(0.25, 0.25, 0.25)),
        );

        for (id, speed) in [(sun, 0.2), (planet, 1.0)] {
            logic
                .configure_pending(id, |object| object.add_component("spin", Spin { radians_per_second: speed }))
                .ok_or_else(|| AppError::Custom(format!("{} is not pending", id)))??;
        }

        for i in 0..4 {
            logic.spawn_game_object(SpawnParams::new("Skybox beach").with_enabled(i == 0));
        }

        logic.add_listener(ExecutionOrder::AfterUpdate, move |scene: &mut Scene, _: f32| {
            if let Some(world) = scene.world_transform(moon) {
                log::trace!("Moon at {:?}", world.position);
            }
        });

        self.planet = Some(planet);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;
        let Some(planet) = self.planet else {
            return Ok(());
        };

        match self.frames {
            2 => {
                let skyboxes = engine.logic_mut().find_game_objects_by_name("Skybox beach");
                log::info!("Found {} skybox objects", skyboxes.len());
            }
            Self::TOGGLE_OFF_FRAME => {
                log::info!("Disabling planet subtree");
                engine.logic().set_game_object_enabled(planet, false, true);
            }
            Self::TOGGLE_ON_FRAME => {
                log::info!("Enabling planet subtree");
                engine.logic().set_game_object_enabled(planet, true, true);
            }
            _ => {}
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let Some(scene) = engine.logic().scene() else {
            log::warn!("No scene was loaded");
            return;
        };

        log::info!("Scene '{}' holds {} objects", scene.name(), scene.object_count());
        if let Some(world) = self.planet.and_then(|planet| scene.world_transform(planet)) {
            log::info!("Planet ended at {:?}", world.position);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::new()
            .with_initial_scene("solar system")
            .with_max_frames(120)
            .with_fixed_delta_time(1.0 / 60.0),
    };

    env_logger::Builder::from_default_env()
        .filter_level(config.level_filter()?)
        .init();

    log::info!("Starting scene demo");

    let mut app = SolarSystemApp::default();
    Engine::run(config, &mut app)?;

    log::info!("Scene demo finished after {} frames", app.frames);
    Ok(())
}
