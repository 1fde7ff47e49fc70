//! Marble Maze entry point
//!
//! Headless native driver. Builds a level and plays it with a simulated tilt
//! sensor that leans toward the goal with some noise, running the simulation
//! at a fixed step behind jittery frame times.
//!
//! Usage: `marble-maze [settings.json] [level] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use marble_maze::consts::{DEFAULT_GRAVITY_Y, MAX_SUBSTEPS};
    use marble_maze::renderer::ShapeBatch;
    use marble_maze::sim::{
        GamePhase, GameSession, HitOutcome, SimError, TickInput, WorldObject, tick,
    };
    use marble_maze::{Settings, gravity_from_accelerometer};

    const CANVAS_WIDTH: f32 = 1080.0;
    const CANVAS_HEIGHT: f32 = 1920.0;
    const DEFAULT_SETTINGS_PATH: &str = "marble_maze.json";
    const DEFAULT_SEED: u64 = 0x6d61_7a65;
    /// Give up after this much simulated time
    const MAX_SECONDS: f32 = 120.0;
    /// Attempts before giving up on a level
    const MAX_ATTEMPTS: u32 = 5;

    /// Fake accelerometer: leans the device toward a target with noise
    struct TiltSensor {
        rng: Pcg32,
        /// Fraction of full gravity used for the lean
        lean: f32,
        noise: f32,
    }

    impl TiltSensor {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                lean: 0.3,
                noise: 2.0,
            }
        }

        /// Raw sensor axes that tilt the marble from `from` toward `to`
        fn read(&mut self, from: Vec2, to: Vec2) -> (f32, f32) {
            let dir = (to - from).normalize_or_zero() * DEFAULT_GRAVITY_Y * self.lean;
            let jitter = Vec2::new(
                self.rng.random_range(-self.noise..=self.noise),
                self.rng.random_range(-self.noise..=self.noise),
            );
            let g = dir + jitter;
            // Inverse of gravity_from_accelerometer
            (-g.x, g.y)
        }

        /// Frame time of a display that mostly hits 60 Hz
        fn frame_time(&mut self) -> f32 {
            self.rng.random_range(0.012..0.03)
        }
    }

    struct Game {
        session: GameSession,
        sensor: TiltSensor,
        dt: f32,
        accumulator: f32,
    }

    impl Game {
        /// Run one display frame. Returns the last terminal outcome, if any.
        fn update(&mut self, frame_dt: f32) -> Result<Option<HitOutcome>, SimError> {
            let frame_dt = frame_dt.min(0.1);
            self.accumulator += frame_dt;

            let goal = self
                .session
                .board()
                .objects()
                .iter()
                .find_map(|o| match o {
                    WorldObject::Goal(c) => Some(c.center()),
                    _ => None,
                })
                .unwrap_or(Vec2::ZERO);

            let mut substeps = 0;
            while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
                let (ax, ay) = self.sensor.read(self.session.marble().pos(), goal);
                let input = TickInput {
                    gravity: gravity_from_accelerometer(ax, ay),
                    ..Default::default()
                };
                let outcome = tick(&mut self.session, &input, self.dt)?;
                self.accumulator -= self.dt;
                substeps += 1;

                if outcome.is_terminal() {
                    self.accumulator = 0.0;
                    return Ok(Some(outcome));
                }
            }
            Ok(None)
        }
    }

    fn load_settings(path: &str) -> Settings {
        match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                Settings::default()
            }
        }
    }

    pub fn run() -> Result<(), SimError> {
        let mut args = std::env::args().skip(1);
        let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
        let settings = load_settings(&settings_path);
        let level = args
            .next()
            .and_then(|a| a.parse().ok())
            .unwrap_or(settings.start_level);
        let seed = args
            .next()
            .and_then(|a| a.parse().ok())
            .unwrap_or(DEFAULT_SEED);

        log::info!("Marble Maze (headless) starting: level {}, seed {}", level, seed);

        let session = GameSession::new(level, CANVAS_WIDTH, CANVAS_HEIGHT, &settings)?;
        let mut batch = ShapeBatch::new(settings.style.circle_segments);
        session.draw(&mut batch, &settings.style);
        log::info!(
            "Level {} tessellates to {} triangles ({} bytes)",
            session.level_id(),
            batch.triangle_count(),
            batch.as_bytes().len()
        );

        let mut game = Game {
            session,
            sensor: TiltSensor::new(seed),
            dt: settings.dt(),
            accumulator: 0.0,
        };

        for attempt in 1..=MAX_ATTEMPTS {
            let mut elapsed = 0.0;
            while elapsed < MAX_SECONDS {
                let frame_dt = game.sensor.frame_time();
                elapsed += frame_dt;
                if let Some(outcome) = game.update(frame_dt)? {
                    log::info!(
                        "Attempt {}: {:?} after {:.1}s, marble at {:?}",
                        attempt,
                        outcome,
                        elapsed,
                        game.session.marble().pos()
                    );
                    break;
                }
            }

            match game.session.phase() {
                GamePhase::Won => {
                    log::info!(
                        "Level {} cleared on attempt {} ({} ticks, {} bounces)",
                        game.session.level_id(),
                        attempt,
                        game.session.ticks,
                        game.session.bounces
                    );
                    return Ok(());
                }
                GamePhase::Lost => {}
                phase => log::warn!("Attempt {} timed out while {:?}", attempt, phase),
            }
            game.session.restart()?;
        }

        log::warn!(
            "Gave up on level {} after {} attempts",
            game.session.level_id(),
            MAX_ATTEMPTS
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on the web
}
