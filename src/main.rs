//! Star Scroll entry point
//!
//! Runs a scripted session against the headless collaborators: an autopilot
//! chases stars, opens and closes the letter once the scroll unlocks, and
//! presses retry on the game-over screen.
//!
//! Usage: `star-scroll [settings.json] [max-frames]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use star_scroll::consts::FRAME_MS;
    use star_scroll::platform::headless::{HeadlessPhysics, RecordingRenderer, SceneQueue};
    use star_scroll::sim::{KeyboardState, PointerEvent, RevealState};
    use star_scroll::{GameOverScreen, Host, Level, Physics, SceneKey, Settings};

    /// Frames the autopilot keeps the letter open
    const READ_FRAMES: u64 = 90;
    /// Level restarts before the session ends
    const MAX_RUNS: u32 = 2;

    enum ActiveScene {
        Level(Box<Level>),
        GameOver(GameOverScreen),
    }

    /// Session holding the collaborators and the active scene
    struct Session {
        settings: Settings,
        physics: HeadlessPhysics,
        render: RecordingRenderer,
        scenes: SceneQueue,
        scene: ActiveScene,
        runs: u32,
        // Autopilot bookkeeping
        letter_opened_at: Option<u64>,
        letter_read: bool,
    }

    impl Session {
        fn new(settings: Settings) -> Self {
            let mut physics = HeadlessPhysics::new(settings.world_size, settings.gravity);
            let mut render = RecordingRenderer::new();
            let mut scenes = SceneQueue::new();
            let level = Level::on_enter(settings.clone(), &mut Host::new(&mut physics, &mut render, &mut scenes));
            Self {
                settings,
                physics,
                render,
                scenes,
                scene: ActiveScene::Level(Box::new(level)),
                runs: 1,
                letter_opened_at: None,
                letter_read: false,
            }
        }

        /// Run one frame of the active scene
        fn frame(&mut self) {
            match &mut self.scene {
                ActiveScene::Level(level) => {
                    let (keys, pointer) = autopilot(
                        level,
                        &self.physics,
                        &mut self.letter_opened_at,
                        &mut self.letter_read,
                    );
                    {
                        let mut host = Host::new(&mut self.physics, &mut self.render, &mut self.scenes);
                        for event in pointer {
                            level.on_pointer(event, &mut host);
                        }
                        level.on_frame(FRAME_MS, keys, &mut host);
                    }

                    let contacts = self.physics.step(FRAME_MS as f32 / 1000.0);
                    let mut host = Host::new(&mut self.physics, &mut self.render, &mut self.scenes);
                    for contact in contacts {
                        level.on_contact(contact, &mut host);
                    }
                }
                ActiveScene::GameOver(screen) => {
                    let pos = screen.retry_center();
                    let mut host = Host::new(&mut self.physics, &mut self.render, &mut self.scenes);
                    screen.on_pointer(PointerEvent::Move { pos }, &mut host);
                    screen.on_pointer(PointerEvent::Down { pos, time_ms: 0 }, &mut host);
                }
            }

            for key in self.scenes.take() {
                self.switch(key);
            }
        }

        /// Tear down the active scene and enter `key` with fresh collaborators
        fn switch(&mut self, key: SceneKey) {
            if let ActiveScene::Level(level) = &mut self.scene {
                let score = level.score().score;
                level.on_exit();
                log::info!("Run {} ended with {} points", self.runs, score);
            }

            self.physics = HeadlessPhysics::new(self.settings.world_size, self.settings.gravity);
            self.render = RecordingRenderer::new();
            let mut host = Host::new(&mut self.physics, &mut self.render, &mut self.scenes);

            self.scene = match key {
                SceneKey::Game => {
                    self.runs += 1;
                    self.letter_opened_at = None;
                    self.letter_read = false;
                    ActiveScene::Level(Box::new(Level::on_enter(self.settings.clone(), &mut host)))
                }
                SceneKey::GameOver => ActiveScene::GameOver(GameOverScreen::on_enter(self.settings.world_size, &mut host)),
            };
        }

        fn finished(&self) -> bool {
            self.runs > MAX_RUNS
        }
    }

    /// Scripted player: open the letter once it unlocks, otherwise chase the
    /// nearest star.
    fn autopilot(
        level: &Level,
        physics: &HeadlessPhysics,
        letter_opened_at: &mut Option<u64>,
        letter_read: &mut bool,
    ) -> (KeyboardState, Vec<PointerEvent>) {
        if level.game_over_pending() {
            return (KeyboardState::default(), Vec::new());
        }

        let frame = level.frames();
        let now = level.now_ms();
        let layout = &level.settings().reveal;

        match level.reveal_state() {
            RevealState::Unlocked if !*letter_read && letter_opened_at.is_none() => {
                *letter_opened_at = Some(frame);
                let pos = layout.marker_pos;
                return (KeyboardState::default(), vec![PointerEvent::Down { pos, time_ms: now }]);
            }
            RevealState::DetailShown => {
                if letter_opened_at.is_some_and(|at| frame >= at + READ_FRAMES) {
                    *letter_read = true;
                    let pos = layout.detail_pos;
                    return (KeyboardState::default(), vec![PointerEvent::Down { pos, time_ms: now }]);
                }
                return (KeyboardState::default(), Vec::new());
            }
            _ => {}
        }

        let Some(player) = physics.position(level.player().id()) else {
            return (KeyboardState::default(), Vec::new());
        };
        let target = level
            .pickups()
            .iter()
            .filter(|p| p.active)
            .filter_map(|p| physics.position(p.id))
            .min_by(|a, b| {
                a.distance(player)
                    .partial_cmp(&b.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut keys = KeyboardState::default();
        if let Some(target) = target {
            let dx = target.x - player.x;
            keys.left = dx < -4.0;
            keys.right = dx > 4.0;
            keys.up = target.y < player.y - 40.0 && dx.abs() < 80.0;
        }
        (keys, Vec::new())
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Star Scroll (headless) starting...");

        let mut args = std::env::args().skip(1);
        let settings_path = args.next().map(PathBuf::from);
        let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5);

        let settings = Settings::load(settings_path.as_deref());
        let mut session = Session::new(settings);

        for _ in 0..max_frames {
            session.frame();
            if session.finished() {
                break;
            }
        }

        if let ActiveScene::Level(level) = &session.scene {
            let score = level.score();
            log::info!(
                "Stopped in run {}: score {}, {} stars collected, scroll {:?}, {} bombs",
                session.runs,
                score.score,
                score.collected,
                level.reveal_state(),
                level.hazards().hazards().len()
            );
        }
        log::info!("Score text: {:?}", session_score_text(&session));
    }

    fn session_score_text(session: &Session) -> Option<String> {
        match &session.scene {
            ActiveScene::Level(level) => session.render.text(level.score_text()).map(str::to_string),
            ActiveScene::GameOver(_) => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

// wasm32 builds the library only; the headless driver needs env_logger
#[cfg(target_arch = "wasm32")]
fn main() {}
