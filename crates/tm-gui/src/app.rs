//! Application state: the running game plus what the screen needs between frames.

use std::path::PathBuf;

use clap::Parser;
use macroquad::prelude::*;
use tm_core::{PoiTypeTable, loader};
use tm_engine::{Game, GameConfig, Notice, Snapshot};
use tracing::warn;

use crate::input::{self, Held, KeyboardController};

/// How long a notice stays on screen, in seconds.
const NOTICE_TTL: f64 = 3.0;
/// At most this many notices are shown at once.
const MAX_NOTICES: usize = 4;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "tarmac-gui", version, about = "Explore the festival grounds")]
pub struct Args {
    /// Tiled JSON map
    #[arg(short, long, default_value = "assets/map.json")]
    pub map: PathBuf,

    /// Dialogue JSON
    #[arg(short, long, default_value = "assets/dialogue.json")]
    pub dialogue: PathBuf,

    /// Game configuration JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A notice with the time it disappears.
#[derive(Debug, Clone)]
pub struct ShownNotice {
    /// The message.
    pub notice: Notice,
    /// Expiry time in seconds.
    pub until: f64,
}

/// Shared state for the render loop.
pub struct AppState {
    /// The running game.
    pub game: Game,
    /// Latest engine view.
    pub snapshot: Snapshot,
    /// Notices still on screen, oldest first.
    pub notices: Vec<ShownNotice>,
    /// Whether the app should quit.
    pub should_quit: bool,
    controller: KeyboardController,
    last_mouse: Option<(f32, f32)>,
}

impl AppState {
    /// Load content per `args`. Broken asset files fall back to the built-in content.
    pub fn load(args: &Args) -> Self {
        let config = match &args.config {
            Some(path) => GameConfig::from_json_file(path).unwrap_or_else(|e| {
                warn!(error = %e, "using default configuration");
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };
        let goal = config.goal_location.clone();
        let map = loader::load_zone_map_or_fallback(&args.map, &PoiTypeTable::default(), &goal);
        let graph = loader::load_dialogue_or_fallback(&args.dialogue, &goal);
        Self::new(Game::new(config, map, graph))
    }

    /// Wrap an already built game.
    pub fn new(game: Game) -> Self {
        let snapshot = game.snapshot(0.0);
        Self {
            game,
            snapshot,
            notices: Vec::new(),
            should_quit: false,
            controller: KeyboardController::new(),
            last_mouse: None,
        }
    }

    /// Size of the map canvas.
    pub fn canvas(&self) -> (f32, f32) {
        let config = self.game.config();
        (config.width, config.height)
    }

    /// Read input, advance the game to `now`, and collect notices.
    pub fn update(&mut self, now: f64) {
        if is_key_pressed(KeyCode::Escape) {
            self.should_quit = true;
            return;
        }
        if is_key_pressed(KeyCode::R) {
            self.game.restart();
            self.controller.reset();
            self.notices.clear();
        }

        for event in self.controller.samples(Held::read(), now) {
            self.game.push(event);
        }
        for event in input::mouse_events(self.canvas(), &mut self.last_mouse) {
            self.game.push(event);
        }
        if let Some(event) = input::controller_click(now) {
            self.game.push(event);
        }

        self.snapshot = self.game.tick(now);
        self.notices.extend(self.game.drain_notices().into_iter().map(|notice| ShownNotice {
            notice,
            until: now + NOTICE_TTL,
        }));
        self.notices.retain(|n| n.until > now);
        let overflow = self.notices.len().saturating_sub(MAX_NOTICES);
        self.notices.drain(..overflow);
    }
}
