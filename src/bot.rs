// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot ties the HTTP endpoints to the decision engine.

use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine;
use crate::policy::RandomTieBreaker;
use crate::types::{Battlesnake, Board, Direction, Game};

/// Move sent when the request carries nothing to decide from
pub const NO_DECISION_MOVE: Direction = Direction::Up;

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `logger` - Per-turn JSONL logger (may be disabled)
    pub fn new(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: Option<&Board>, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: Option<&Board>, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on the blocking pool and is bounded by the response
    /// budget. If it overruns, a survival move based only on breathing room is
    /// sent instead.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: Option<&Board>,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        info!("Turn {}: Computing move", turn);

        // Clone data needed for the blocking task
        let board_owned = board.cloned();
        let you_owned = you.clone();
        let config = self.config.clone();

        let task = tokio::task::spawn_blocking(move || {
            engine::decide(board_owned.as_ref(), &you_owned, &config, &mut RandomTieBreaker)
        });

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let decision = match tokio::time::timeout(budget, task).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                error!("Turn {}: decision task failed: {}", turn, e);
                engine::survival_move(board, you)
            }
            Err(_) => {
                warn!(
                    "Turn {}: decision exceeded {}ms budget, using survival move",
                    turn,
                    budget.as_millis()
                );
                engine::survival_move(board, you)
            }
        };

        let chosen_move = decision.unwrap_or_else(|| {
            warn!(
                "Turn {}: no board to decide from, sending {}",
                turn,
                NO_DECISION_MOVE.as_str()
            );
            NO_DECISION_MOVE
        });

        info!(
            "Turn {}: Chose {} (time: {}ms)",
            turn,
            chosen_move.as_str(),
            start_time.elapsed().as_millis()
        );

        if self.logger.is_enabled() {
            self.logger
                .log_move(*turn, board.cloned(), you.clone(), chosen_move);
        }

        json!({ "move": chosen_move.as_str() })
    }
}
