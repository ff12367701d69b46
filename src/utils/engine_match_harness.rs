//! Minimal head-to-head engine match harness for local testing.
//!
//! This module runs two `Engine` implementations against each other without
//! console I/O, with an optional seeded random opening prefix. Player 1
//! always takes the `Min` side (the side that opens the game).

use rand::{rngs::StdRng, RngExt, SeedableRng};
use std::time::Instant;

use crate::board::board_state::Board;
use crate::board::board_types::Player;
use crate::engines::engine_trait::{Engine, GoParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A side completed a four-run.
    WinByConnect { player: PlayerId, side: Player },
    /// The board filled with no run.
    DrawFullBoard,
    /// The ply budget ran out first.
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 60,
            opening_min_plies: 2,
            opening_max_plies: 6,
            go_params: GoParams {
                depth: Some(4),
                use_accelerator: false,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub plies: u16,
    pub final_board: Board,
    pub elapsed_ms: u64,
}

/// Play one game between two engines from a seeded random opening.
///
/// The opening prefix drops `opening_min_plies..=opening_max_plies` pieces
/// at random (alternating sides) before the engines take over, so repeated
/// series do not replay one deterministic game.
pub fn play_match<'a>(
    player1: &'a mut dyn Engine,
    player2: &'a mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchReport, String> {
    let started = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut board = Board::new_game();
    let mut plies: u16 = 0;

    let opening_plies = if config.opening_max_plies >= config.opening_min_plies {
        rng.random_range(config.opening_min_plies..=config.opening_max_plies)
    } else {
        config.opening_min_plies
    };
    for _ in 0..opening_plies {
        if board.is_terminal() {
            break;
        }
        let legal = board.legal_columns();
        let col = legal[rng.random_range(0..legal.len())];
        let side = board.turn;
        board = board.drop_piece(col, side).map_err(|e| format!("{e:?}"))?;
        plies += 1;
    }

    player1.new_game();
    player2.new_game();

    while !board.is_terminal() && plies < config.max_plies {
        let side = board.turn;
        let engine = match side {
            Player::Min => &mut *player1,
            Player::Max => &mut *player2,
        };
        let out = engine.choose_column(&board, &config.go_params)?;
        let col = out
            .best_column
            .ok_or_else(|| format!("{} returned no column", engine.name()))?;
        board = board.drop_piece(col, side).map_err(|e| format!("{e:?}"))?;
        plies += 1;
    }

    let outcome = match board.winner() {
        Some(Player::Min) => MatchOutcome::WinByConnect {
            player: PlayerId::Player1,
            side: Player::Min,
        },
        Some(Player::Max) => MatchOutcome::WinByConnect {
            player: PlayerId::Player2,
            side: Player::Max,
        },
        None => {
            if board.is_full() {
                MatchOutcome::DrawFullBoard
            } else {
                MatchOutcome::DrawMaxPlies
            }
        }
    };

    Ok(MatchReport {
        outcome,
        plies,
        final_board: board,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u32,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
    pub total_plies: u64,
    pub outcomes: Vec<MatchOutcome>,
}

impl SeriesStats {
    pub fn report(&self) -> String {
        format!(
            "series: p1 {} wins, p2 {} wins, {} draws, {:.1} plies/game",
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.total_plies as f64 / self.outcomes.len().max(1) as f64,
        )
    }
}

/// Play a series of seeded games, building both engines fresh per game.
pub fn play_engine_match_series<F1, F2>(
    player1: F1,
    player2: F2,
    config: MatchSeriesConfig,
) -> Result<SeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = SeriesStats::default();

    for game in 0..config.games {
        let mut p1 = player1();
        let mut p2 = player2();
        let seed = config.base_seed.wrapping_add(game as u64);
        let report = play_match(&mut *p1, &mut *p2, seed, &config.per_game)?;

        match report.outcome {
            MatchOutcome::WinByConnect {
                player: PlayerId::Player1,
                ..
            } => stats.player1_wins += 1,
            MatchOutcome::WinByConnect {
                player: PlayerId::Player2,
                ..
            } => stats.player2_wins += 1,
            MatchOutcome::DrawFullBoard | MatchOutcome::DrawMaxPlies => stats.draws += 1,
        }
        stats.total_plies += u64::from(report.plies);
        stats.outcomes.push(report.outcome);

        if config.verbose {
            println!(
                "game {} seed {}: {:?} in {} plies ({} ms)",
                game, seed, report.outcome, report.plies, report.elapsed_ms
            );
        }
    }

    Ok(stats)
}
