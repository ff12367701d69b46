//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`

use fig_four::engines::engine_greedy::GreedyEngine;
use fig_four::engines::engine_minimax::MinimaxEngine;
use fig_four::engines::engine_trait::{Engine, GoParams};
use fig_four::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Customize these two lines to experiment with different engines/depths.
    let player1 = || Box::new(GreedyEngine::new()) as Box<dyn Engine>;
    let player2 = || Box::new(MinimaxEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 60,
                opening_min_plies: 2,
                opening_max_plies: 6,
                go_params: GoParams {
                    depth: Some(4),
                    use_accelerator: false,
                },
            },
            verbose,
        },
    )?;

    println!(
        "report generated {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
