//! Crate root module declarations for the Fig Four engine project.
//!
//! This file exposes all top-level subsystems (board model, scoring, search,
//! accelerator protocol, engine strategies, console front-end, and utility
//! helpers) so binaries, tests, and external tooling can import stable
//! module paths.

pub mod errors;
pub mod scoring;

pub mod board {
    pub mod board_state;
    pub mod board_types;
}

pub mod search {
    pub mod batch;
    pub mod minimax;
}

pub mod protocol {
    pub mod accelerator_link;
    pub mod packet;
    pub mod state_machine;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod notation;
    pub mod render_board;
}
