//! Console front-end and command loop.
//!
//! Parses line-oriented commands, maintains the current position, routes
//! `go` requests to the selected engine implementation, and prints
//! diagnostics as `info string` lines. This surface only supplies the
//! engine with a board, a depth, and the accelerator toggle, and consumes
//! the chosen column.

use std::io::{self, BufRead, Write};

use crate::board::board_state::Board;
use crate::board::board_types::Player;
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::utils::render_board::render_board;

const CONSOLE_ENGINE_NAME: &str = "Fig Four";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct ConsoleState {
    board: Board,
    engine: Box<dyn Engine>,
    skill_level: u8,
    depth_override: Option<usize>,
    use_accelerator: bool,
}

impl ConsoleState {
    fn new() -> Self {
        let skill_level = 3;
        Self {
            board: Board::new_game(),
            engine: build_engine(skill_level),
            skill_level,
            depth_override: None,
            use_accelerator: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        let mut tokens = trimmed.split_whitespace();
        let command = tokens.next().unwrap_or_default();

        match command {
            "quit" | "exit" => return Ok(true),
            "id" => {
                writeln!(out, "id name {CONSOLE_ENGINE_NAME}")?;
                writeln!(out, "id engine {}", self.engine.name())?;
            }
            "new" => {
                self.board = Board::new_game();
                self.engine.new_game();
                writeln!(out, "info string new game, min to move")?;
            }
            "show" => {
                writeln!(out, "{}", render_board(&self.board))?;
                writeln!(out, "info string position {}", self.board.get_notation())?;
            }
            "position" => {
                let rest: Vec<&str> = tokens.collect();
                if rest.first() == Some(&"start") {
                    self.board = Board::new_game();
                    writeln!(out, "info string position reset")?;
                } else if rest.is_empty() {
                    writeln!(out, "info string error: position needs a notation string")?;
                } else {
                    match Board::from_notation(&rest.join(" ")) {
                        Ok(board) => {
                            self.board = board;
                            writeln!(out, "info string position set")?;
                        }
                        Err(e) => writeln!(out, "info string error: {e:?}")?,
                    }
                }
            }
            "drop" => match tokens.next().map(str::parse::<usize>) {
                Some(Ok(col)) => {
                    let side = self.board.turn;
                    match self.board.drop_piece(col, side) {
                        Ok(next) => {
                            self.board = next;
                            self.report_position(out)?;
                        }
                        Err(e) => writeln!(out, "info string error: {e:?}")?,
                    }
                }
                _ => writeln!(out, "info string error: drop needs a column index")?,
            },
            "go" => {
                let mut params = GoParams {
                    depth: self.depth_override,
                    use_accelerator: self.use_accelerator,
                };
                while let Some(token) = tokens.next() {
                    if token == "depth" {
                        if let Some(Ok(depth)) = tokens.next().map(str::parse::<usize>) {
                            params.depth = Some(depth);
                        }
                    }
                }
                match self.engine.choose_column(&self.board, &params) {
                    Ok(output) => {
                        for info in &output.info_lines {
                            writeln!(out, "{info}")?;
                        }
                        match output.best_column {
                            Some(col) => writeln!(out, "bestmove {col}")?,
                            None => writeln!(out, "bestmove none")?,
                        }
                    }
                    Err(e) => writeln!(out, "info string error: {e}")?,
                }
            }
            "setoption" => {
                // setoption name <Name> value <Value>
                let rest: Vec<&str> = tokens.collect();
                let name_pos = rest.iter().position(|&t| t == "name");
                let value_pos = rest.iter().position(|&t| t == "value");
                match (name_pos, value_pos) {
                    (Some(n), Some(v)) if n + 1 < v && v + 1 <= rest.len() => {
                        let name = rest[n + 1..v].join(" ");
                        let value = rest[v + 1..].join(" ");
                        self.apply_option(&name, &value, out)?;
                    }
                    _ => writeln!(out, "info string error: malformed setoption")?,
                }
            }
            _ => writeln!(out, "info string unknown command: {command}")?,
        }

        Ok(false)
    }

    fn apply_option(
        &mut self,
        name: &str,
        value: &str,
        out: &mut impl Write,
    ) -> io::Result<()> {
        if name.eq_ignore_ascii_case("Skill") {
            match value.parse::<u8>() {
                Ok(level @ 1..=3) => {
                    self.skill_level = level;
                    self.engine = build_engine(level);
                    writeln!(out, "info string engine {}", self.engine.name())?;
                }
                _ => writeln!(out, "info string error: skill must be 1..=3")?,
            }
        } else if name.eq_ignore_ascii_case("Depth") {
            match value.parse::<usize>() {
                Ok(depth) => {
                    self.depth_override = Some(depth);
                    writeln!(out, "info string depth override {depth}")?;
                }
                _ => writeln!(out, "info string error: invalid depth value")?,
            }
        } else if name.eq_ignore_ascii_case("Accelerator") {
            match value {
                "on" | "true" => {
                    self.use_accelerator = true;
                    writeln!(out, "info string accelerator on")?;
                }
                "off" | "false" => {
                    self.use_accelerator = false;
                    writeln!(out, "info string accelerator off")?;
                }
                _ => writeln!(out, "info string error: accelerator must be on or off")?,
            }
        } else {
            // Unrecognized options are forwarded to the engine.
            if let Err(e) = self.engine.set_option(name, value) {
                writeln!(out, "info string error: {e}")?;
            }
        }
        Ok(())
    }

    fn report_position(&self, out: &mut impl Write) -> io::Result<()> {
        match self.board.winner() {
            Some(Player::Max) => writeln!(out, "info string winner max")?,
            Some(Player::Min) => writeln!(out, "info string winner min")?,
            None if self.board.is_full() => writeln!(out, "info string draw, board full")?,
            None => writeln!(out, "info string position {}", self.board.get_notation())?,
        }
        Ok(())
    }
}

fn build_engine(skill_level: u8) -> Box<dyn Engine> {
    match skill_level {
        1 => Box::new(RandomEngine::new()),
        2 => Box::new(GreedyEngine::new()),
        _ => Box::new(MinimaxEngine::new()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(console: &mut ConsoleState, line: &str) -> String {
        let mut out = Vec::new();
        console.handle_command(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn drop_and_go_produce_a_bestmove() {
        let mut console = ConsoleState::new();

        let output = run(&mut console, "drop 3");
        assert!(output.contains("info string position"));

        let output = run(&mut console, "go depth 2");
        assert!(output.contains("bestmove "));
    }

    #[test]
    fn position_round_trips_through_show() {
        let mut console = ConsoleState::new();
        run(
            &mut console,
            "position ......./......./......./......./......./OX.....  x",
        );
        let output = run(&mut console, "show");
        assert!(output.contains("OX..... x"));
    }

    #[test]
    fn winner_is_reported_after_the_final_drop() {
        let mut console = ConsoleState::new();
        run(
            &mut console,
            "position ......./......./......./O....../O....../O...... o",
        );
        let output = run(&mut console, "drop 0");
        assert!(output.contains("winner min"));
    }

    #[test]
    fn unknown_commands_are_reported_not_fatal() {
        let mut console = ConsoleState::new();
        let output = run(&mut console, "frobnicate");
        assert!(output.contains("unknown command"));
        assert!(!run(&mut console, "quit").contains("unknown"));
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut console = ConsoleState::new();
        let mut out = Vec::new();
        assert!(console.handle_command("quit", &mut out).unwrap());
        assert!(!console.handle_command("new", &mut out).unwrap());
    }
}
