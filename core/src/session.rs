//! The session record and its reducer. Every user gesture and every solver
//! response arrives as a [`Command`]; `apply` mutates the record and returns
//! the effects the shell must run (render, ticker control, gateway calls,
//! notices). Overlapping solve/generate exchanges are not interlocked:
//! whichever response resolves last overwrites the loaded solution, even if
//! it was issued first. Known limitation.

use std::collections::BTreeSet;

use crate::action::{Command, Effect, SolveOrigin};
use crate::board::{BoardState, Cell};
use crate::editor::EditorBuffer;
use crate::playback::{speed_display_label, speed_interval_ms, Playback};
use crate::protocol::{GatewayError, SolveReply};
use crate::solution::{Solution, NO_SOLUTION_NOTICE};
use crate::target::{resolve_targets, visited_targets, TargetMode};

#[derive(Clone, Debug)]
pub struct Session {
    pub solution: Option<Solution>,
    pub playback: Playback,
    pub target_mode: TargetMode,
    pub custom_targets: String,
    pub editor: Option<EditorBuffer>,
    pub busy: bool,
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    pub board: BoardState,
    pub targets: BTreeSet<usize>,
    pub visited: BTreeSet<usize>,
    pub step: usize,
    pub last_step: usize,
    pub move_count: usize,
    pub solve_time_ms: f64,
    pub playing: bool,
    pub speed_ms: u32,
    pub edit_mode: bool,
    pub selected: Cell,
    pub target_mode: TargetMode,
    pub custom_targets: String,
    pub busy: bool,
    pub progress_percent: f32,
    pub step_label: String,
    pub speed_label: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            solution: None,
            playback: Playback::new(),
            target_mode: TargetMode::Corners,
            custom_targets: String::new(),
            editor: None,
            busy: false,
        }
    }

    // The editor buffer and the solution are mutually exclusive sources of
    // the displayed board; the editor wins while it exists.
    pub fn displayed_board(&self) -> BoardState {
        if let Some(editor) = &self.editor {
            return editor.board;
        }
        match &self.solution {
            Some(solution) => solution
                .board_at(self.playback.step)
                .copied()
                .unwrap_or_else(BoardState::empty),
            None => BoardState::empty(),
        }
    }

    pub fn targets(&self) -> BTreeSet<usize> {
        resolve_targets(self.target_mode, &self.custom_targets)
    }

    pub fn snapshot(&self) -> Snapshot {
        let targets = self.targets();
        let (last_step, move_count, solve_time_ms, visited) = match &self.solution {
            Some(solution) => (
                solution.last_step(),
                solution.move_count,
                solution.solve_time_ms,
                visited_targets(&solution.path, self.playback.step, &targets),
            ),
            None => (0, 0, 0.0, BTreeSet::new()),
        };
        let step = self.playback.step;
        let progress_percent = if last_step > 0 {
            step as f32 / last_step as f32 * 100.0
        } else {
            100.0
        };
        Snapshot {
            board: self.displayed_board(),
            targets,
            visited,
            step,
            last_step,
            move_count,
            solve_time_ms,
            playing: self.playback.playing,
            speed_ms: self.playback.speed_ms,
            edit_mode: self.editor.is_some(),
            selected: self.editor.as_ref().and_then(|editor| editor.selected),
            target_mode: self.target_mode,
            custom_targets: self.custom_targets.clone(),
            busy: self.busy,
            progress_percent,
            step_label: format!("{step} / {last_step}"),
            speed_label: speed_display_label(self.playback.speed_ms),
        }
    }

    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Next => match &self.solution {
                Some(solution) if self.playback.step < solution.last_step() => {
                    self.go_to(self.playback.step + 1)
                }
                _ => Vec::new(),
            },
            Command::Previous => {
                if self.playback.step > 0 {
                    self.go_to(self.playback.step - 1)
                } else {
                    Vec::new()
                }
            }
            Command::GoTo(step) => self.go_to(step),
            Command::GoToFirst => self.go_to(0),
            Command::GoToLast => match &self.solution {
                Some(solution) => self.go_to(solution.last_step()),
                None => Vec::new(),
            },
            Command::TogglePlay => {
                if self.playback.playing {
                    self.stop()
                } else {
                    self.start()
                }
            }
            Command::Tick => self.tick(),
            Command::SetSpeed { position } => {
                self.playback.speed_ms = speed_interval_ms(position);
                if self.playback.playing {
                    vec![
                        Effect::StopTicker,
                        Effect::StartTicker {
                            interval_ms: self.playback.speed_ms,
                        },
                        Effect::Render,
                    ]
                } else {
                    vec![Effect::Render]
                }
            }
            Command::EnterEdit => self.enter_edit(),
            Command::ExitEdit => self.exit_edit(),
            Command::ToggleEdit => {
                if self.editor.is_some() {
                    self.exit_edit()
                } else {
                    self.enter_edit()
                }
            }
            Command::SetCell { position } => match self.editor.as_mut() {
                Some(editor) => {
                    if editor.set_cell(position) {
                        vec![Effect::Render]
                    } else {
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            },
            Command::ClearBoard => match self.editor.as_mut() {
                Some(editor) => {
                    editor.clear();
                    vec![Effect::Render]
                }
                None => Vec::new(),
            },
            Command::SelectPiece(cell) => match self.editor.as_mut() {
                Some(editor) => {
                    editor.select(cell);
                    vec![Effect::Render]
                }
                None => Vec::new(),
            },
            Command::SetTargetMode(mode) => {
                self.target_mode = mode;
                self.solve_displayed()
            }
            Command::SetCustomTargets(text) => {
                self.custom_targets = text;
                self.solve_displayed()
            }
            Command::RequestSolve => self.solve_displayed(),
            Command::RequestGenerate => {
                self.busy = true;
                self.playback.playing = false;
                vec![Effect::StopTicker, Effect::Generate, Effect::Render]
            }
            Command::GenerateFinished(result) => self.finish_generate(result),
            Command::SolveFinished {
                origin,
                submitted,
                result,
            } => self.finish_solve(origin, submitted, result),
        }
    }

    fn go_to(&mut self, step: usize) -> Vec<Effect> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        if step > solution.last_step() {
            return Vec::new();
        }
        self.playback.step = step;
        vec![Effect::Render]
    }

    fn start(&mut self) -> Vec<Effect> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        if self.playback.step >= solution.last_step() {
            return Vec::new();
        }
        self.playback.playing = true;
        vec![
            Effect::StartTicker {
                interval_ms: self.playback.speed_ms,
            },
            Effect::Render,
        ]
    }

    fn stop(&mut self) -> Vec<Effect> {
        self.playback.playing = false;
        vec![Effect::StopTicker, Effect::Render]
    }

    fn tick(&mut self) -> Vec<Effect> {
        if !self.playback.playing {
            // A tick that raced a cancellation carries no work.
            return Vec::new();
        }
        let Some(solution) = &self.solution else {
            return self.stop();
        };
        if self.playback.step < solution.last_step() {
            self.playback.step += 1;
            vec![Effect::Render]
        } else {
            self.stop()
        }
    }

    fn enter_edit(&mut self) -> Vec<Effect> {
        self.playback.playing = false;
        self.editor = Some(EditorBuffer::enter(self.displayed_board()));
        vec![Effect::StopTicker, Effect::Render]
    }

    fn exit_edit(&mut self) -> Vec<Effect> {
        if self.editor.take().is_none() {
            return Vec::new();
        }
        vec![Effect::Render]
    }

    fn solve_displayed(&mut self) -> Vec<Effect> {
        let board = self.displayed_board();
        self.busy = true;
        self.playback.playing = false;
        vec![
            Effect::StopTicker,
            Effect::Solve {
                board,
                targets: self.targets().into_iter().collect(),
                origin: SolveOrigin::UserBoard,
            },
            Effect::Render,
        ]
    }

    fn finish_generate(&mut self, result: Result<BoardState, GatewayError>) -> Vec<Effect> {
        match result {
            Ok(board) => vec![Effect::Solve {
                board,
                targets: self.targets().into_iter().collect(),
                origin: SolveOrigin::Generated,
            }],
            Err(error) => {
                self.busy = false;
                vec![
                    Effect::Notice {
                        message: format!("Failed to generate/solve: {error}"),
                    },
                    Effect::Render,
                ]
            }
        }
    }

    fn finish_solve(
        &mut self,
        origin: SolveOrigin,
        submitted: BoardState,
        result: Result<SolveReply, GatewayError>,
    ) -> Vec<Effect> {
        // Every completion path clears the in-progress indicator.
        self.busy = false;
        match result {
            Ok(reply) => {
                let (solution, surface_empty) = Solution::from_reply(&submitted, reply);
                self.solution = Some(solution);
                self.playback.step = 0;
                if origin == SolveOrigin::UserBoard {
                    self.editor = None;
                }
                let mut effects = Vec::new();
                if surface_empty {
                    effects.push(Effect::Notice {
                        message: NO_SOLUTION_NOTICE.to_string(),
                    });
                }
                effects.push(Effect::Render);
                effects
            }
            Err(error) => vec![
                Effect::Notice {
                    message: format!("Failed to solve: {error}"),
                },
                Effect::Render,
            ],
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
