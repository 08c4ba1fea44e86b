use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    /// The sequence is being shown, input is ignored.
    Playing,
    AwaitingInput,
    /// The whole sequence was repeated, the next round starts after a short delay.
    RoundComplete,
    GameOver,
}

impl Phase {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// The memory-sequence game state machine.
///
/// All timing goes through a [`Scheduler`]: the engine schedules
/// [`Continuation`]s and expects them back through [`resume`](Self::resume).
/// Every continuation carries the epoch it was created under, and the epoch
/// moves on each new game and each new round, so continuations left over from
/// an abandoned round are dropped without touching any state.
#[derive(Clone, Debug)]
pub struct GameEngine<G = RandomSequenceGenerator> {
    config: GameConfig,
    generator: G,
    sequence: Vec<CellIndex>,
    user_input: Vec<CellIndex>,
    playback: Playback,
    playback_cursor: usize,
    level: usize,
    score: Saturating<u32>,
    phase: Phase,
    highlighted: Option<CellIndex>,
    epoch: Epoch,
}

impl GameEngine<RandomSequenceGenerator> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomSequenceGenerator::new(seed))
    }
}

impl<G> GameEngine<G> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn accepts_input(&self) -> bool {
        self.phase.accepts_input()
    }

    pub fn score(&self) -> u32 {
        self.score.0
    }

    /// Zero-based difficulty level.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_spec(&self) -> LevelSpec {
        self.config.level(self.level)
    }

    /// One-based round number, zero before the first game starts.
    pub fn round(&self) -> u32 {
        match self.phase {
            Phase::Idle => 0,
            _ => self.score.0.saturating_add(1),
        }
    }

    pub fn sequence(&self) -> &[CellIndex] {
        &self.sequence
    }

    pub fn user_input(&self) -> &[CellIndex] {
        &self.user_input
    }

    pub fn highlighted(&self) -> Option<CellIndex> {
        self.highlighted
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::from_engine(self)
    }
}

impl<G: SequenceGenerator> GameEngine<G> {
    pub fn new(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            sequence: Vec::new(),
            user_input: Vec::new(),
            playback: Playback::default(),
            playback_cursor: 0,
            level: 0,
            score: Saturating(0),
            phase: Default::default(),
            highlighted: None,
            epoch: 0,
        })
    }

    /// Resets every piece of game state and starts the first round.
    ///
    /// Valid from any phase. Anything still scheduled for the previous game
    /// becomes stale.
    pub fn start_game(&mut self, scheduler: &mut impl Scheduler) {
        self.epoch = self.epoch.wrapping_add(1);
        self.score = Saturating(0);
        self.level = 0;
        self.sequence.clear();
        self.user_input.clear();
        self.highlighted = None;
        self.phase = Phase::Idle;
        log::debug!("new game (epoch {})", self.epoch);

        let steps = self.config.level(0).steps;
        self.begin_round(steps, scheduler);
    }

    /// Draws a fresh sequence of `length` cells and starts playing it back.
    pub fn generate_round(&mut self, length: usize, scheduler: &mut impl Scheduler) -> Result<()> {
        if length == 0 {
            return Err(GameError::InvalidRoundLength);
        }
        if self.phase.is_game_over() {
            return Err(GameError::AlreadyEnded);
        }
        self.begin_round(length, scheduler);
        Ok(())
    }

    pub fn handle_input(
        &mut self,
        cell: CellIndex,
        scheduler: &mut impl Scheduler,
    ) -> Result<InputOutcome> {
        if !self.config.contains_cell(cell) {
            return Err(GameError::InvalidCell);
        }
        if !self.phase.accepts_input() {
            log::trace!("ignoring cell {} during {:?}", cell, self.phase);
            return Ok(InputOutcome::Ignored);
        }

        let position = self.user_input.len();
        self.user_input.push(cell);

        if self.sequence.get(position) != Some(&cell) {
            log::debug!(
                "wrong cell at step {}: expected {:?}, got {}",
                position,
                self.sequence.get(position),
                cell
            );
            self.phase = Phase::GameOver;
            return Ok(InputOutcome::Mismatch);
        }

        if self.user_input.len() == self.sequence.len() {
            self.phase = Phase::RoundComplete;
            scheduler.schedule(
                self.config.advance_delay(),
                Continuation::new(self.epoch, Action::CompleteRound),
            );
            Ok(InputOutcome::RoundCleared)
        } else {
            Ok(InputOutcome::Accepted)
        }
    }

    /// Runs a continuation previously handed to the scheduler.
    pub fn resume(
        &mut self,
        continuation: Continuation,
        scheduler: &mut impl Scheduler,
    ) -> ResumeOutcome {
        if continuation.epoch != self.epoch {
            log::trace!(
                "dropping stale {:?} (current epoch {})",
                continuation,
                self.epoch
            );
            return ResumeOutcome::Stale;
        }

        match (continuation.action, self.phase) {
            (Action::Playback(index), Phase::Playing) if index == self.playback_cursor => {
                self.run_playback_step(index, scheduler)
            }
            (Action::CompleteRound, Phase::RoundComplete) => self.complete_round(scheduler),
            (action, phase) => {
                log::warn!("unexpected {:?} during {:?}, dropped", action, phase);
                ResumeOutcome::Stale
            }
        }
    }

    fn begin_round(&mut self, length: usize, scheduler: &mut impl Scheduler) {
        self.epoch = self.epoch.wrapping_add(1);
        self.sequence = self.generator.generate(length, self.config.total_cells());
        self.user_input.clear();
        self.highlighted = None;

        let level = self.level_spec();
        self.playback = Playback::plan(length, level.reveal_interval(), self.config.glow());
        self.playback_cursor = 0;
        self.phase = Phase::Playing;
        log::debug!(
            "round {} with {} steps at level {} (epoch {})",
            self.round(),
            length,
            self.level + 1,
            self.epoch
        );

        if let Some(first) = self.playback.step(0) {
            scheduler.schedule(first.delay, Continuation::new(self.epoch, Action::Playback(0)));
        }
    }

    fn run_playback_step(&mut self, index: usize, scheduler: &mut impl Scheduler) -> ResumeOutcome {
        let Some(step) = self.playback.step(index) else {
            return ResumeOutcome::Stale;
        };

        let outcome = match step.glow {
            Glow::On(position) => {
                self.highlighted = self.sequence.get(position).copied();
                log::trace!("glow on {:?} (step {})", self.highlighted, position);
                ResumeOutcome::Highlighted
            }
            Glow::Off(position) => {
                self.highlighted = None;
                log::trace!("glow off (step {})", position);
                ResumeOutcome::Cleared
            }
        };

        self.playback_cursor = index + 1;
        match self.playback.step(self.playback_cursor) {
            Some(next) => {
                scheduler.schedule(
                    next.delay,
                    Continuation::new(self.epoch, Action::Playback(self.playback_cursor)),
                );
                outcome
            }
            None => {
                self.highlighted = None;
                self.phase = Phase::AwaitingInput;
                log::debug!("playback finished, awaiting {} inputs", self.sequence.len());
                ResumeOutcome::AwaitingInput
            }
        }
    }

    fn complete_round(&mut self, scheduler: &mut impl Scheduler) -> ResumeOutcome {
        self.score += Saturating(1);
        self.user_input.clear();

        let score = self.score.0;
        if score % self.config.score_per_level == 0 && self.level < self.config.max_level() {
            self.level += 1;
            log::debug!("score {} reached, difficulty level {}", score, self.level + 1);
        }

        let next_length = self.sequence.len() + 1;
        self.begin_round(next_length, scheduler);
        ResumeOutcome::NextRound
    }
}
