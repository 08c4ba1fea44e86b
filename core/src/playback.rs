use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a single playback step does to the lit cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Glow {
    /// Light the cell at this sequence position.
    On(usize),
    /// Turn off the cell at this sequence position.
    Off(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaybackStep {
    /// Wait before the step runs, measured from the previous step.
    pub delay: Duration,
    pub glow: Glow,
}

/// The timed highlight schedule for one round.
///
/// Every sequence position expands to two steps: wait the reveal interval
/// and light the cell, then wait the glow gap and clear it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    steps: Vec<PlaybackStep>,
}

impl Playback {
    pub fn plan(length: usize, reveal_interval: Duration, glow: Duration) -> Self {
        let steps = (0..length)
            .flat_map(|position| {
                [
                    PlaybackStep {
                        delay: reveal_interval,
                        glow: Glow::On(position),
                    },
                    PlaybackStep {
                        delay: glow,
                        glow: Glow::Off(position),
                    },
                ]
            })
            .collect();
        Self { steps }
    }

    pub fn step(&self, index: usize) -> Option<PlaybackStep> {
        self.steps.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|step| step.delay).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaybackStep> {
        self.steps.iter()
    }
}

/// Work the engine asked to be resumed with after a delay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Run the playback step at this index of the round's plan.
    Playback(usize),
    CompleteRound,
}

/// A scheduled action tagged with the epoch it was scheduled under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Continuation {
    pub epoch: Epoch,
    pub action: Action,
}

impl Continuation {
    pub const fn new(epoch: Epoch, action: Action) -> Self {
        Self { epoch, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn plan_alternates_on_and_off() {
        let playback = Playback::plan(2, Duration::from_millis(1000), Duration::from_millis(300));

        let glows: Vec<_> = playback.iter().map(|step| step.glow).collect();
        assert_eq!(
            glows,
            vec![Glow::On(0), Glow::Off(0), Glow::On(1), Glow::Off(1)]
        );
        assert_eq!(playback.step(0).unwrap().delay, Duration::from_millis(1000));
        assert_eq!(playback.step(1).unwrap().delay, Duration::from_millis(300));
        assert!(playback.is_last(3));
        assert_eq!(playback.step(4), None);
    }

    #[test]
    fn total_duration_covers_every_step() {
        let playback = Playback::plan(3, Duration::from_millis(700), Duration::from_millis(300));

        assert_eq!(playback.len(), 6);
        assert_eq!(playback.total_duration(), Duration::from_millis(3000));
    }
}
