use alloc::collections::BinaryHeap;
use core::cmp::Reverse;
use core::time::Duration;

use crate::*;

/// Timer service the engine hands its continuations to.
///
/// Implementations must eventually pass each continuation back through
/// [`GameEngine::resume`] once `delay` has elapsed. Dropping one is allowed,
/// the engine never relies on a stale continuation running.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, continuation: Continuation);
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTask {
    at: Duration,
    order: u64,
    continuation: Continuation,
}

/// Virtual-clock scheduler for headless drivers and tests.
///
/// Time only moves when [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle) is called. Tasks due at the same
/// instant run in the order they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_order: u64,
    queue: BinaryHeap<Reverse<PendingTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(task)| task.at)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Moves the clock forward by `by`, resuming every task that falls due on the way.
    pub fn advance<G: SequenceGenerator>(
        &mut self,
        engine: &mut GameEngine<G>,
        by: Duration,
    ) -> ResumeOutcome {
        let target = self.now + by;
        let mut outcome = ResumeOutcome::Stale;

        while let Some(task) = self.pop_due(target) {
            self.now = task.at;
            outcome = outcome | engine.resume(task.continuation, self);
        }

        self.now = target;
        outcome
    }

    /// Runs tasks until nothing is left, jumping the clock to each deadline.
    pub fn run_until_idle<G: SequenceGenerator>(
        &mut self,
        engine: &mut GameEngine<G>,
    ) -> ResumeOutcome {
        let mut outcome = ResumeOutcome::Stale;

        while let Some(Reverse(task)) = self.queue.pop() {
            self.now = task.at;
            outcome = outcome | engine.resume(task.continuation, self);
        }

        outcome
    }

    fn pop_due(&mut self, until: Duration) -> Option<PendingTask> {
        let due = self
            .queue
            .peek()
            .is_some_and(|Reverse(task)| task.at <= until);
        if due {
            self.queue.pop().map(|Reverse(task)| task)
        } else {
            None
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, continuation: Continuation) {
        let task = PendingTask {
            at: self.now + delay,
            order: self.next_order,
            continuation,
        };
        self.next_order += 1;
        self.queue.push(Reverse(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn tasks_come_out_in_deadline_then_schedule_order() {
        let mut scheduler = ManualScheduler::new();
        let late = Continuation::new(1, Action::CompleteRound);
        let first = Continuation::new(2, Action::Playback(0));
        let second = Continuation::new(1, Action::Playback(1));

        scheduler.schedule(ms(500), late);
        scheduler.schedule(ms(100), first);
        scheduler.schedule(ms(100), second);

        assert_eq!(scheduler.pending(), 3);
        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
        assert_eq!(scheduler.pop_due(ms(99)), None);
        assert_eq!(scheduler.pop_due(ms(100)).unwrap().continuation, first);
        assert_eq!(scheduler.pop_due(ms(100)).unwrap().continuation, second);
        assert_eq!(scheduler.pop_due(ms(499)), None);
        assert_eq!(scheduler.pop_due(ms(500)).unwrap().continuation, late);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn advance_moves_clock_even_when_nothing_is_due() {
        let generator = ScriptedSequenceGenerator::new(alloc::vec![0]);
        let mut engine = GameEngine::new(GameConfig::default(), generator).unwrap();
        let mut scheduler = ManualScheduler::new();

        let outcome = scheduler.advance(&mut engine, ms(250));

        assert_eq!(outcome, ResumeOutcome::Stale);
        assert_eq!(scheduler.now(), ms(250));
    }

    #[test]
    fn clear_drops_everything_pending() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(ms(10), Continuation::new(0, Action::CompleteRound));

        scheduler.clear();

        assert!(scheduler.is_idle());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
