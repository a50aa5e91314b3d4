//! Cooperative single-threaded scheduler
//!
//! Drives a [`Simulation`] at its fixed cadence on a virtual millisecond clock.
//! Input, ticks, continuations and redraws all run on the caller's thread in
//! time order; nothing blocks. A continuation carries the generation it was
//! scheduled in, and a reset bumps the session generation, so a stale
//! continuation can never touch the replacement game.

use serde::Serialize;

use crate::consts::MAX_CATCHUP_TICKS;
use crate::error::Result;

/// Identifies one state epoch of a session
pub type Generation = u32;

/// Token handed back to a simulation when its continuation comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wake {
    pub generation: Generation,
}

/// A continuation requested by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay_ms: u64,
    pub wake: Wake,
}

/// How an input was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Rejected or had no effect
    Ignored,
    /// Stored as intent for the next tick; nothing visible yet
    Buffered,
    /// Visible state changed
    Changed,
    /// State replaced wholesale under a new generation
    Reset,
}

/// What one simulation step asks of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    pub redraw: bool,
    pub defer: Option<Deferred>,
}

impl Step {
    pub const IDLE: Step = Step {
        redraw: false,
        defer: None,
    };

    pub const REDRAW: Step = Step {
        redraw: true,
        defer: None,
    };
}

/// A game driven by the scheduler
pub trait Simulation {
    type Input;
    type Snapshot: Serialize;

    /// Fixed interval between steps
    fn tick_ms(&self) -> u64;

    /// Current state epoch
    fn generation(&self) -> Generation;

    /// Apply one discrete input event
    fn handle(&mut self, input: Self::Input) -> Result<Handled>;

    /// Advance by one tick
    fn step(&mut self) -> Step;

    /// Run a continuation. Returns true if it changed visible state.
    fn resume(&mut self, wake: Wake) -> bool;

    /// Everything a renderer needs for a full redraw
    fn snapshot(&self) -> Self::Snapshot;
}

/// Draws full snapshots
pub trait Renderer<S> {
    fn draw(&mut self, snapshot: &S);
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    wake: Wake,
}

/// Fixed-cadence driver for one simulation
#[derive(Debug)]
pub struct Scheduler<G: Simulation> {
    game: G,
    now_ms: u64,
    next_tick_ms: u64,
    pending: Vec<Pending>,
    max_catchup_ticks: u32,
    ticks: u64,
    frames: u64,
}

impl<G: Simulation> Scheduler<G> {
    pub fn new(game: G) -> Self {
        let next_tick_ms = game.tick_ms();
        Self {
            game,
            now_ms: 0,
            next_tick_ms,
            pending: Vec::new(),
            max_catchup_ticks: MAX_CATCHUP_TICKS,
            ticks: 0,
            frames: 0,
        }
    }

    /// Cap on ticks run by one `advance`
    pub fn with_max_catchup(mut self, ticks: u32) -> Self {
        self.max_catchup_ticks = ticks.max(1);
        self
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access outside the input path; pending continuations are kept
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Redraws requested so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Continuations waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deliver an input event immediately
    pub fn dispatch<R: Renderer<G::Snapshot>>(
        &mut self,
        input: G::Input,
        renderer: &mut R,
    ) -> Result<Handled> {
        let handled = self.game.handle(input)?;
        match handled {
            Handled::Reset => {
                let generation = self.game.generation();
                let before = self.pending.len();
                self.pending.retain(|p| p.wake.generation == generation);
                if before != self.pending.len() {
                    log::debug!(
                        "Dropped {} continuations older than generation {}",
                        before - self.pending.len(),
                        generation
                    );
                }
                self.next_tick_ms = self.now_ms + self.game.tick_ms();
                self.draw(renderer);
            }
            Handled::Changed => self.draw(renderer),
            Handled::Ignored | Handled::Buffered => {}
        }
        Ok(handled)
    }

    /// Move the clock forward, running due ticks and continuations in order.
    ///
    /// A continuation due at the same instant as a tick runs first. Returns the
    /// number of ticks run.
    pub fn advance<R: Renderer<G::Snapshot>>(&mut self, elapsed_ms: u64, renderer: &mut R) -> u32 {
        let target = self.now_ms + elapsed_ms;
        let mut ticks = 0;

        loop {
            let next_wake = self.pending.iter().map(|p| p.due_ms).min();
            if let Some(due) = next_wake.filter(|&due| due <= target && due <= self.next_tick_ms) {
                self.now_ms = due;
                self.fire_due(renderer);
                continue;
            }

            if self.next_tick_ms > target {
                break;
            }

            let tick_ms = self.game.tick_ms().max(1);
            if ticks >= self.max_catchup_ticks {
                // Skip the backlog but keep the tick phase
                let behind = (target - self.next_tick_ms) / tick_ms + 1;
                log::warn!("Scheduler fell behind, dropping {} ticks", behind);
                self.next_tick_ms += behind * tick_ms;
                continue;
            }

            self.now_ms = self.next_tick_ms;
            self.next_tick_ms += tick_ms;
            ticks += 1;
            self.ticks += 1;

            let step = self.game.step();
            if let Some(deferred) = step.defer {
                self.pending.push(Pending {
                    due_ms: self.now_ms + deferred.delay_ms,
                    wake: deferred.wake,
                });
            }
            if step.redraw {
                self.draw(renderer);
            }
        }

        self.now_ms = target;
        ticks
    }

    fn fire_due<R: Renderer<G::Snapshot>>(&mut self, renderer: &mut R) {
        let now = self.now_ms;
        let (due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.iter().partition(|p| p.due_ms <= now);
        self.pending = waiting;

        let generation = self.game.generation();
        let mut changed = false;
        for pending in due {
            if pending.wake.generation != generation {
                log::debug!(
                    "Ignoring stale continuation from generation {}",
                    pending.wake.generation
                );
                continue;
            }
            changed |= self.game.resume(pending.wake);
        }
        if changed {
            self.draw(renderer);
        }
    }

    fn draw<R: Renderer<G::Snapshot>>(&mut self, renderer: &mut R) {
        self.frames += 1;
        renderer.draw(&self.game.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameLog;

    /// Counts ticks; every `defer_every`th tick asks for a continuation
    struct Counter {
        generation: Generation,
        steps: u32,
        resumed: u32,
        defer_every: u32,
    }

    enum CounterInput {
        Bump,
        Reset,
        Noop,
    }

    impl Counter {
        fn new(defer_every: u32) -> Self {
            Self {
                generation: 0,
                steps: 0,
                resumed: 0,
                defer_every,
            }
        }
    }

    impl Simulation for Counter {
        type Input = CounterInput;
        type Snapshot = (Generation, u32, u32);

        fn tick_ms(&self) -> u64 {
            10
        }

        fn generation(&self) -> Generation {
            self.generation
        }

        fn handle(&mut self, input: CounterInput) -> Result<Handled> {
            Ok(match input {
                CounterInput::Bump => {
                    self.steps += 100;
                    Handled::Changed
                }
                CounterInput::Reset => {
                    *self = Counter {
                        generation: self.generation + 1,
                        ..Counter::new(self.defer_every)
                    };
                    Handled::Reset
                }
                CounterInput::Noop => Handled::Ignored,
            })
        }

        fn step(&mut self) -> Step {
            self.steps += 1;
            let defer = (self.defer_every > 0 && self.steps % self.defer_every == 0).then_some(
                Deferred {
                    delay_ms: 25,
                    wake: Wake {
                        generation: self.generation,
                    },
                },
            );
            Step {
                redraw: true,
                defer,
            }
        }

        fn resume(&mut self, wake: Wake) -> bool {
            assert_eq!(wake.generation, self.generation);
            self.resumed += 1;
            true
        }

        fn snapshot(&self) -> Self::Snapshot {
            (self.generation, self.steps, self.resumed)
        }
    }

    #[test]
    fn test_ticks_at_fixed_cadence() {
        let mut scheduler = Scheduler::new(Counter::new(0));
        let mut frames = FrameLog::default();

        assert_eq!(scheduler.advance(9, &mut frames), 0);
        assert_eq!(scheduler.advance(1, &mut frames), 1);
        assert_eq!(scheduler.advance(35, &mut frames), 3);
        assert_eq!(scheduler.now_ms(), 45);
        assert_eq!(scheduler.game().steps, 4);
        assert_eq!(frames.frames.len(), 4);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut scheduler = Scheduler::new(Counter::new(0)).with_max_catchup(3);
        let mut frames = FrameLog::default();

        assert_eq!(scheduler.advance(1000, &mut frames), 3);
        assert_eq!(scheduler.game().steps, 3);

        // Tick phase is kept after the skip
        assert_eq!(scheduler.advance(10, &mut frames), 1);
        assert_eq!(scheduler.game().steps, 4);
    }

    #[test]
    fn test_continuation_fires_after_delay() {
        let mut scheduler = Scheduler::new(Counter::new(2));
        let mut frames = FrameLog::default();

        // Tick 2 at t=20 defers to t=45, tick 4 at t=40 to t=65
        scheduler.advance(40, &mut frames);
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.game().resumed, 0);

        scheduler.advance(5, &mut frames);
        assert_eq!(scheduler.game().resumed, 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_reset_drops_stale_continuations() {
        let mut scheduler = Scheduler::new(Counter::new(2));
        let mut frames = FrameLog::default();

        scheduler.advance(20, &mut frames);
        assert_eq!(scheduler.pending(), 1);

        let handled = scheduler.dispatch(CounterInput::Reset, &mut frames).unwrap();
        assert_eq!(handled, Handled::Reset);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.game().generation, 1);

        // Past the old due time: nothing from generation 0 runs
        scheduler.advance(29, &mut frames);
        assert_eq!(scheduler.game().resumed, 0);
        assert_eq!(scheduler.game().steps, 2);
    }

    #[test]
    fn test_input_redraws_only_on_change() {
        let mut scheduler = Scheduler::new(Counter::new(0));
        let mut frames = FrameLog::default();

        scheduler.dispatch(CounterInput::Noop, &mut frames).unwrap();
        assert!(frames.frames.is_empty());

        scheduler.dispatch(CounterInput::Bump, &mut frames).unwrap();
        assert_eq!(frames.frames, vec![(0, 100, 0)]);
        assert_eq!(scheduler.frames(), 1);
    }
}
