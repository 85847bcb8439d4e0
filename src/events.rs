//! Generation progress events
//!
//! Generators report progress to an `EventSink` at attempt boundaries only.
//! `LogSink` forwards events to the `log` facade and is what the plain
//! generator entry points use.

use glam::IVec2;

/// Progress reported by the generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// Goal rectangle stamped with its top-left corner at `position`
    GoalPlaced { position: IVec2 },
    /// Move search started
    MovesStarted { target_moves: usize },
    /// An attempt ran out of legal moves and will be restarted
    AttemptFailed { attempt: usize },
    /// Move search reached its target
    MovesSucceeded { attempts: usize, moves: usize },
    /// Every attempt failed
    MovesExhausted { attempts: usize },
    /// Move search stopped by the sink
    MovesCancelled { attempts: usize },
    /// Garbage blocks added out of `open` untouched cells
    GarbagePlaced { count: usize, open: usize },
}

/// Receives generation events. Called synchronously.
pub trait EventSink {
    fn event(&mut self, event: &GenerationEvent);

    /// Polled once per move-search attempt; returning true stops the search.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&mut self, _event: &GenerationEvent) {}
}

/// Forwards events to `log`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn event(&mut self, event: &GenerationEvent) {
        match event {
            GenerationEvent::GoalPlaced { position } => {
                log::info!("[Goal] Goal placed at ({}, {})", position.x, position.y);
            }
            GenerationEvent::MovesStarted { target_moves } => {
                log::info!("[Moves] Generating {} puzzle moves...", target_moves);
            }
            GenerationEvent::AttemptFailed { attempt } => {
                log::debug!("[Moves] Attempt {} did not meet target moves. Restarting...", attempt);
            }
            GenerationEvent::MovesSucceeded { attempts, moves } => {
                log::info!("[Moves] Generated {} moves in {} attempts", moves, attempts);
            }
            GenerationEvent::MovesExhausted { attempts } => {
                log::info!("[Moves] Failed to generate puzzle moves after {} attempts", attempts);
            }
            GenerationEvent::MovesCancelled { attempts } => {
                log::info!("[Moves] Cancelled after {} attempts", attempts);
            }
            GenerationEvent::GarbagePlaced { count, open } => {
                log::info!("[Garbage] Placed {} garbage blocks in {} open cells", count, open);
            }
        }
    }
}

/// Collects events in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<GenerationEvent>,
    /// Cancel once this many attempts have failed
    pub cancel_after_failures: Option<usize>,
}

impl RecordingSink {
    fn failures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::AttemptFailed { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn event(&mut self, event: &GenerationEvent) {
        self.events.push(event.clone());
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_after_failures
            .is_some_and(|limit| self.failures() >= limit)
    }
}
