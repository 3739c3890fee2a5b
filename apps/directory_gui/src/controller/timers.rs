//! Deadline queue for delayed UI work, drained from the frame loop.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    HideFeedback { generation: u64 },
    FocusEmail { session: u64 },
    CloseModal { session: u64 },
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    due: Instant,
    seq: u64,
    action: TimerAction,
}

/// Entries are never cancelled; each action carries the generation it was
/// scheduled for and the receiver ignores it once that generation is gone.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let index = self
            .entries
            .partition_point(|entry| (entry.due, entry.seq) <= (due, seq));
        self.entries.insert(index, TimerEntry { due, seq, action });
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerAction> {
        let ready = self.entries.partition_point(|entry| entry.due <= now);
        self.entries
            .drain(..ready)
            .map(|entry| entry.action)
            .collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.entries.first().map(|entry| entry.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pops_in_deadline_then_insertion_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(
            start + Duration::from_millis(300),
            TimerAction::CloseModal { session: 1 },
        );
        timers.schedule(
            start + Duration::from_millis(100),
            TimerAction::FocusEmail { session: 1 },
        );
        timers.schedule(
            start + Duration::from_millis(100),
            TimerAction::HideFeedback { generation: 4 },
        );

        assert_eq!(timers.next_due(), Some(start + Duration::from_millis(100)));
        assert!(timers.pop_due(start).is_empty());
        assert_eq!(
            timers.pop_due(start + Duration::from_millis(150)),
            vec![
                TimerAction::FocusEmail { session: 1 },
                TimerAction::HideFeedback { generation: 4 },
            ]
        );
        assert_eq!(timers.len(), 1);
        assert_eq!(
            timers.pop_due(start + Duration::from_secs(1)),
            vec![TimerAction::CloseModal { session: 1 }]
        );
        assert!(timers.is_empty());
    }
}
