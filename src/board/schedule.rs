use std::time::{Duration, Instant};

use crate::board::config::Periods;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    Stations,
    Posters,
    Clock,
}

#[derive(Clone, Debug)]
struct Entry {
    task: Task,
    period: Duration,
    /// Runs on the first poll instead of one period after it.
    immediate: bool,
    next: Option<Instant>,
}

/// Fixed-period timers for the board's refresh tasks, polled by the host loop.
///
/// Station and clock refreshes are due on the first poll; poster cycling starts
/// one period later, so the first poster stays up for a full period. A task
/// that ran is re-armed one period after the poll that returned it; missed
/// periods are not caught up.
#[derive(Clone, Debug)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new(periods: &Periods) -> Self {
        let entry = |task, secs, immediate| Entry {
            task,
            period: Duration::from_secs(secs),
            immediate,
            next: None,
        };
        Self {
            entries: vec![
                entry(Task::Stations, periods.stations, true),
                entry(Task::Posters, periods.posters, false),
                entry(Task::Clock, periods.clock, true),
            ],
        }
    }

    pub fn due(&mut self, now: Instant) -> Vec<Task> {
        let mut out = Vec::new();
        for entry in &mut self.entries {
            if entry.next.is_none() && !entry.immediate {
                entry.next = Some(now + entry.period);
                continue;
            }
            if entry.next.is_none_or(|next| next <= now) {
                entry.next = Some(now + entry.period);
                out.push(entry.task);
            }
        }
        out
    }

    /// Earliest instant at which some task becomes due; `None` before the first poll.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries
            .iter()
            .map(|e| e.next)
            .collect::<Option<Vec<_>>>()
            .and_then(|all| all.into_iter().min())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/board/schedule.rs"]
mod tests;
