use serde::{Deserialize, Serialize};

use crate::animation::Batch;
use kinema_core::{Duration, Timestamp};

/// One step of a timeline: either an animation batch or a pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    /// Play a batch of concurrent animation operations.
    Play(Batch),
    /// Advance the clock without mutating any primitive.
    Wait(Duration),
}

impl Entry {
    pub fn duration(&self) -> Duration {
        match self {
            Entry::Play(batch) => batch.duration,
            Entry::Wait(d) => *d,
        }
    }
}

/// The full ordered sequence of entries composing one scene. Entries execute
/// strictly in submission order; a later entry never starts before an
/// earlier one finishes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<Entry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total duration: the sum of all entry durations.
    pub fn duration(&self) -> Duration {
        self.entries
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.duration())
    }

    /// Start timestamp of each entry, in order. The returned vector has one
    /// element per entry.
    pub fn entry_starts(&self) -> Vec<Timestamp> {
        let mut starts = Vec::with_capacity(self.entries.len());
        let mut clock = Timestamp::zero();
        for entry in &self.entries {
            starts.push(clock);
            clock = clock + entry.duration();
        }
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimOp, Directive};

    fn batch(secs: f64) -> Entry {
        Entry::Play(Batch::new(
            vec![Directive::new("p", AnimOp::FadeIn)],
            Duration::from_seconds(secs),
        ))
    }

    #[test]
    fn test_empty_timeline_is_valid() {
        let tl = Timeline::new();
        assert!(tl.is_empty());
        assert!((tl.duration().as_seconds()).abs() < 0.001);
        assert!(tl.entry_starts().is_empty());
    }

    #[test]
    fn test_duration_sums_entries() {
        let mut tl = Timeline::new();
        tl.push(batch(0.5));
        tl.push(Entry::Wait(Duration::from_seconds(2.0)));
        tl.push(batch(1.0));
        assert!((tl.duration().as_seconds() - 3.5).abs() < 0.001);
    }

    #[test]
    fn test_entry_starts_are_cumulative() {
        let mut tl = Timeline::new();
        tl.push(batch(0.5));
        tl.push(Entry::Wait(Duration::from_seconds(1.0)));
        tl.push(batch(0.25));
        let starts = tl.entry_starts();
        assert_eq!(starts.len(), 3);
        assert!((starts[0].as_seconds()).abs() < 0.001);
        assert!((starts[1].as_seconds() - 0.5).abs() < 0.001);
        assert!((starts[2].as_seconds() - 1.5).abs() < 0.001);
    }
}
