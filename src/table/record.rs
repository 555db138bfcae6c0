//! # Per-philosopher meal record.
//!
//! Written only by the owning philosopher, read by the monitor. Both sides go
//! through the same lock, held for exactly one read or one write.

use parking_lot::Mutex;

/// Consistent copy of a philosopher's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MealSnapshot {
    /// Start of the last meal, in milliseconds since the simulation start.
    pub last_meal_ms: u64,
    /// Number of meals started so far.
    pub meals: u32,
}

impl MealSnapshot {
    /// Milliseconds since the last meal started, as seen at `now_ms`.
    #[inline]
    pub fn since_last_meal(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_meal_ms)
    }
}

/// Shared record of one philosopher.
#[derive(Debug, Default)]
pub struct Record {
    state: Mutex<MealSnapshot>,
}

impl Record {
    /// Creates a record with no meals, last meal at the simulation start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps a meal starting at `now_ms` and returns the updated record.
    pub fn stamp(&self, now_ms: u64) -> MealSnapshot {
        let mut s = self.state.lock();
        s.last_meal_ms = now_ms;
        s.meals = s.meals.saturating_add(1);
        *s
    }

    /// Reads the record.
    pub fn snapshot(&self) -> MealSnapshot {
        *self.state.lock()
    }

    /// Milliseconds without a meal at `now_ms`, with the record they were measured on.
    ///
    /// `now_ms` must be read before calling: a meal stamped after that read then
    /// counts as `0` instead of the full gap since the previous meal.
    pub fn elapsed_at(&self, now_ms: u64) -> (u64, MealSnapshot) {
        let s = *self.state.lock();
        (s.since_last_meal(now_ms), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_updates_both_fields() {
        let rec = Record::new();
        assert_eq!(rec.snapshot(), MealSnapshot::default());

        let s = rec.stamp(350);
        assert_eq!(
            s,
            MealSnapshot {
                last_meal_ms: 350,
                meals: 1
            }
        );
        assert_eq!(rec.snapshot(), s);
        assert_eq!(s.since_last_meal(1000), 650);
        assert_eq!(s.since_last_meal(100), 0);
    }

    #[test]
    fn meal_stamped_after_reading_the_clock_is_not_hunger() {
        let rec = Record::new();
        let now = 300;
        // The owner starts eating between the clock read and the record read.
        rec.stamp(300);

        let (elapsed, snapshot) = rec.elapsed_at(now);
        assert_eq!(elapsed, 0);
        assert_eq!(snapshot.meals, 1);
    }

    #[test]
    fn elapsed_counts_from_the_last_meal() {
        let rec = Record::new();
        rec.stamp(120);
        assert_eq!(rec.elapsed_at(500), (380, rec.snapshot()));
        assert_eq!(Record::new().elapsed_at(500).0, 500);
    }
}
