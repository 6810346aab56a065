//! Caller-owned choice of schedule periods used as interpolation samples.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An ordered set of selected periods.
///
/// Period 0 stands for the original principal; periods `1..=N` refer to
/// schedule entries. The selection lives apart from the schedule, so
/// regenerating a schedule never clears or shifts it.
///
/// # Example
///
/// ```rust
/// use loancast_loans::selection::SampleSelection;
///
/// let mut selection = SampleSelection::every(12, 36);
/// assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 12, 24, 36]);
///
/// selection.toggle(18);
/// selection.toggle(24);
/// assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 12, 18, 36]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSelection {
    periods: BTreeSet<u32>,
}

impl SampleSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects every `step`-th period from 0 through `last_period`.
    ///
    /// A step of 0 is treated as 1.
    pub fn every(step: u32, last_period: u32) -> Self {
        let step = step.max(1) as usize;
        (0..=last_period).step_by(step).collect()
    }

    /// Creates a selection from explicit periods; duplicates collapse.
    pub fn from_periods<I: IntoIterator<Item = u32>>(periods: I) -> Self {
        periods.into_iter().collect()
    }

    /// Adds a period. Returns `true` if it was not already selected.
    pub fn select(&mut self, period: u32) -> bool {
        self.periods.insert(period)
    }

    /// Removes a period. Returns `true` if it was selected.
    pub fn deselect(&mut self, period: u32) -> bool {
        self.periods.remove(&period)
    }

    /// Flips a period and returns whether it is now selected.
    pub fn toggle(&mut self, period: u32) -> bool {
        if self.periods.remove(&period) {
            false
        } else {
            self.periods.insert(period);
            true
        }
    }

    /// Whether the period is selected.
    pub fn contains(&self, period: u32) -> bool {
        self.periods.contains(&period)
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.periods.clear();
    }

    /// Number of selected periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Selected periods in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.periods.iter().copied()
    }

    /// Largest selected period.
    pub fn last(&self) -> Option<u32> {
        self.periods.last().copied()
    }
}

impl FromIterator<u32> for SampleSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            periods: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for SampleSelection {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.periods.extend(iter);
    }
}
