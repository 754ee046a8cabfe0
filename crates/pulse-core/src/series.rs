//! Daily close-price series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Date-indexed daily series.
///
/// Keyed by calendar date, so dates are unique by construction. Gaps from
/// weekends and holidays are expected; consumers index by position in
/// date order, never by calendar arithmetic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySeries {
    bars: BTreeMap<NaiveDate, DailyBar>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bar, replacing any existing bar for the same date.
    pub fn insert(&mut self, bar: DailyBar) -> Option<DailyBar> {
        self.bars.insert(bar.date, bar)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar, if any.
    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.values().next_back()
    }

    /// Bar `n` positions behind the most recent one (`n = 0` is the most
    /// recent bar itself).
    pub fn nth_most_recent(&self, n: usize) -> Option<&DailyBar> {
        self.bars.values().rev().nth(n)
    }

    /// Bars in descending date order (most recent first).
    pub fn iter_descending(&self) -> impl Iterator<Item = &DailyBar> {
        self.bars.values().rev()
    }
}

impl FromIterator<DailyBar> for DailySeries {
    fn from_iter<T: IntoIterator<Item = DailyBar>>(iter: T) -> Self {
        let mut series = Self::new();
        for bar in iter {
            series.insert(bar);
        }
        series
    }
}
