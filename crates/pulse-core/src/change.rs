//! Trailing price-change computation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};
use crate::series::DailySeries;

/// Price movement between two bars of a daily series.
///
/// `basis_date` and `latest_date` record the window actually used: when
/// history is shorter than requested the basis silently falls back to the
/// oldest bar, so callers must not assume `window_days` was honored
/// literally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub absolute: f64,
    pub percent: f64,
    pub window_days: usize,
    pub basis_date: NaiveDate,
    pub latest_date: NaiveDate,
}

impl PriceChange {
    /// One-line human-readable movement summary.
    pub fn summary(&self) -> String {
        format!(
            "Price changed by ${:.2} ({:.2}%) between {} and {}.",
            self.absolute, self.percent, self.basis_date, self.latest_date
        )
    }
}

/// Compute the price change over a trailing window of trading entries.
///
/// The window counts positions in the date-sorted series, not calendar
/// days: non-trading-day gaps are absorbed by indexing. With more than
/// `window_days` bars the basis is the bar exactly `window_days` entries
/// behind the latest; with fewer it degrades to the oldest available bar
/// rather than failing.
pub fn compute_price_change(series: &DailySeries, window_days: usize) -> Result<PriceChange> {
    let latest = series.latest().ok_or_else(|| {
        PulseError::InsufficientHistory("series contains no daily bars".to_string())
    })?;

    let basis_index = if series.len() > window_days {
        window_days
    } else {
        series.len() - 1
    };

    let basis = series.nth_most_recent(basis_index).ok_or_else(|| {
        PulseError::InsufficientHistory(format!("no bar {basis_index} entries back"))
    })?;

    if basis.close == 0.0 {
        return Err(PulseError::InsufficientHistory(format!(
            "basis close on {} is zero",
            basis.date
        )));
    }

    let absolute = latest.close - basis.close;
    let percent = absolute / basis.close * 100.0;

    Ok(PriceChange {
        absolute,
        percent,
        window_days,
        basis_date: basis.date,
        latest_date: latest.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::DailyBar;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
    }

    fn series(bars: &[(&str, f64)]) -> DailySeries {
        bars.iter()
            .map(|(d, close)| DailyBar::new(date(d), *close))
            .collect()
    }

    #[test]
    fn test_one_day_window_uses_previous_entry() {
        let series = series(&[
            ("2024-01-10", 105.00),
            ("2024-01-09", 100.00),
            ("2024-01-08", 95.00),
        ]);

        let change = compute_price_change(&series, 1).expect("change computes");
        assert_eq!(change.basis_date, date("2024-01-09"));
        assert_eq!(change.latest_date, date("2024-01-10"));
        assert!((change.absolute - 5.00).abs() < 1e-9);
        assert!((change.percent - 5.00).abs() < 1e-9);
    }

    #[test]
    fn test_single_entry_falls_back_to_itself() {
        let series = series(&[("2024-01-10", 105.00)]);

        let change = compute_price_change(&series, 7).expect("fallback is not a failure");
        assert_eq!(change.basis_date, date("2024-01-10"));
        assert_eq!(change.latest_date, date("2024-01-10"));
        assert_eq!(change.absolute, 0.00);
        assert_eq!(change.percent, 0.00);
    }

    #[test]
    fn test_window_counts_entries_not_calendar_days() {
        // A long weekend sits between the two bars; window 1 must still
        // land on the previous trading entry.
        let series = series(&[("2024-01-12", 110.0), ("2024-01-08", 100.0)]);

        let change = compute_price_change(&series, 1).expect("change computes");
        assert_eq!(change.basis_date, date("2024-01-08"));
        assert!((change.percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_uses_oldest_entry() {
        let series = series(&[
            ("2024-01-10", 108.0),
            ("2024-01-09", 104.0),
            ("2024-01-08", 96.0),
        ]);

        let change = compute_price_change(&series, 7).expect("change computes");
        assert_eq!(change.basis_date, date("2024-01-08"));
        // The naive latest - 7 calendar days would be 2024-01-03.
        assert_ne!(change.basis_date, date("2024-01-03"));
        assert!((change.absolute - 12.0).abs() < 1e-9);
        assert!((change.percent - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_exact_window_boundary() {
        // Exactly window_days + 1 entries: basis is the oldest bar both by
        // index and by fallback; percent stays exact.
        let series = series(&[
            ("2024-01-10", 120.0),
            ("2024-01-09", 110.0),
            ("2024-01-08", 80.0),
        ]);

        let change = compute_price_change(&series, 2).expect("change computes");
        assert_eq!(change.basis_date, date("2024-01-08"));
        assert!((change.absolute - 40.0).abs() < 1e-9);
        assert!((change.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_is_insufficient_history() {
        let err = compute_price_change(&DailySeries::new(), 7).expect_err("must fail");
        assert!(matches!(err, PulseError::InsufficientHistory(_)));
    }

    #[test]
    fn test_zero_basis_close_is_insufficient_history() {
        let series = series(&[("2024-01-10", 105.0), ("2024-01-09", 0.0)]);

        let err = compute_price_change(&series, 1).expect_err("must fail");
        assert!(matches!(err, PulseError::InsufficientHistory(_)));
    }

    #[test]
    fn test_negative_change() {
        let series = series(&[("2024-01-10", 90.0), ("2024-01-09", 100.0)]);

        let change = compute_price_change(&series, 1).expect("change computes");
        assert!((change.absolute + 10.0).abs() < 1e-9);
        assert!((change.percent + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_mentions_window_dates() {
        let series = series(&[("2024-01-10", 105.0), ("2024-01-09", 100.0)]);

        let summary = compute_price_change(&series, 1)
            .expect("change computes")
            .summary();
        assert!(summary.contains("$5.00"));
        assert!(summary.contains("(5.00%)"));
        assert!(summary.contains("2024-01-09"));
        assert!(summary.contains("2024-01-10"));
    }
}
