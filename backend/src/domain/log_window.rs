//! Selection window for exercise log queries.

use chrono::NaiveDate;

/// Date bounds and result cap applied when reading an exercise log.
///
/// Both bounds are exclusive: an entry on exactly the `after` or `before`
/// date is outside the window. `limit` caps the number of entries returned
/// after date filtering; it never affects which dates qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogWindow {
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
    limit: Option<u32>,
}

impl LogWindow {
    /// Window that matches every entry.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a window from optional bounds and cap.
    #[must_use]
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>, limit: Option<u32>) -> Self {
        Self {
            after,
            before,
            limit,
        }
    }

    /// Exclusive lower date bound.
    #[must_use]
    pub fn after(&self) -> Option<NaiveDate> {
        self.after
    }

    /// Exclusive upper date bound.
    #[must_use]
    pub fn before(&self) -> Option<NaiveDate> {
        self.before
    }

    /// Maximum number of entries to return.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Whether the given calendar date falls strictly inside the bounds.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let above_lower = self.after.is_none_or(|after| date > after);
        let below_upper = self.before.is_none_or(|before| date < before);
        above_lower && below_upper
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, day).expect("valid date")
    }

    #[rstest]
    fn unbounded_window_matches_everything() {
        assert!(LogWindow::unbounded().contains(date(1)));
        assert!(LogWindow::unbounded().contains(date(31)));
    }

    #[rstest]
    #[case(Some(10), None, 10, false)]
    #[case(Some(10), None, 11, true)]
    #[case(None, Some(20), 20, false)]
    #[case(None, Some(20), 19, true)]
    #[case(Some(10), Some(20), 15, true)]
    #[case(Some(10), Some(20), 10, false)]
    #[case(Some(10), Some(20), 20, false)]
    fn bounds_are_strictly_exclusive(
        #[case] after: Option<u32>,
        #[case] before: Option<u32>,
        #[case] candidate: u32,
        #[case] expected: bool,
    ) {
        let window = LogWindow::new(after.map(date), before.map(date), None);
        assert_eq!(window.contains(date(candidate)), expected);
    }

    #[rstest]
    fn limit_is_carried_without_affecting_bounds() {
        let window = LogWindow::new(None, None, Some(5));
        assert_eq!(window.limit(), Some(5));
        assert!(window.contains(date(1)));
    }
}
