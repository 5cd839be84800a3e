//! Calculation history.
//!
//! The engine pushes a [`HistoryRecord`] to a [`HistorySink`] after every
//! successful calculation and never reads it back. [`History`] is the
//! in-memory sink; durable storage is left to the host.

use chrono::{DateTime, Local, NaiveDate};
use std::collections::VecDeque;

/// Operator glyphs counted by [`History::statistics`]
const COUNTED_OPERATORS: [char; 7] = ['+', '-', '×', '÷', '√', '²', '³'];

/// Number of operators reported by [`History::statistics`]
const TOP_OPERATORS: usize = 5;

/// A successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Expression as displayed
    pub expression: String,
    /// Formatted result
    pub result: String,
    /// Local time of the calculation
    pub timestamp: DateTime<Local>,
}

impl HistoryRecord {
    /// Create a record timestamped now
    pub fn new<E: Into<String>, R: Into<String>>(expression: E, result: R) -> Self {
        Self::at(expression, result, Local::now())
    }

    /// Create a record with the given timestamp
    pub fn at<E, R>(expression: E, result: R, timestamp: DateTime<Local>) -> Self
    where
        E: Into<String>,
        R: Into<String>,
    {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }
}

/// Receiver of the calculation records. Recording can not fail from the
/// engine point of view: a sink that persists records must handle its own
/// errors.
pub trait HistorySink {
    /// Receive a new record
    fn record(&mut self, record: HistoryRecord);
}

impl<S: HistorySink + ?Sized> HistorySink for Box<S> {
    fn record(&mut self, record: HistoryRecord) {
        (**self).record(record);
    }
}

/// Usage statistics over the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// Number of records
    pub total: usize,
    /// The most used operators, with the number of records using them, most
    /// used first
    pub top_operators: Vec<(char, usize)>,
    /// Distinct days with at least one record, newest first
    pub calculation_dates: Vec<NaiveDate>,
}

/// Bounded in-memory history, newest record first.
///
/// ```
/// use crunchcalc::{History, HistoryRecord, HistorySink};
///
/// let mut history = History::new(2);
/// history.record(HistoryRecord::new("1+1", "2"));
/// history.record(HistoryRecord::new("2×3", "6"));
/// history.record(HistoryRecord::new("√16", "4"));
///
/// let expressions: Vec<_> = history.records().map(|r| r.expression.as_str()).collect();
/// assert_eq!(expressions, ["√16", "2×3"]);
/// ```
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history keeping at most `capacity` records
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximal number of records kept
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there is no record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All the records, newest first
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// The `limit` newest records
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().take(limit)
    }

    /// Distinct expressions among the `limit` newest records, newest first
    #[must_use]
    pub fn recent_expressions(&self, limit: usize) -> Vec<&str> {
        let mut expressions: Vec<&str> = Vec::new();
        for record in self.recent(limit) {
            if !expressions.contains(&record.expression.as_str()) {
                expressions.push(&record.expression);
            }
        }
        expressions
    }

    /// Records whose expression or result contains `keyword`, ignoring case
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&HistoryRecord> {
        let keyword = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.expression.to_lowercase().contains(&keyword)
                    || record.result.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Remove the record at `index`, counted from the newest one
    pub fn remove(&mut self, index: usize) -> Option<HistoryRecord> {
        self.records.remove(index)
    }

    /// Remove all the records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Count the records using each operator glyph, and list the days of the
    /// calculations
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let mut counts: Vec<(char, usize)> = COUNTED_OPERATORS
            .iter()
            .map(|&operator| {
                let count = self
                    .records
                    .iter()
                    .filter(|record| record.expression.contains(operator))
                    .count();
                (operator, count)
            })
            .filter(|&(_, count)| count > 0)
            .collect();
        // stable: ties keep the glyph order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_OPERATORS);

        let mut dates: Vec<NaiveDate> = self
            .records
            .iter()
            .map(|record| record.timestamp.date_naive())
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        Statistics {
            total: self.records.len(),
            top_operators: counts,
            calculation_dates: dates,
        }
    }
}

impl HistorySink for History {
    fn record(&mut self, record: HistoryRecord) {
        if self.capacity == 0 {
            return;
        }
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn history(expressions: &[(&str, &str)]) -> History {
        let mut history = History::new(100);
        for &(expression, result) in expressions {
            history.record(HistoryRecord::new(expression, result));
        }
        history
    }

    #[test]
    fn bounded() {
        let mut history = History::new(3);
        for i in 0..10 {
            history.record(HistoryRecord::new(i.to_string(), i.to_string()));
        }
        assert_eq!(history.len(), 3);
        let results: Vec<_> = history.records().map(|r| r.result.as_str()).collect();
        assert_eq!(results, ["9", "8", "7"]);

        let mut disabled = History::new(0);
        disabled.record(HistoryRecord::new("1", "1"));
        assert!(disabled.is_empty());
    }

    #[test]
    fn recent_expressions() {
        let history = history(&[("1+1", "2"), ("2+2", "4"), ("1+1", "2"), ("3×3", "9")]);
        assert_eq!(history.recent_expressions(10), ["3×3", "1+1", "2+2"]);
        assert_eq!(history.recent_expressions(2), ["3×3", "1+1"]);
        assert_eq!(history.recent(1).count(), 1);
    }

    #[test]
    fn search() {
        let history = history(&[("sin(30)", "0.5"), ("SQRT(16)", "4"), ("2+2", "4")]);
        let found: Vec<_> = history
            .search("sqrt")
            .into_iter()
            .map(|r| r.result.as_str())
            .collect();
        assert_eq!(found, ["4"]);
        assert_eq!(history.search("4").len(), 2);
        assert!(history.search("cos").is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut history = history(&[("1", "1"), ("2", "2")]);
        assert_eq!(history.remove(0).map(|r| r.expression), Some("2".to_owned()));
        assert_eq!(history.remove(5), None);
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn statistics() {
        let history = history(&[
            ("1+2", "3"),
            ("1+2+3", "6"),
            ("2×3", "6"),
            ("√16-1", "3"),
            ("5²", "25"),
            ("6÷2", "3"),
            ("2³", "8"),
        ]);
        let statistics = history.statistics();
        assert_eq!(statistics.total, 7);
        assert_eq!(
            statistics.top_operators,
            vec![('+', 2), ('-', 1), ('×', 1), ('÷', 1), ('√', 1)]
        );
        assert!(History::new(5).statistics().top_operators.is_empty());
        assert!(History::new(5).statistics().calculation_dates.is_empty());
    }

    #[test]
    fn calculation_dates() {
        let at = |day, hour| Local.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
        let mut history = History::new(10);
        history.record(HistoryRecord::at("1+1", "2", at(1, 9)));
        history.record(HistoryRecord::at("2+2", "4", at(3, 14)));
        history.record(HistoryRecord::at("3+3", "6", at(1, 17)));
        history.record(HistoryRecord::at("4+4", "8", at(3, 10)));

        let date = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        assert_eq!(history.statistics().calculation_dates, vec![date(3), date(1)]);
    }
}
