//! Incremental (type-ahead) search.
//!
//! Keystrokes accumulate in a buffer. Every keystroke restarts a single-shot
//! debounce deadline; when the deadline passes the buffer is taken and
//! searched for in the current column. The clock is passed in explicitly so
//! the host event loop decides when to poll.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::model::{DataType, Value};
use crate::sort::compare_values;

/// Default debounce delay between the last keystroke and the search.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(600);

/// A restartable single-shot deadline.
///
/// Starting a pending timer moves its deadline; it never queues a second
/// firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchTimer {
    deadline: Option<Instant>,
}

impl SearchTimer {
    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn start(&mut self, now: Instant, delay: Duration) {
        if self.deadline.is_some() {
            log::trace!("search timer restarted");
        }
        self.deadline = Some(now + delay);
    }

    /// Cancel the timer.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once, when the deadline has passed, and disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Search buffer plus its debounce timer.
#[derive(Debug, Clone)]
pub struct IncrementalSearch {
    buffer: String,
    timer: SearchTimer,
    delay: Duration,
}

impl Default for IncrementalSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl IncrementalSearch {
    pub fn new(delay: Duration) -> Self {
        Self {
            buffer: String::new(),
            timer: SearchTimer::default(),
            delay,
        }
    }

    /// The text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn timer(&self) -> &SearchTimer {
        &self.timer
    }

    /// Append a character and restart the deadline.
    pub fn push(&mut self, ch: char, now: Instant) {
        self.timer.stop();
        self.buffer.push(ch);
        self.timer.start(now, self.delay);
    }

    /// Drop the buffer and cancel the timer.
    pub fn abandon(&mut self) {
        self.buffer.clear();
        self.timer.stop();
    }

    /// Take the buffer if the deadline has passed.
    ///
    /// An expired timer with an empty buffer is cancelled and yields `None`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if !self.timer.fire(now) {
            return None;
        }
        let text = std::mem::take(&mut self.buffer);
        (!text.is_empty()).then_some(text)
    }
}

/// Convert the typed text into a value comparable with a column's values.
///
/// Numeric columns parse the text, substituting zero when it does not
/// parse. Every other column searches by text.
pub fn coerce_search_text(text: &str, kind: DataType) -> Value {
    let text = text.trim();
    match kind {
        DataType::Int => Value::Int(text.parse().unwrap_or(0)),
        DataType::Long => Value::Long(text.parse().unwrap_or(0)),
        DataType::Float => Value::Float(text.parse().unwrap_or(0.0)),
        DataType::Decimal => Value::Decimal(text.parse().unwrap_or(Decimal::ZERO)),
        _ => Value::String(text.to_string()),
    }
}

/// Find the row to land on for a search `target`.
///
/// The column's values are projected with their row indices, sorted, and
/// scanned for an equal value. In nearest mode a miss lands on the last row
/// whose value sorts below the target. Null values are never candidates.
/// Returns `None` when nothing matches.
pub fn find_row(
    values: &[Value],
    target: &Value,
    kind: DataType,
    case_sensitive: bool,
    nearest: bool,
) -> Option<usize> {
    // Text targets compare against the values' display text.
    let kind = if matches!(target, Value::String(_)) {
        DataType::String
    } else {
        kind
    };
    let mut rows: Vec<usize> = (0..values.len())
        .filter(|&i| !values[i].is_null())
        .collect();
    rows.sort_by(|&i, &j| compare_values(&values[i], &values[j], kind, case_sensitive));

    let mut candidate = None;
    for row in rows {
        match compare_values(&values[row], target, kind, case_sensitive) {
            std::cmp::Ordering::Equal => return Some(row),
            std::cmp::Ordering::Less => {
                if nearest {
                    candidate = Some(row);
                }
            }
            std::cmp::Ordering::Greater => break,
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_restart_moves_deadline() {
        let t0 = Instant::now();
        let mut timer = SearchTimer::default();
        timer.start(t0, Duration::from_millis(600));
        timer.start(t0 + Duration::from_millis(500), Duration::from_millis(600));
        assert!(!timer.fire(t0 + Duration::from_millis(700)));
        assert!(timer.fire(t0 + Duration::from_millis(1100)));
        assert!(!timer.fire(t0 + Duration::from_millis(1200)));
    }

    #[test]
    fn test_poll_takes_buffer_after_delay() {
        let t0 = Instant::now();
        let mut search = IncrementalSearch::default();
        search.push('a', t0);
        search.push('b', t0 + Duration::from_millis(100));
        assert_eq!(search.poll(t0 + Duration::from_millis(650)), None);
        assert_eq!(search.buffer(), "ab");
        assert_eq!(
            search.poll(t0 + Duration::from_millis(700)),
            Some("ab".to_string())
        );
        assert_eq!(search.buffer(), "");
        assert!(!search.timer().is_pending());
    }

    #[test]
    fn test_abandon_cancels() {
        let t0 = Instant::now();
        let mut search = IncrementalSearch::default();
        search.push('x', t0);
        search.abandon();
        assert_eq!(search.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_coercion_defaults_to_zero() {
        assert_eq!(coerce_search_text("42", DataType::Int), Value::Int(42));
        assert_eq!(coerce_search_text("4x", DataType::Int), Value::Int(0));
        assert_eq!(coerce_search_text("nope", DataType::Float), Value::Float(0.0));
        assert_eq!(coerce_search_text("ab", DataType::Date), Value::from("ab"));
    }

    #[test]
    fn test_exact_and_nearest() {
        let values = vec![Value::Int(30), Value::Int(10), Value::Int(20)];
        assert_eq!(find_row(&values, &Value::Int(20), DataType::Int, false, true), Some(2));
        assert_eq!(find_row(&values, &Value::Int(25), DataType::Int, false, true), Some(2));
        assert_eq!(find_row(&values, &Value::Int(25), DataType::Int, false, false), None);
        assert_eq!(find_row(&values, &Value::Int(5), DataType::Int, false, true), None);
        assert_eq!(find_row(&values, &Value::Int(99), DataType::Int, false, true), Some(0));
    }

    #[test]
    fn test_text_search_folds_case() {
        let values = vec![Value::from("Cherry"), Value::from("apple"), Value::from("Banana")];
        assert_eq!(
            find_row(&values, &Value::from("BANANA"), DataType::String, false, true),
            Some(2)
        );
        assert_eq!(
            find_row(&values, &Value::from("BANANA"), DataType::String, true, false),
            None
        );
        assert_eq!(
            find_row(&values, &Value::from("bz"), DataType::String, false, true),
            Some(2)
        );
    }

    #[test]
    fn test_nulls_are_skipped() {
        let values = vec![Value::Null, Value::Int(10)];
        assert_eq!(find_row(&values, &Value::Int(5), DataType::Int, false, true), None);
    }
}
