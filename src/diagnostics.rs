use std::sync::atomic::{AtomicBool, Ordering};

use super::number::Number;

/// Reported when a number could not be written exactly.
///
/// Bencode has no floating point representation, so fractional values are
/// truncated and very large magnitudes wrap. The coerced value is still
/// written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truncation {
    pub original: Number,
    pub coerced: i64,
}

/// Receives [`Truncation`] events from an [`Encoder`](crate::Encoder).
///
/// Any `Fn(&Truncation)` closure is a sink.
///
/// # Examples
///
/// ```
/// use rbencode::{Encoder, Truncation, Value};
/// use std::cell::RefCell;
///
/// let seen = RefCell::new(Vec::new());
/// let mut encoder = Encoder::with_sink(|t: &Truncation| seen.borrow_mut().push(t.coerced));
///
/// assert_eq!(encoder.encode(&Value::Float(2.5)).unwrap(), b"i2e");
/// assert_eq!(encoder.encode(&Value::Float(7.25)).unwrap(), b"i7e");
/// assert_eq!(*seen.borrow(), vec![2, 7]);
/// ```
pub trait TruncationSink {
    fn truncated(&self, event: &Truncation);
}

impl<F> TruncationSink for F
where
    F: Fn(&Truncation),
{
    fn truncated(&self, event: &Truncation) {
        self(event)
    }
}

static WARNED: AtomicBool = AtomicBool::new(false);

/// Default sink: logs the first truncation in the process as a warning and
/// ignores the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnOnce;

impl TruncationSink for WarnOnce {
    fn truncated(&self, event: &Truncation) {
        if WARNED.swap(true, Ordering::Relaxed) {
            return;
        }
        tracing::warn!(
            original = %event.original,
            coerced = event.coerced,
            "possible data corruption: bencode only supports integers, value was converted"
        );
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl TruncationSink for Silent {
    fn truncated(&self, _event: &Truncation) {}
}
