//! Column events and observers.
//!
//! Columns report notable but non-fatal conditions to an optional [`ColumnObserver`]:
//! precision boundaries crossed while coercing floats into decimals, rejected input, and bulk
//! assignments. Errors are still returned to the caller; observers only watch.

use std::fmt;
use std::sync::Arc;

/// Severity classification for [`ColumnEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// The operation failed and returned an error.
    Error,
}

/// Events emitted by a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnEvent {
    /// A binary float was converted into an exact decimal (or a decimal/wide integer into a
    /// double). The nearest representable value was stored.
    PrecisionBoundary {
        column: String,
        row: usize,
        input: String,
    },
    /// Input was rejected; the column is unchanged.
    ParseRejected {
        column: String,
        row: usize,
        error: String,
    },
    /// A predicate-driven assignment replaced `rows` cells.
    BulkAssigned { column: String, rows: usize },
}

impl ColumnEvent {
    /// Severity classification of this event.
    pub fn severity(&self) -> ColumnSeverity {
        match self {
            Self::PrecisionBoundary { .. } => ColumnSeverity::Warning,
            Self::ParseRejected { .. } => ColumnSeverity::Error,
            Self::BulkAssigned { .. } => ColumnSeverity::Info,
        }
    }

    /// Name of the column that emitted the event.
    pub fn column(&self) -> &str {
        match self {
            Self::PrecisionBoundary { column, .. }
            | Self::ParseRejected { column, .. }
            | Self::BulkAssigned { column, .. } => column,
        }
    }
}

/// Observer interface for column events.
///
/// Implementors can record metrics or logs.
pub trait ColumnObserver: Send + Sync {
    /// Called once per event. The default does nothing.
    fn on_event(&self, _event: &ColumnEvent) {}
}

/// An observer that fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ColumnObserver>>,
}

impl CompositeObserver {
    /// Fan events out to `observers`, in order.
    pub fn new(observers: Vec<Arc<dyn ColumnObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ColumnObserver for CompositeObserver {
    fn on_event(&self, event: &ColumnEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Logs column events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver {
    /// Events below this severity are dropped.
    pub min_severity: Option<ColumnSeverity>,
}

impl ColumnObserver for StdErrObserver {
    fn on_event(&self, event: &ColumnEvent) {
        let severity = event.severity();
        if self.min_severity.is_some_and(|min| severity < min) {
            return;
        }
        match event {
            ColumnEvent::PrecisionBoundary { column, row, input } => eprintln!(
                "[column][{severity:?}] column={column} row={row} precision boundary input={input}"
            ),
            ColumnEvent::ParseRejected { column, row, error } => {
                eprintln!("[column][{severity:?}] column={column} row={row} err={error}")
            }
            ColumnEvent::BulkAssigned { column, rows } => {
                eprintln!("[column][{severity:?}] column={column} bulk assigned rows={rows}")
            }
        }
    }
}
