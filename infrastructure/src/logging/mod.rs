//! Logging infrastructure: persisted dead letters.
//!
//! Provides [`JsonlDeadLetterLog`], a JSONL file writer that implements
//! the [`DeadLetterSink`](blueprint_application::DeadLetterSink) port.

mod dead_letter_log;

pub use dead_letter_log::{JsonlDeadLetterLog, RECORD_TYPE};
