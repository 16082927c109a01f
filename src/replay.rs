//! Event file replay
//!
//! Feeds a file of JSON events (array, single object, or one object per
//! line) through the reducer.

use std::path::Path;

use crate::decode;
use crate::reducer::{BatchReport, Reducer};

/// Replay every event in `path` into `reducer`
pub fn replay_file(reducer: &mut Reducer, path: &Path) -> std::io::Result<BatchReport> {
    let contents = std::fs::read_to_string(path)?;
    let report = reducer.ingest_batch(decode::decode_batch(&contents));

    tracing::info!(
        path = %path.display(),
        accepted = report.accepted,
        decode_errors = report.decode_errors,
        data_errors = report.data_errors,
        "Replayed event file"
    );

    Ok(report)
}
