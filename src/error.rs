use crate::types::LaneSide;
use thiserror::Error;

/// Failures the per-frame core can surface.
///
/// `InsufficientLaneEvidence` is frame-local and recoverable: once at least
/// one fit has landed in history, the pipeline answers it by carrying the
/// smoothed previous fit forward. `Config` is fatal and only occurs while
/// constructing a detector.
#[derive(Debug, Error)]
pub enum LaneError {
    #[error("{side:?} lane yielded {points} pixels, need at least 3 for a quadratic fit")]
    InsufficientLaneEvidence { side: LaneSide, points: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}
