//! Lane detector orchestrating the per-frame estimation pipeline.
//!
//! Overview
//! - Thresholds the RGB frame into a binary lane-evidence mask.
//! - Rectifies the mask to a bird's-eye view with a fixed homography pair.
//! - Locates lane pixels: histogram-seeded sliding windows on a cold start,
//!   a margin band around the averaged recent fit while tracking, with a
//!   silent fallback to the blind search when the band runs dry.
//! - Fits a quadratic x = f(y) per lane and derives curvature radius and
//!   the vehicle's lateral offset in meters.
//! - Pushes successful fits into a bounded history; evidence dropouts carry
//!   the smoothed previous fit forward instead of failing the stream.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the main [`LaneDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::LaneParams;
pub use pipeline::LaneDetector;
