//! Feature Engineering Engine
//!
//! Statistical, calendar and frequency domain features computed over a
//! lookback window of daily usage totals.

mod features;
mod fft;
mod statistics;

pub use features::CalendarFeatures;
pub use fft::{SpectralComponent, SpectralExtractor, SpectralFeatures, DEFAULT_TOP_K, PSD_NORM_EPSILON};
pub use statistics::WindowStatistics;
