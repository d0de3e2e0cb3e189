//! FFT-based Spectral Features

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of dominant components reported
pub const DEFAULT_TOP_K: usize = 3;

/// Added to total power before normalizing the PSD into a distribution
pub const PSD_NORM_EPSILON: f64 = 1e-9;

/// One dominant frequency component
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralComponent {
    /// Magnitude of the DFT coefficient
    pub amplitude: f64,
    /// Normalized frequency in cycles per sample (bin / n)
    pub frequency: f64,
}

/// Frequency domain descriptors of one sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    /// Dominant components, strongest first
    pub components: Vec<SpectralComponent>,
    /// Sum of the power spectral density over all bins
    pub total_power: f64,
    /// Shannon entropy (nats) of the normalized PSD
    pub spectral_entropy: f64,
    /// Power in bins below the midpoint bin
    pub low_freq_power: f64,
    /// Power from the midpoint bin upward
    pub high_freq_power: f64,
}

/// Spectral feature extractor over real-valued sequences
///
/// Holds an FFT planner so repeated sequences of the same length reuse one
/// plan. Not shared between threads; create one per worker.
pub struct SpectralExtractor {
    /// FFT planner for efficient computation
    planner: FftPlanner<f64>,
    /// Number of dominant components to report
    top_k: usize,
}

impl SpectralExtractor {
    /// Create a new extractor reporting `top_k` components
    pub fn new(top_k: usize) -> Self {
        Self {
            planner: FftPlanner::new(),
            top_k,
        }
    }

    /// Number of components requested per sequence
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Number of real-input DFT bins for a sequence of length `n`
    pub fn bin_count(n: usize) -> usize {
        if n == 0 {
            0
        } else {
            n / 2 + 1
        }
    }

    /// Magnitudes of the non-negative frequency bins of the detrended sequence
    pub fn amplitudes(&mut self, sequence: &[f64]) -> Vec<f64> {
        let n = sequence.len();
        if n == 0 {
            return Vec::new();
        }

        // Remove the DC offset
        let mean = sequence.iter().sum::<f64>() / n as f64;
        let mut buffer: Vec<Complex<f64>> = sequence
            .iter()
            .map(|&v| Complex::new(v - mean, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        buffer
            .iter()
            .take(Self::bin_count(n))
            .map(|c| c.norm())
            .collect()
    }

    /// Compute spectral features from a sequence
    pub fn extract(&mut self, sequence: &[f64]) -> SpectralFeatures {
        if sequence.is_empty() {
            return SpectralFeatures::default();
        }

        let n = sequence.len() as f64;
        let amplitudes = self.amplitudes(sequence);
        let bins = amplitudes.len();

        let k = self.top_k.min(bins);
        if k < self.top_k {
            debug!("top_k {} clamped to {} available bins", self.top_k, bins);
        }

        // Stable sort keeps the lower bin first among equal amplitudes
        let mut order: Vec<usize> = (0..bins).collect();
        order.sort_by(|&a, &b| amplitudes[b].total_cmp(&amplitudes[a]));

        let components = order
            .iter()
            .take(k)
            .map(|&idx| SpectralComponent {
                amplitude: amplitudes[idx],
                frequency: idx as f64 / n,
            })
            .collect();

        let psd: Vec<f64> = amplitudes.iter().map(|a| a * a).collect();
        let total_power: f64 = psd.iter().sum();

        let spectral_entropy = psd
            .iter()
            .map(|p| p / (total_power + PSD_NORM_EPSILON))
            .filter(|&p| p > 0.0)
            .map(|p| -p * p.ln())
            .sum();

        let mid = bins / 2;
        let low_freq_power = psd[..mid].iter().sum();
        let high_freq_power = psd[mid..].iter().sum();

        SpectralFeatures {
            components,
            total_power,
            spectral_entropy,
            low_freq_power,
            high_freq_power,
        }
    }
}

impl Default for SpectralExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}
