use ndarray::Array2;
use rustfft::{num_complex::Complex64, FftPlanner};
use crate::drivers::config::MelParams;
use crate::drivers::mel;
/// Magnitude of a full-length transform over the non-negative frequencies.
#[derive(Clone, Debug, PartialEq)]
pub struct MagnitudeSpectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}
impl MagnitudeSpectrum {
    /// Frequency of the strongest bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| self.frequencies_hz[idx])
    }
}
/// Numeric back-end for the renderers.
pub trait SpectralTransform {
    fn magnitude_spectrum(&self, samples: &[f64], sample_rate_hz: f64) -> MagnitudeSpectrum;
    /// Mel power grid shaped `(n_mels, frames)`.
    fn mel_power(&self, samples: &[f64], sample_rate_hz: f64, params: &MelParams) -> Array2<f64>;
}
/// `SpectralTransform` on top of rustfft.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustFftTransform;
impl SpectralTransform for RustFftTransform {
    fn magnitude_spectrum(&self, samples: &[f64], sample_rate_hz: f64) -> MagnitudeSpectrum {
        let frequencies_hz = nonnegative_frequencies(samples.len(), sample_rate_hz);
        if samples.is_empty() {
            return MagnitudeSpectrum {
                frequencies_hz,
                magnitudes: Vec::new(),
            };
        }
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(samples.len());
        let mut buffer: Vec<Complex64> = samples
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        fft.process(&mut buffer);
        let magnitudes = buffer
            .iter()
            .take(frequencies_hz.len())
            .map(|c| c.norm())
            .collect();
        MagnitudeSpectrum {
            frequencies_hz,
            magnitudes,
        }
    }
    fn mel_power(&self, samples: &[f64], sample_rate_hz: f64, params: &MelParams) -> Array2<f64> {
        let power = stft_power(samples, params.n_fft, params.hop_length);
        let filterbank = mel::mel_filterbank(
            sample_rate_hz,
            params.n_fft,
            params.n_mels,
            params.fmin_hz,
            params.fmax_for(sample_rate_hz),
        );
        filterbank.dot(&power)
    }
}
/// Non-negative bins of a length-`n` transform, `k * rate / n` for `k in 0..=(n-1)/2`.
///
/// For even `n` the Nyquist bin counts as negative and is left out.
pub fn nonnegative_frequencies(n: usize, sample_rate_hz: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let bin_width = sample_rate_hz / n as f64;
    (0..=(n - 1) / 2).map(|k| k as f64 * bin_width).collect()
}
/// Periodic Hann window.
pub fn hann_window(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| 0.5 - 0.5 * (2.0 * std::f64::consts::PI * n as f64 / len as f64).cos())
        .collect()
}
/// Power spectrogram `|STFT|^2` shaped `(1 + n_fft/2, frames)`.
///
/// Frames are centred: the signal is zero-padded by `n_fft/2` on both sides,
/// which yields `1 + len / hop` frames.
pub fn stft_power(samples: &[f64], n_fft: usize, hop: usize) -> Array2<f64> {
    let pad = n_fft / 2;
    let mut padded = vec![0.0; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);
    let frames = match padded.len().checked_sub(n_fft) {
        Some(spare) => 1 + spare / hop,
        None => 0,
    };
    let bins = 1 + n_fft / 2;
    let window = hann_window(n_fft);
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut power = Array2::<f64>::zeros((bins, frames));
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_fft];
    for frame in 0..frames {
        let start = frame * hop;
        for (slot, (&x, &w)) in buffer
            .iter_mut()
            .zip(padded[start..start + n_fft].iter().zip(&window))
        {
            *slot = Complex64::new(x * w, 0.0);
        }
        fft.process(&mut buffer);
        for (bin, value) in buffer.iter().take(bins).enumerate() {
            power[[bin, frame]] = value.norm_sqr();
        }
    }
    power
}
