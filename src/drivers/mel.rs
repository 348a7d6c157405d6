//! Mel scale helpers.
//!
//! The scale is the Slaney variant: linear up to 1 kHz (200/3 Hz per mel),
//! logarithmic above with 27 mels per factor of 6.4. Filterbank rows are
//! triangular and area-normalised, so wider bands are not louder.
use ndarray::Array2;
const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;
fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}
/// `n` centre frequencies evenly spaced in mel between `fmin_hz` and `fmax_hz`.
pub fn mel_frequencies(n: usize, fmin_hz: f64, fmax_hz: f64) -> Vec<f64> {
    linspace(hz_to_mel(fmin_hz), hz_to_mel(fmax_hz), n)
        .into_iter()
        .map(mel_to_hz)
        .collect()
}
/// Triangular mel filterbank, shaped `(n_mels, 1 + n_fft/2)`.
pub fn mel_filterbank(
    sample_rate_hz: f64,
    n_fft: usize,
    n_mels: usize,
    fmin_hz: f64,
    fmax_hz: f64,
) -> Array2<f64> {
    let bins = 1 + n_fft / 2;
    let fft_freqs = linspace(0.0, sample_rate_hz / 2.0, bins);
    let edges = mel_frequencies(n_mels + 2, fmin_hz, fmax_hz);
    let mut weights = Array2::<f64>::zeros((n_mels, bins));
    for band in 0..n_mels {
        let (left, centre, right) = (edges[band], edges[band + 1], edges[band + 2]);
        let rising = centre - left;
        let falling = right - centre;
        let enorm = 2.0 / (right - left);
        for (bin, &freq) in fft_freqs.iter().enumerate() {
            let lower = (freq - left) / rising;
            let upper = (right - freq) / falling;
            let weight = lower.min(upper).max(0.0);
            weights[[band, bin]] = weight * enorm;
        }
    }
    weights
}
/// Power to decibels relative to the grid's own maximum.
///
/// Values are floored at `amin` before the logarithm and, when `top_db` is
/// set, clipped to at most `top_db` below the peak. The result is always <= 0.
pub fn power_to_db(power: &Array2<f64>, amin: f64, top_db: Option<f64>) -> Array2<f64> {
    let reference = power.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let ref_db = 10.0 * reference.abs().max(amin).log10();
    let mut db = power.mapv(|p| 10.0 * p.max(amin).log10() - ref_db);
    if let Some(top_db) = top_db {
        let peak = db.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let floor = peak - top_db;
        db.mapv_inplace(|v| v.max(floor));
    }
    db
}
/// Start time of each frame in seconds.
pub fn frames_to_time(frames: usize, hop: usize, sample_rate_hz: f64) -> Vec<f64> {
    (0..frames)
        .map(|frame| (frame * hop) as f64 / sample_rate_hz)
        .collect()
}
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
