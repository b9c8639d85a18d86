//! Frequency-domain transforms with per-thread plan caching.
//!
//! `FftPlanner` memoises plans by length, so each worker thread pays the
//! planning cost once per dimension. Callers see pure functions.

use std::cell::RefCell;

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::FftPlanner;

thread_local! {
    static PLANNER: RefCell<FftPlanner<f64>> = RefCell::new(FftPlanner::new());
}

/// Forward transform of a signal. Returns the unnormalised spectrum.
pub fn forward(signal: &Array1<Complex64>) -> Vec<Complex64> {
    let mut buffer = signal.to_vec();
    if buffer.is_empty() {
        return buffer;
    }
    let fft = PLANNER.with(|planner| planner.borrow_mut().plan_fft_forward(buffer.len()));
    fft.process(&mut buffer);
    buffer
}

/// Inverse transform, scaled by `1/n` so that `inverse(forward(x)) == x`.
pub fn inverse(mut spectrum: Vec<Complex64>) -> Array1<Complex64> {
    let n = spectrum.len();
    if n == 0 {
        return Array1::from_vec(spectrum);
    }
    let ifft = PLANNER.with(|planner| planner.borrow_mut().plan_fft_inverse(n));
    ifft.process(&mut spectrum);
    let scale = 1.0 / n as f64;
    for c in spectrum.iter_mut() {
        *c *= scale;
    }
    Array1::from_vec(spectrum)
}
