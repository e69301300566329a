use ndarray::{Array2, Axis};
use rustfft::num_complex::Complex;
use tracing::debug;

use crate::fingerprint::common::error::Result;
use crate::fingerprint::crossing::crossing_indices;

/// Gap-encodes the zero crossings of a column-wise spectrum.
///
/// The imaginary parts are summed across columns into one signal over rows,
/// its robust crossings are located with the given window, and the distance
/// between each pair of consecutive crossings is returned.
pub fn encode_crossings(spectrum: &Array2<Complex<f64>>, window: usize) -> Result<Vec<usize>> {
    let signal: Vec<f64> = spectrum
        .axis_iter(Axis(0))
        .map(|row| row.iter().map(|value| value.im).sum::<f64>())
        .collect();

    let crossings = crossing_indices(&signal, window)?;
    debug!(rows = signal.len(), crossings = crossings.len(), "Located crossings");

    Ok(crossings.windows(2).map(|pair| pair[1] - pair[0]).collect())
}
