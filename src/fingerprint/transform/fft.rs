use ndarray::{Array2, Axis};
use rustfft::{FftPlanner, num_complex::Complex};

use crate::fingerprint::transform::rounding::round_significant;

/// Forward FFT of every column of `matrix` (over the row dimension).
///
/// Real and imaginary parts are rounded to `digits` significant digits.
pub fn column_fft(matrix: &Array2<f64>, digits: u32) -> Array2<Complex<f64>> {
    let (rows, cols) = matrix.dim();
    let mut spectrum = Array2::from_elem((rows, cols), Complex::new(0.0, 0.0));
    if rows == 0 {
        return spectrum;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(rows);
    let mut buffer = vec![Complex::new(0.0, 0.0); rows];

    for (column, mut out) in matrix.axis_iter(Axis(1)).zip(spectrum.axis_iter_mut(Axis(1))) {
        for (slot, &sample) in buffer.iter_mut().zip(column.iter()) {
            *slot = Complex::new(sample, 0.0);
        }
        fft.process(&mut buffer);
        for (dst, value) in out.iter_mut().zip(buffer.iter()) {
            *dst = Complex::new(round_significant(value.re, digits), round_significant(value.im, digits));
        }
    }

    spectrum
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_constant_column_concentrates_in_dc() {
        let matrix = Array2::from_elem((8, 2), 1.5);

        let spectrum = column_fft(&matrix, 8);

        assert_eq!(spectrum.dim(), (8, 2));
        for col in 0..2 {
            assert!((spectrum[[0, col]] - Complex::new(12.0, 0.0)).norm() < 1e-12);
            for row in 1..8 {
                assert!(spectrum[[row, col]].norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_columns_are_transformed_independently() {
        let rows = 16;
        let matrix = Array2::from_shape_fn((rows, 2), |(r, c)| {
            if c == 0 {
                (2.0 * PI * r as f64 / rows as f64).sin()
            } else {
                0.0
            }
        });

        let spectrum = column_fft(&matrix, 8);

        // A unit sine at bin 1 puts -N/2 on the imaginary axis of bin 1.
        assert!((spectrum[[1, 0]].im + rows as f64 / 2.0).abs() < 1e-6);
        assert!((spectrum[[rows - 1, 0]].im - rows as f64 / 2.0).abs() < 1e-6);
        assert!(spectrum.column(1).iter().all(|v| v.norm() == 0.0));
    }

    #[test]
    fn test_matches_naive_dft() {
        let samples = [0.9, -0.1, 0.4, 0.4, -1.3, 2.2, 0.0];
        let matrix = Array2::from_shape_vec((samples.len(), 1), samples.to_vec()).unwrap();

        let spectrum = column_fft(&matrix, 12);

        let n = samples.len() as f64;
        for k in 0..samples.len() {
            let expected: Complex<f64> = samples
                .iter()
                .enumerate()
                .map(|(t, &x)| Complex::from_polar(x, -2.0 * PI * k as f64 * t as f64 / n))
                .sum();
            assert!((spectrum[[k, 0]] - expected).norm() < 1e-9);
        }
    }
}
