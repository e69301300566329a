//! Bilinear resampling to a fixed grid.

use ndarray::{Array2, Array3, Axis};

/// Side length of the grid fed to the DCT
pub const DCT_GRID: usize = 64;

/// Bilinear resampler to a fixed `rows × cols` target.
///
/// Target pixel centres are mapped back onto the source grid; the four
/// nearest source samples are blended by proximity and coordinates beyond
/// the source are clamped to its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BilinearResampler {
    rows: usize,
    cols: usize,
}

impl Default for BilinearResampler {
    fn default() -> Self {
        Self::square(DCT_GRID)
    }
}

impl BilinearResampler {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Resamples every channel of `image` independently.
    pub fn resample(&self, image: &Array3<f64>) -> Array3<f64> {
        let (src_rows, src_cols, channels) = image.dim();
        let mut output = Array3::zeros((self.rows, self.cols, channels));
        if src_rows == 0 || src_cols == 0 {
            return output;
        }

        let row_taps = taps(src_rows, self.rows);
        let col_taps = taps(src_cols, self.cols);

        for (ch, mut plane) in output.axis_iter_mut(Axis(2)).enumerate() {
            let source = image.index_axis(Axis(2), ch);
            for (r, &(r0, r1, fr)) in row_taps.iter().enumerate() {
                for (c, &(c0, c1, fc)) in col_taps.iter().enumerate() {
                    let top = source[[r0, c0]] * (1.0 - fc) + source[[r0, c1]] * fc;
                    let bottom = source[[r1, c0]] * (1.0 - fc) + source[[r1, c1]] * fc;
                    plane[[r, c]] = top * (1.0 - fr) + bottom * fr;
                }
            }
        }

        output
    }

    pub fn resample_matrix(&self, matrix: &Array2<f64>) -> Array2<f64> {
        let stacked = matrix.view().insert_axis(Axis(2));
        self.resample(&stacked.to_owned()).index_axis_move(Axis(2), 0)
    }
}

/// For each target index: the two neighbouring source indices and the weight of the second.
fn taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f64)> {
    let scale = src_len as f64 / dst_len as f64;
    let last = (src_len - 1) as f64;

    (0..dst_len)
        .map(|i| {
            let position = ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, last);
            let lower = position.floor();
            let i0 = lower as usize;
            let i1 = (i0 + 1).min(src_len - 1);
            (i0, i1, position - lower)
        })
        .collect()
}
