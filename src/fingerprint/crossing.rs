//! Robust zero-crossing detection over a 1-D signal.
//!
//! Works on any real sequence; the legacy fingerprint feeds it the row-wise
//! sum of an FFT's imaginary parts, but nothing here is image specific.

use tracing::warn;

use crate::fingerprint::common::error::{FingerprintError, Result};

/// Flags the start of every robust sign change in `signal`.
///
/// A sign change is measured between `signal[i]` and `signal[i - window]`.
/// Positions reaching the largest change are candidate flips, and a
/// candidate run of `window - 1` followed by a non-candidate marks a
/// confirmed crossing at the start of the run.
///
/// Returns a flag per input sample. A signal shorter than `window` yields all
/// `false` with a warning; `window == 0` is an error.
pub fn detect_crossings(signal: &[f64], window: usize) -> Result<Vec<bool>> {
    if window < 1 {
        return Err(FingerprintError::InvalidWindow(window));
    }

    let len = signal.len();
    if len < window {
        warn!(len, window, "Signal shorter than crossing window, no crossings reported");
        return Ok(vec![false; len]);
    }

    let magnitudes: Vec<i8> = (0..len)
        .map(|i| {
            if i < window {
                0
            } else {
                (sign(signal[i]) - sign(signal[i - window])).abs()
            }
        })
        .collect();

    let peak = magnitudes.iter().copied().max().unwrap_or(0);
    let candidates: Vec<bool> = magnitudes.iter().map(|&m| m == peak).collect();

    let mut crossings = vec![false; len];

    // A flip everywhere carries no structure: report none.
    if candidates.iter().all(|&c| c) {
        return Ok(crossings);
    }

    for (start, run) in candidates.windows(window).enumerate() {
        if let Some((settle, lead)) = run.split_last() {
            if lead.iter().all(|&c| c) && !settle {
                crossings[start] = true;
            }
        }
    }

    Ok(crossings)
}

/// Positions flagged by `detect_crossings`.
pub fn crossing_indices(signal: &[f64], window: usize) -> Result<Vec<usize>> {
    let flags = detect_crossings(signal, window)?;
    Ok(flags
        .iter()
        .enumerate()
        .filter_map(|(i, &flag)| flag.then_some(i))
        .collect())
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ramp() -> Vec<f64> {
        (-7..=8).map(f64::from).collect()
    }

    #[test]
    fn test_single_sign_change_is_detected_once() {
        let crossings = crossing_indices(&ramp(), 3).unwrap();

        // Zero sits at index 7; the first fully positive lag comparison starts at 8.
        assert_eq!(crossings, vec![8]);
    }

    #[test]
    fn test_output_has_input_length() {
        let flags = detect_crossings(&ramp(), 3).unwrap();
        assert_eq!(flags.len(), 16);
    }

    #[test]
    fn test_periodic_signal_crosses_every_period() {
        let signal: Vec<f64> = [-1.0, 0.0, 1.0].repeat(6);

        let crossings = crossing_indices(&signal, 2).unwrap();

        assert_eq!(crossings, vec![2, 5, 8, 11, 14]);
        let gaps: Vec<usize> = crossings.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps.iter().all(|&gap| gap == 3));
    }

    #[test]
    fn test_period_matching_window_sees_no_change() {
        let signal: Vec<f64> = [-1.0, 0.0, 1.0].repeat(6);

        assert!(crossing_indices(&signal, 3).unwrap().is_empty());
    }

    #[test]
    fn test_constant_sign_has_no_crossings() {
        let signal = vec![0.5, 3.0, 1.0, 7.0, 2.0, 9.0, 4.0];
        for window in 1..=signal.len() {
            assert!(
                crossing_indices(&signal, window).unwrap().is_empty(),
                "window {window}"
            );
        }
    }

    #[test]
    fn test_zero_window_is_rejected() {
        assert!(matches!(
            detect_crossings(&ramp(), 0),
            Err(FingerprintError::InvalidWindow(0))
        ));
    }

    #[test]
    fn test_short_signal_is_all_false() {
        let flags = detect_crossings(&[1.0, -1.0], 3).unwrap();
        assert_eq!(flags, vec![false, false]);

        assert!(detect_crossings(&[], 1).unwrap().is_empty());
    }
}
