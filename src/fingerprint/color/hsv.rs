/// Converts one RGB triplet to `[hue, saturation, value]`.
///
/// Value is the largest channel, saturation is chroma over value, and hue is
/// expressed as a fraction of a full turn in `[0, 1)`. Inputs are not assumed
/// to be in `[0, 1]`; value carries the input's own scale.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let saturation = if max > 0.0 { chroma / max } else { 0.0 };

    let hue = if chroma > 0.0 {
        let sector = if r == max {
            (g - b) / chroma
        } else if g == max {
            2.0 + (b - r) / chroma
        } else {
            4.0 + (r - g) / chroma
        };
        let turn = sector / 6.0;
        if turn < 0.0 { turn + 1.0 } else { turn }
    } else {
        0.0
    };

    [hue, saturation, max]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_hsv(actual: [f64; 3], expected: [f64; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_primaries() {
        assert_hsv(rgb_to_hsv(1.0, 0.0, 0.0), [0.0, 1.0, 1.0]);
        assert_hsv(rgb_to_hsv(0.0, 1.0, 0.0), [1.0 / 3.0, 1.0, 1.0]);
        assert_hsv(rgb_to_hsv(0.0, 0.0, 1.0), [2.0 / 3.0, 1.0, 1.0]);
    }

    #[test]
    fn test_magenta_wraps_hue() {
        assert_hsv(rgb_to_hsv(1.0, 0.0, 0.5), [11.0 / 12.0, 1.0, 1.0]);
    }

    #[test]
    fn test_greys_have_no_hue_or_saturation() {
        assert_hsv(rgb_to_hsv(0.4, 0.4, 0.4), [0.0, 0.0, 0.4]);
        assert_hsv(rgb_to_hsv(0.0, 0.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_value_keeps_input_scale() {
        assert_hsv(rgb_to_hsv(200.0, 100.0, 0.0), [1.0 / 12.0, 1.0, 200.0]);
    }
}
