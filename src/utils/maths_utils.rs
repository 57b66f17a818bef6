/// Rounds `value` to `decimals` places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Smallest value in the slice. `None` when empty.
#[inline]
pub fn min_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Largest value in the slice. `None` when empty.
#[inline]
pub fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// The last `n` items (or fewer when the slice is shorter).
#[inline]
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_and_one_decimals() {
        assert_eq!(round_to(144.4775, 2), 144.48);
        assert_eq!(round_to(5.44, 1), 5.4);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(7.0, 2), 7.0);
    }

    #[test]
    fn min_max_of_slices() {
        assert_eq!(min_of(&[3.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(max_of(&[3.0, 1.0, 2.0]), Some(3.0));
        assert_eq!(min_of(&[]), None);
    }

    #[test]
    fn tail_clamps_to_length() {
        assert_eq!(tail(&[1, 2, 3, 4], 2), &[3, 4]);
        assert_eq!(tail(&[1, 2], 3), &[1, 2]);
        assert!(tail::<i32>(&[], 3).is_empty());
    }
}
