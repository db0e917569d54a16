//! Pure calculation functions for border dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::error::BorderError;
use super::params::BorderPercent;

/// Calculate the border thickness in pixels for a validated percentage.
///
/// `floor(max(width, height) * percent / 100)`, computed in integers so the
/// result never depends on float rounding.
///
/// # Examples
/// ```
/// # use simple_border::imaging::{BorderPercent, calculate_border_width};
/// let five = BorderPercent::new(5).unwrap();
/// assert_eq!(calculate_border_width(five, (1000, 2000)), 100);
/// assert_eq!(calculate_border_width(five, (19, 10)), 0);
/// ```
pub fn calculate_border_width(percent: BorderPercent, dimensions: (u32, u32)) -> u32 {
    let (width, height) = dimensions;
    let longest = u64::from(width.max(height));
    // percent <= 20, so the result is at most a fifth of a u32
    (longest * u64::from(percent.value()) / 100) as u32
}

/// Calculate the border thickness from a raw percentage.
///
/// Rejects percentages outside 1–20 with [`BorderError::InvalidParameter`].
pub fn border_width(percentage: u32, dimensions: (u32, u32)) -> Result<u32, BorderError> {
    let percent = BorderPercent::new(percentage)?;
    Ok(calculate_border_width(percent, dimensions))
}

/// Dimensions of an image after padding every edge by `border` pixels.
pub fn bordered_dimensions(dimensions: (u32, u32), border: u32) -> (u32, u32) {
    let (width, height) = dimensions;
    (width + 2 * border, height + 2 * border)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::{MAX_PERCENT, MIN_PERCENT};

    #[test]
    fn one_percent_of_portrait_long_edge() {
        assert_eq!(border_width(1, (1000, 2000)).unwrap(), 20);
    }

    #[test]
    fn twenty_percent_of_portrait_long_edge() {
        assert_eq!(border_width(20, (1000, 2000)).unwrap(), 400);
    }

    #[test]
    fn landscape_uses_width() {
        assert_eq!(border_width(5, (4032, 3024)).unwrap(), 201);
    }

    #[test]
    fn result_is_floored() {
        // 7% of 333 = 23.31
        assert_eq!(border_width(7, (333, 100)).unwrap(), 23);
        // 1% of 99 = 0.99
        assert_eq!(border_width(1, (99, 99)).unwrap(), 0);
    }

    #[test]
    fn matches_formula_across_range() {
        let sizes = [(1, 1), (640, 480), (480, 640), (1000, 2000), (4097, 17)];
        for percentage in MIN_PERCENT..=MAX_PERCENT {
            for (w, h) in sizes {
                let expected = w.max(h) * percentage / 100;
                let border = border_width(percentage, (w, h)).unwrap();
                assert_eq!(border, expected, "p={percentage} dims={w}x{h}");
                assert_eq!(
                    bordered_dimensions((w, h), border),
                    (w + 2 * expected, h + 2 * expected)
                );
            }
        }
    }

    #[test]
    fn large_dimensions_do_not_overflow() {
        assert_eq!(border_width(20, (u32::MAX, 1)).unwrap(), 858_993_459);
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        assert!(matches!(
            border_width(0, (100, 100)),
            Err(BorderError::InvalidParameter(_))
        ));
        assert!(matches!(
            border_width(21, (100, 100)),
            Err(BorderError::InvalidParameter(_))
        ));
    }

    #[test]
    fn zero_border_keeps_dimensions() {
        assert_eq!(bordered_dimensions((640, 480), 0), (640, 480));
    }
}
