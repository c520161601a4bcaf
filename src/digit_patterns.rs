//! Digit shape definitions using analog clock hand positions.
//!
//! Each digit 0-9 is drawn on a 6x4 grid (6 rows, 4 columns) of small analog
//! clocks. Clocks that form part of the glyph point their hands along the
//! glyph's strokes; every other clock sits in the [`HandPair::REST`] pose.
//!
//! # Angle Convention
//! - 0° = 3 o'clock
//! - 90° = 12 o'clock
//! - 180° = 9 o'clock
//! - 270° = 6 o'clock
//!
//! # Rest Position
//! Background clocks fold both hands onto the shared 225° corner (towards
//! 7:30), which reads as "off".

use serde::Serialize;

use crate::error::ClockError;

/// Number of clock rows in one digit glyph.
pub const GRID_ROWS: usize = 6;

/// Number of clock columns in one digit glyph.
pub const GRID_COLUMNS: usize = 4;

/// The two hands of one miniature analog clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandPair {
    /// Hour hand angle in degrees, `[0, 360)`
    pub hour: f64,
    /// Minute hand angle in degrees, `[0, 360)`
    pub minute: f64,
}

impl HandPair {
    pub const fn new(hour: f64, minute: f64) -> Self {
        HandPair { hour, minute }
    }

    /// Resting pose for clocks that are not part of a glyph.
    pub const REST: Self = HandPair {
        hour: 225.0,
        minute: 225.0,
    };

    /// Whether this clock is drawing part of a glyph.
    pub fn is_lit(&self) -> bool {
        *self != Self::REST
    }
}

/// A digit glyph as a grid of hand pairs, indexed `[row][column]`.
pub type DigitGrid = [[HandPair; GRID_COLUMNS]; GRID_ROWS];

const fn p(hour: u16, minute: u16) -> HandPair {
    HandPair::new(hour as f64, minute as f64)
}

const X: HandPair = HandPair::REST;

// Corner and stroke pieces, named by the directions the two hands point
const RIGHT_DOWN: HandPair = p(0, 270);
const RIGHT_LEFT: HandPair = p(0, 180);
const LEFT_DOWN: HandPair = p(180, 270);
const UP_DOWN: HandPair = p(90, 270);
const RIGHT_UP: HandPair = p(0, 90);
const UP_LEFT: HandPair = p(90, 180);

/// Returns the clock grid for a given digit.
///
/// # Errors
/// [`ClockError::InvalidDigit`] if `digit` is greater than 9.
pub fn lookup(digit: u32) -> Result<&'static DigitGrid, ClockError> {
    DIGITS
        .get(digit as usize)
        .ok_or(ClockError::InvalidDigit { digit })
}

static DIGITS: [DigitGrid; 10] = [
    DIGIT_0, DIGIT_1, DIGIT_2, DIGIT_3, DIGIT_4, DIGIT_5, DIGIT_6, DIGIT_7, DIGIT_8, DIGIT_9,
];

const DIGIT_0: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, LEFT_DOWN, UP_DOWN],
    [UP_DOWN, UP_DOWN, UP_DOWN, UP_DOWN],
    [UP_DOWN, UP_DOWN, UP_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_1: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, LEFT_DOWN, X],
    [RIGHT_UP, LEFT_DOWN, UP_DOWN, X],
    [X, UP_DOWN, UP_DOWN, X],
    [X, UP_DOWN, UP_DOWN, X],
    [RIGHT_DOWN, UP_LEFT, RIGHT_UP, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_2: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [RIGHT_DOWN, RIGHT_LEFT, UP_LEFT, UP_DOWN],
    [UP_DOWN, RIGHT_DOWN, RIGHT_LEFT, UP_LEFT],
    [UP_DOWN, RIGHT_UP, RIGHT_LEFT, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_3: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [X, RIGHT_DOWN, UP_LEFT, UP_DOWN],
    [X, RIGHT_UP, LEFT_DOWN, UP_DOWN],
    [RIGHT_DOWN, RIGHT_LEFT, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_4: DigitGrid = [
    [RIGHT_DOWN, LEFT_DOWN, RIGHT_DOWN, LEFT_DOWN],
    [UP_DOWN, UP_DOWN, UP_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [X, X, UP_DOWN, UP_DOWN],
    [X, X, RIGHT_UP, UP_LEFT],
];

const DIGIT_5: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, RIGHT_LEFT, UP_LEFT],
    [UP_DOWN, RIGHT_UP, RIGHT_LEFT, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [RIGHT_DOWN, RIGHT_LEFT, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_6: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, RIGHT_LEFT, UP_LEFT],
    [UP_DOWN, RIGHT_UP, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, LEFT_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_7: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [X, X, UP_DOWN, UP_DOWN],
    [X, X, UP_DOWN, UP_DOWN],
    [X, X, UP_DOWN, UP_DOWN],
    [X, X, RIGHT_UP, UP_LEFT],
];

const DIGIT_8: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, LEFT_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [UP_DOWN, RIGHT_DOWN, LEFT_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

const DIGIT_9: DigitGrid = [
    [RIGHT_DOWN, RIGHT_LEFT, RIGHT_LEFT, LEFT_DOWN],
    [UP_DOWN, RIGHT_DOWN, LEFT_DOWN, UP_DOWN],
    [UP_DOWN, RIGHT_UP, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, LEFT_DOWN, UP_DOWN],
    [RIGHT_DOWN, RIGHT_LEFT, UP_LEFT, UP_DOWN],
    [RIGHT_UP, RIGHT_LEFT, RIGHT_LEFT, UP_LEFT],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_count(grid: &DigitGrid) -> usize {
        grid.iter().flatten().filter(|pair| pair.is_lit()).count()
    }

    #[test]
    fn test_rest_pose() {
        assert_eq!(HandPair::REST.hour, 225.0);
        assert_eq!(HandPair::REST.minute, 225.0);
        assert!(!HandPair::REST.is_lit());
    }

    #[test]
    fn test_lookup_all_digits() {
        for digit in 0..=9 {
            let grid = lookup(digit).unwrap();
            assert_eq!(grid.len(), GRID_ROWS);
            for row in grid.iter() {
                assert_eq!(row.len(), GRID_COLUMNS);
            }
        }
    }

    #[test]
    fn test_lookup_invalid_digit() {
        assert_eq!(lookup(10), Err(ClockError::InvalidDigit { digit: 10 }));
        assert_eq!(
            lookup(u32::MAX),
            Err(ClockError::InvalidDigit { digit: u32::MAX })
        );
    }

    #[test]
    fn test_digit_pattern_angles_valid() {
        for digit in 0..=9 {
            for pair in lookup(digit).unwrap().iter().flatten() {
                for angle in [pair.hour, pair.minute] {
                    assert!(
                        (0.0..360.0).contains(&angle),
                        "Invalid angle {} in digit {}",
                        angle,
                        digit
                    );
                }
            }
        }
    }

    #[test]
    fn test_full_glyphs_have_no_rest_clocks() {
        for digit in [0, 2, 5, 6, 8, 9] {
            assert_eq!(lit_count(lookup(digit).unwrap()), 24, "digit {}", digit);
        }
    }

    #[test]
    fn test_sparse_glyphs_rest_counts() {
        assert_eq!(lit_count(lookup(1).unwrap()), 18);
        assert_eq!(lit_count(lookup(3).unwrap()), 22);
        assert_eq!(lit_count(lookup(4).unwrap()), 20);
        assert_eq!(lit_count(lookup(7).unwrap()), 16);
    }

    #[test]
    fn test_digit_patterns_distinct() {
        for a in 0..=9 {
            for b in (a + 1)..=9 {
                assert_ne!(lookup(a).unwrap(), lookup(b).unwrap(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_digit_zero_corners() {
        let grid = lookup(0).unwrap();
        assert_eq!(grid[0][0], HandPair::new(0.0, 270.0));
        assert_eq!(grid[0][3], HandPair::new(180.0, 270.0));
        assert_eq!(grid[5][0], HandPair::new(0.0, 90.0));
        assert_eq!(grid[5][3], HandPair::new(90.0, 180.0));
    }

    #[test]
    fn test_digit_seven_stem() {
        let grid = lookup(7).unwrap();
        for row in 2..=4 {
            assert_eq!(grid[row][0], HandPair::REST);
            assert_eq!(grid[row][1], HandPair::REST);
            assert_eq!(grid[row][2], HandPair::new(90.0, 270.0));
            assert_eq!(grid[row][3], HandPair::new(90.0, 270.0));
        }
    }
}
