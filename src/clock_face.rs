//! Overall HH:MM:SS clock face state.
//!
//! A [`DisplayState`] is six [`DigitCell`]s, in order: tens of hours, units of
//! hours, tens of minutes, units of minutes, tens of seconds, units of
//! seconds. Each cell carries the 6x4 grid of hand pairs that draws its digit.
//!
//! States are plain values. Nothing mutates one in place; a new time builds a
//! new state.

use chrono::Timelike;
use serde::Serialize;

use crate::digit_patterns::{self, DigitGrid, HandPair};
use crate::error::{ClockError, TimeComponent};

/// Number of digit cells in a full HH:MM:SS display.
pub const CELL_COUNT: usize = 6;

/// One digit of the display and the clock grid drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitCell {
    pub digit: u8,
    pub hands: DigitGrid,
}

impl DigitCell {
    /// Builds the cell for a single digit.
    pub fn for_digit(digit: u32) -> Result<Self, ClockError> {
        let hands = *digit_patterns::lookup(digit)?;
        Ok(DigitCell {
            digit: digit as u8,
            hands,
        })
    }

    /// Iterates over every hand pair, row by row.
    pub fn pairs(&self) -> impl Iterator<Item = &HandPair> {
        self.hands.iter().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayState {
    pub cells: [DigitCell; CELL_COUNT],
}

impl DisplayState {
    /// Builds the display for a time of day.
    ///
    /// # Errors
    /// [`ClockError::InvalidTimeComponent`] if `hours` is above 23 or
    /// `minutes`/`seconds` are above 59.
    pub fn build(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ClockError> {
        check_component(TimeComponent::Hours, hours, 23)?;
        check_component(TimeComponent::Minutes, minutes, 59)?;
        check_component(TimeComponent::Seconds, seconds, 59)?;

        let digits = [
            hours / 10,
            hours % 10,
            minutes / 10,
            minutes % 10,
            seconds / 10,
            seconds % 10,
        ];

        let mut cells = [DigitCell::for_digit(0)?; CELL_COUNT];
        for (cell, digit) in cells.iter_mut().zip(digits) {
            *cell = DigitCell::for_digit(digit)?;
        }

        Ok(DisplayState { cells })
    }

    /// Builds the display for anything carrying a time of day, such as
    /// `chrono::Local::now()`.
    pub fn from_time<T: Timelike>(time: &T) -> Result<Self, ClockError> {
        // Leap seconds surface as second 59 with extra nanoseconds, so the
        // fields are always in range here.
        Self::build(time.hour(), time.minute(), time.second())
    }

    /// The six displayed digits, hours first.
    pub fn digits(&self) -> [u8; CELL_COUNT] {
        self.cells.map(|cell| cell.digit)
    }
}

fn check_component(component: TimeComponent, value: u32, max: u32) -> Result<(), ClockError> {
    if value > max {
        return Err(ClockError::InvalidTimeComponent {
            component,
            value,
            max,
        });
    }
    Ok(())
}
