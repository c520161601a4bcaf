//! Frame-based hand animation between two display states.
//!
//! Every hand of every clock is animated on its own, but all of them share
//! one frame counter, so a whole display transition starts and ends together.
//!
//! # Animation System
//! For each hand:
//! 1. At or past the final frame, the hand sits exactly on its target
//! 2. A (near) zero forward distance snaps straight to the target
//! 3. Otherwise the hand moves forward at a constant speed of
//!    `distance / duration` degrees per frame
//!
//! Hands never take the shorter backward arc. There is no easing.

use crate::angle::{forward_distance, normalize};
use crate::clock_face::{DigitCell, DisplayState};
use crate::digit_patterns::HandPair;

/// Default transition length in frames (one third of a second at 60 FPS).
pub const DEFAULT_DURATION_FRAMES: u32 = 20;

/// Forward distances below this are treated as "already there".
pub const SNAP_EPSILON: f64 = 0.001;

/// Angle of a single hand `elapsed_frames` into a transition.
///
/// `duration_frames` must be non-zero.
pub fn interpolate_hand(from: f64, to: f64, elapsed_frames: u32, duration_frames: u32) -> f64 {
    if elapsed_frames >= duration_frames {
        return to;
    }

    let distance = forward_distance(from, to);
    if distance < SNAP_EPSILON {
        return to;
    }

    let step = distance / f64::from(duration_frames);
    let moved = step * f64::from(elapsed_frames);
    normalize(from + moved)
}

fn interpolate_pair(
    from: &HandPair,
    to: &HandPair,
    elapsed_frames: u32,
    duration_frames: u32,
) -> HandPair {
    HandPair {
        hour: interpolate_hand(from.hour, to.hour, elapsed_frames, duration_frames),
        minute: interpolate_hand(from.minute, to.minute, elapsed_frames, duration_frames),
    }
}

fn interpolate_cell(
    from: &DigitCell,
    to: &DigitCell,
    elapsed_frames: u32,
    duration_frames: u32,
) -> DigitCell {
    let mut cell = *to;
    for (row, (from_row, to_row)) in from.hands.iter().zip(to.hands.iter()).enumerate() {
        for (col, (from_pair, to_pair)) in from_row.iter().zip(to_row.iter()).enumerate() {
            cell.hands[row][col] =
                interpolate_pair(from_pair, to_pair, elapsed_frames, duration_frames);
        }
    }
    cell
}

/// Computes the frame to draw `elapsed_frames` into a transition from
/// `previous` to `target`.
///
/// Returns `target` unchanged once `elapsed_frames >= duration_frames`.
/// Interpolated cells report the target's digit. Neither input is modified.
pub fn interpolate(
    previous: &DisplayState,
    target: &DisplayState,
    elapsed_frames: u32,
    duration_frames: u32,
) -> DisplayState {
    if elapsed_frames >= duration_frames {
        return *target;
    }

    let mut frame = *target;
    for (cell, (from, to)) in frame
        .cells
        .iter_mut()
        .zip(previous.cells.iter().zip(target.cells.iter()))
    {
        *cell = interpolate_cell(from, to, elapsed_frames, duration_frames);
    }
    frame
}
