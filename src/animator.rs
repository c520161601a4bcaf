//! Render-loop state for driving the clock face animation.
//!
//! The host owns one [`Animator`] and calls [`Animator::tick`] once per
//! rendered frame with the current wall-clock time. Whenever the observed
//! second changes, a new transition starts from whatever was last drawn
//! towards the display for the new time.

use std::num::NonZeroU32;

use chrono::Timelike;
use serde::Serialize;

use crate::animation::interpolate;
use crate::clock_face::DisplayState;
use crate::error::ClockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The drawn frame equals the target exactly
    Idle,
    /// Hands are moving towards the target
    Animating,
}

#[derive(Debug, Clone)]
pub struct Animator {
    previous: DisplayState,
    target: DisplayState,
    current: DisplayState,
    elapsed_frames: u32,
    duration_frames: NonZeroU32,
    last_second: Option<u32>,
}

impl Animator {
    /// Creates an idle animator showing `initial`.
    ///
    /// No second has been observed yet, so the first [`tick`](Self::tick)
    /// always starts a transition.
    pub fn new(initial: DisplayState, duration_frames: NonZeroU32) -> Self {
        Animator {
            previous: initial,
            target: initial,
            current: initial,
            elapsed_frames: duration_frames.get(),
            duration_frames,
            last_second: None,
        }
    }

    /// Creates an idle animator already showing `time`.
    ///
    /// The second of `time` counts as observed, so ticks within that same
    /// second keep the display still.
    pub fn at_time<T: Timelike>(
        time: &T,
        duration_frames: NonZeroU32,
    ) -> Result<Self, ClockError> {
        let mut animator = Self::new(DisplayState::from_time(time)?, duration_frames);
        animator.last_second = Some(time.second());
        Ok(animator)
    }

    /// Advances one frame and returns the display to draw.
    ///
    /// A change of `seconds` since the last call restarts the transition:
    /// the frame drawn last becomes the new starting point, even if the
    /// previous transition had not finished.
    pub fn tick(
        &mut self,
        hours: u32,
        minutes: u32,
        seconds: u32,
    ) -> Result<&DisplayState, ClockError> {
        if self.last_second != Some(seconds) {
            let target = DisplayState::build(hours, minutes, seconds)?;
            if self.phase() == Phase::Animating {
                tracing::debug!(
                    elapsed_frames = self.elapsed_frames,
                    "interrupting transition"
                );
            }
            tracing::debug!(hours, minutes, seconds, "starting transition");

            self.previous = self.current;
            self.target = target;
            self.elapsed_frames = 0;
            self.last_second = Some(seconds);
        } else {
            self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        }

        self.current = interpolate(
            &self.previous,
            &self.target,
            self.elapsed_frames,
            self.duration_frames.get(),
        );

        Ok(&self.current)
    }

    /// [`tick`](Self::tick) for anything carrying a time of day.
    pub fn tick_time<T: Timelike>(&mut self, time: &T) -> Result<&DisplayState, ClockError> {
        self.tick(time.hour(), time.minute(), time.second())
    }

    /// Shows `state` immediately without animating towards it.
    ///
    /// The current second stays observed, so the next tick within the same
    /// second does not start a transition.
    pub fn jump_to(&mut self, state: DisplayState) {
        self.previous = state;
        self.target = state;
        self.current = state;
        self.elapsed_frames = self.duration_frames.get();
    }

    /// Like [`jump_to`](Self::jump_to), built from a time of day.
    pub fn jump_to_time<T: Timelike>(&mut self, time: &T) -> Result<(), ClockError> {
        self.jump_to(DisplayState::from_time(time)?);
        self.last_second = Some(time.second());
        Ok(())
    }

    /// Idle once the drawn frame index reaches the duration, at which
    /// point the drawn frame is exactly the target.
    pub fn phase(&self) -> Phase {
        if self.elapsed_frames >= self.duration_frames.get() {
            Phase::Idle
        } else {
            Phase::Animating
        }
    }

    /// The display drawn by the most recent tick.
    pub fn current(&self) -> &DisplayState {
        &self.current
    }

    pub fn previous(&self) -> &DisplayState {
        &self.previous
    }

    pub fn target(&self) -> &DisplayState {
        &self.target
    }

    /// Index of the frame drawn by the last tick within the running
    /// transition; at or above the duration when idle.
    pub fn elapsed_frames(&self) -> u32 {
        self.elapsed_frames
    }

    pub fn duration_frames(&self) -> NonZeroU32 {
        self.duration_frames
    }
}
