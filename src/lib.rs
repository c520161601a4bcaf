//! Clockface - a digital HH:MM:SS clock drawn with tiny analog clocks.
//!
//! Each digit is a 6x4 grid of 24 analog clocks whose hands trace the digit's
//! strokes. When the time changes, every hand sweeps forward from its old
//! angle to its new one over a fixed number of frames.
//!
//! The crate computes hand angles only. Drawing them is up to the host:
//! - [`clock_face::DisplayState::build`] turns a time of day into hand angles
//! - [`animation::interpolate`] produces the frame between two states
//! - [`animator::Animator`] keeps the per-frame state a render loop needs

pub mod angle;
pub mod animation;
pub mod animator;
pub mod clock_face;
pub mod config;
pub mod digit_patterns;
pub mod error;

pub use animator::{Animator, Phase};
pub use clock_face::{DigitCell, DisplayState};
pub use digit_patterns::HandPair;
pub use error::{ClockError, ConfigError};
