//! Everyday utilities: weather, conversions, lists, timers and randomness.

pub mod clock;
pub mod convert;
pub mod organizer;
pub mod random;
pub mod web;
