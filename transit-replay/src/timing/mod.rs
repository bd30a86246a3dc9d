//! Timing reconstruction over decomposed paths.
//!
//! Takes a leg sequence and the historical hop observations, and
//! replays every feasible chain of observed vehicle movements over the
//! legs. Each surviving chain is a [`crate::domain::TripRecord`].

mod config;
mod join;
mod summary;

pub use config::JoinConfig;
pub use join::{JoinError, TripTimeJoiner};
pub use summary::trip_label;
