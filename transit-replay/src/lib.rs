//! Historical transit trip-time reconstruction.
//!
//! A library that answers: "over the recorded history of the network,
//! how long did it actually take to get from this station to that one,
//! over every route a rider could plausibly have taken?"

pub mod analysis;
pub mod domain;
pub mod network;
pub mod segment;
pub mod sources;
pub mod timing;
