//! Flappy-bird style arcade game with a pure, immutable simulation core.
//!
//! The library holds only deterministic game logic: data types in
//! `entities`, update functions in `compute`. The binary owns the
//! terminal, the clock and the RNG and feeds them in from outside.

pub mod compute;
pub mod entities;
