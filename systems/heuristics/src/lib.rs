#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Target selection for the seeker and the hunters.
//!
//! Heuristics are pure: they read a snapshot of the grid and agent positions
//! and return the cell an agent should plan a route towards.

mod hunter;
mod seeker;

pub use hunter::{formation_offset, FormationSlot, HunterHeuristic, HunterTier, SeekerSighting};
pub use seeker::SeekerHeuristic;
