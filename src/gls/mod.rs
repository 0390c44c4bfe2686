//! Guided local search.
//!
//! Wraps the local search operators in a penalty loop: when no move
//! improves the augmented cost, the costliest edges of the current solution
//! (relative to how often they were already penalized) get penalized, which
//! pushes the search out of the local optimum.

mod penalty;
mod search;
mod termination;

pub use penalty::{AugmentedCost, PenaltyMatrix};
pub use search::{GuidedLocalSearch, SearchOutcome, SearchPhase, SearchStats};
pub use termination::{AnyOf, MaxIterations, MaxTime, SearchProgress, Termination};
