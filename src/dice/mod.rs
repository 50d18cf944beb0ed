//! The die shared by both game variants.

mod die;

pub use die::{Die, MARKER_MIN, MARKER_THRESHOLD, MAX_FACE, MIN_FACE};
