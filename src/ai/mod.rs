mod corner_safe;

pub use corner_safe::{Candidate, CornerSafeSelector, safe_candidates};
