//! Agreeance ratio classification.
//!
//! The ratings site turns the community agree/disagree ratio into a short
//! label. The ladder below reproduces the site's thresholds; comparisons are
//! plain `f64` comparisons with no epsilon, so a ratio like 3/9 (0.333…)
//! sits above the 0.33 boundary.

use crate::models::Agreeance;

/// Map an agree/disagree ratio to its [`Agreeance`] label.
///
/// Total over `f64`: anything that falls through every rung (zero,
/// negatives, NaN) is [`Agreeance::AbsolutelyDisagrees`].
pub fn classify(ratio: f64) -> Agreeance {
    if ratio > 3.0 {
        Agreeance::AbsolutelyAgrees
    } else if ratio > 2.0 {
        Agreeance::StronglyAgrees
    } else if ratio > 1.5 {
        Agreeance::Agrees
    } else if ratio > 1.0 {
        Agreeance::SomewhatAgrees
    } else if ratio == 1.0 {
        Agreeance::Neutral
    } else if ratio > 0.67 {
        Agreeance::SomewhatDisagrees
    } else if ratio > 0.5 {
        Agreeance::Disagrees
    } else if ratio > 0.33 {
        Agreeance::StronglyDisagrees
    } else {
        Agreeance::AbsolutelyDisagrees
    }
}
