//! Easing functions for timeline interpolation.
//!
//! Pure, deterministic curves mapping raw progress t ∈ [0, 1] to eased
//! progress in [0, 1]. Endpoints are exact: f(0) = 0 and f(1) = 1 for
//! every variant, so scrubbing to a scene boundary always lands on the
//! authored pose.

use serde::{Deserialize, Serialize};

/// Easing curve variants used by keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out (stronger deceleration).
    CubicOut,
    /// Quartic ease-out (near-standstill finish).
    QuarticOut,
    /// Cubic ease-in-out (slow start and finish).
    CubicInOut,
    /// Quartic ease-in-out (pronounced dwell at both ends).
    QuarticInOut,
    /// Overshooting ease-out that settles back onto the target.
    BackOut {
        /// Overshoot amount; 1.70158 gives the classic ~10% overshoot.
        overshoot: f32,
    },
    /// Damped-oscillation ease-out for celebratory effects.
    ElasticOut,
}

impl EasingFunction {
    /// Default curve applied to keyframes authored without an explicit
    /// easing.
    pub const DEFAULT: EasingFunction = EasingFunction::QuadraticOut;

    /// Evaluate the curve at raw progress `t`.
    ///
    /// Input is clamped to [0, 1] before evaluation; out-of-range progress
    /// is never an error.
    #[must_use]
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::QuarticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt * omt
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let omt2 = -2.0 * t + 2.0;
                    1.0 - omt2 * omt2 * omt2 / 2.0
                }
            }
            Self::QuarticInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let omt2 = -2.0 * t + 2.0;
                    1.0 - omt2 * omt2 * omt2 * omt2 / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let tm1 = t - 1.0;
                1.0 + (overshoot + 1.0) * tm1 * tm1 * tm1
                    + overshoot * tm1 * tm1
            }
            Self::ElasticOut => {
                // Endpoints are special-cased: the analytic form only
                // approaches 1 asymptotically at t = 1.
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    const C4: f32 = core::f32::consts::TAU / 3.0;
                    2.0_f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * C4).sin()
                        + 1.0
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
