//! Easing curves.
//!
//! Every curve maps normalized time `t` in `[0, 1]` to eased progress. The
//! "back" family overshoots between the endpoints; all curves are pinned to
//! exactly `0.0` and `1.0` at the endpoints by [`Easing::apply`].

use std::f32::consts::PI;

/// Overshoot constant for the back family.
const BACK_C1: f32 = 1.70158;
/// Overshoot constant for back in-out.
const BACK_C2: f32 = BACK_C1 * 1.525;
/// Bounce impact coefficient.
const BOUNCE_N1: f32 = 7.5625;
/// Bounce interval divisor.
const BOUNCE_D1: f32 = 2.75;

/// Easing function identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Sine ease-in.
    InSine,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in-out.
    InOutSine,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in (also `ease_in`).
    InCubic,
    /// Cubic ease-out (also `ease_out`).
    OutCubic,
    /// Cubic ease-in-out (also `ease_in_out`).
    #[default]
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in-out.
    InOutQuart,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in-out.
    InOutExpo,
    /// Back ease-in (undershoots below 0).
    InBack,
    /// Back ease-out (overshoots above 1).
    OutBack,
    /// Back ease-in-out.
    InOutBack,
    /// Bounce ease-in.
    InBounce,
    /// Bounce ease-out (also `bounce`).
    OutBounce,
    /// Bounce ease-in-out.
    InOutBounce,
}

impl Easing {
    /// Every easing curve, for exhaustive checks.
    pub const ALL: [Self; 22] = [
        Self::Linear,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
    ];

    /// Looks an easing up by its name. Unknown names fall back to linear.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ease_in" | "ease_in_cubic" => Self::InCubic,
            "ease_out" | "ease_out_cubic" => Self::OutCubic,
            "ease_in_out" | "ease_in_out_cubic" => Self::InOutCubic,
            "ease_in_sine" => Self::InSine,
            "ease_out_sine" => Self::OutSine,
            "ease_in_out_sine" => Self::InOutSine,
            "ease_in_quad" => Self::InQuad,
            "ease_out_quad" => Self::OutQuad,
            "ease_in_out_quad" => Self::InOutQuad,
            "ease_in_quart" => Self::InQuart,
            "ease_out_quart" => Self::OutQuart,
            "ease_in_out_quart" => Self::InOutQuart,
            "ease_in_expo" => Self::InExpo,
            "ease_out_expo" => Self::OutExpo,
            "ease_in_out_expo" => Self::InOutExpo,
            "ease_in_back" => Self::InBack,
            "ease_out_back" => Self::OutBack,
            "ease_in_out_back" => Self::InOutBack,
            "bounce" | "bounce_out" => Self::OutBounce,
            "bounce_in" => Self::InBounce,
            "bounce_in_out" => Self::InOutBounce,
            _ => Self::Linear,
        }
    }

    /// Applies the easing function to a t value (0-1).
    ///
    /// Inputs outside `[0, 1]` are clamped, so both endpoints are exact.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => linear(t),
            Self::InSine => ease_in_sine(t),
            Self::OutSine => ease_out_sine(t),
            Self::InOutSine => ease_in_out_sine(t),
            Self::InQuad => ease_in_quad(t),
            Self::OutQuad => ease_out_quad(t),
            Self::InOutQuad => ease_in_out_quad(t),
            Self::InCubic => ease_in_cubic(t),
            Self::OutCubic => ease_out_cubic(t),
            Self::InOutCubic => ease_in_out_cubic(t),
            Self::InQuart => ease_in_quart(t),
            Self::OutQuart => ease_out_quart(t),
            Self::InOutQuart => ease_in_out_quart(t),
            Self::InExpo => ease_in_expo(t),
            Self::OutExpo => ease_out_expo(t),
            Self::InOutExpo => ease_in_out_expo(t),
            Self::InBack => ease_in_back(t),
            Self::OutBack => ease_out_back(t),
            Self::InOutBack => ease_in_out_back(t),
            Self::InBounce => bounce_in(t),
            Self::OutBounce => bounce_out(t),
            Self::InOutBounce => bounce_in_out(t),
        }
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Identity curve.
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// Sine ease-in.
#[must_use]
pub fn ease_in_sine(t: f32) -> f32 {
    1.0 - ((t * PI) / 2.0).cos()
}

/// Sine ease-out.
#[must_use]
pub fn ease_out_sine(t: f32) -> f32 {
    ((t * PI) / 2.0).sin()
}

/// Sine ease-in-out.
#[must_use]
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// Quadratic ease-in.
#[must_use]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in.
#[must_use]
pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

/// Cubic ease-out.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quartic ease-in.
#[must_use]
pub fn ease_in_quart(t: f32) -> f32 {
    t * t * t * t
}

/// Quartic ease-out.
#[must_use]
pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// Quartic ease-in-out.
#[must_use]
pub fn ease_in_out_quart(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Exponential ease-in: 2^(10(t-1)).
#[must_use]
pub fn ease_in_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

/// Exponential ease-out: 1 - 2^(-10t).
#[must_use]
pub fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

/// Exponential ease-in-out.
#[must_use]
pub fn ease_in_out_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

/// Back ease-in.
#[must_use]
pub fn ease_in_back(t: f32) -> f32 {
    let c3 = BACK_C1 + 1.0;
    c3 * t * t * t - BACK_C1 * t * t
}

/// Back ease-out.
#[must_use]
pub fn ease_out_back(t: f32) -> f32 {
    let c3 = BACK_C1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

/// Back ease-in-out.
#[must_use]
pub fn ease_in_out_back(t: f32) -> f32 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

/// Bounce ease-out, piecewise over four sub-intervals of width `1/2.75`.
#[must_use]
pub fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984_375
    }
}

/// Bounce ease-in.
#[must_use]
pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

/// Bounce ease-in-out.
#[must_use]
pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_raw_curves_near_endpoints() {
        let curves: [fn(f32) -> f32; 6] = [
            ease_in_back,
            ease_out_back,
            ease_in_out_back,
            bounce_in,
            bounce_out,
            bounce_in_out,
        ];
        for curve in curves {
            assert!(curve(0.0).abs() < 1e-5);
            assert!((curve(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_back_overshoots() {
        assert!(Easing::OutBack.apply(0.7) > 1.0);
        assert!(Easing::InBack.apply(0.2) < 0.0);
    }

    #[test]
    fn test_exponential_out_is_sharp() {
        let value = Easing::OutExpo.apply(0.3);
        assert!(value > 0.8, "Exponential out should snap quickly: {value}");
    }

    #[test]
    fn test_unknown_name_is_linear() {
        assert_eq!(Easing::from_name("wobble"), Easing::Linear);
        assert_eq!(Easing::from_name("bounce"), Easing::OutBounce);
        assert_eq!(Easing::from("ease_out"), Easing::OutCubic);
        assert!((Easing::from_name("nope").apply(0.25) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_midpoints() {
        assert!((Easing::InOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::InOutSine.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::InQuad.apply(0.5) - 0.25).abs() < 1e-6);
    }
}
