//! CSS timing functions and transition descriptors.

/// A CSS timing function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// CSS `ease`
    Ease,
    /// The utility-class default, `cubic-bezier(0.4, 0, 0.2, 1)`
    Standard,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Spring-like curve that overshoots before settling; used for every slide.
    pub const OVERSHOOT: Easing = Easing::CubicBezier {
        x1: 0.34,
        y1: 1.56,
        x2: 0.64,
        y2: 1.0,
    };

    /// Eased progress for linear progress `t` (clamped to 0.0 - 1.0).
    ///
    /// Curves with control points outside the unit square (such as
    /// [`Easing::OVERSHOOT`]) may return values above 1.0 mid-way.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(t, 0.25, 0.1, 0.25, 1.0),
            Easing::Standard => cubic_bezier(t, 0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Interpolate between `from` and `to` at linear progress `t`.
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }

    /// CSS representation (e.g., `cubic-bezier(0.34, 1.56, 0.64, 1)`).
    pub fn css(&self) -> String {
        match self {
            Easing::Linear => "linear".to_string(),
            Easing::Ease => "ease".to_string(),
            Easing::Standard => "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            Easing::CubicBezier { x1, y1, x2, y2 } => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

// Solve bx(u) = x for u, then return by(u).
fn cubic_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    let mut u = x;
    for _ in 0..8 {
        let err = sample(x1, x2, u) - x;
        if err.abs() < 1e-7 {
            return sample(y1, y2, u);
        }
        let d = slope(x1, x2, u);
        if d.abs() < 1e-7 {
            break;
        }
        u = (u - err / d).clamp(0.0, 1.0);
    }

    // Newton stalled; bisect.
    let (mut lo, mut hi) = (0.0, 1.0);
    u = x;
    for _ in 0..32 {
        if sample(x1, x2, u) < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    sample(y1, y2, u)
}

/// Transition applied to a layer's transform and/or opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: u64,
    /// Timing function for `transform`, if it animates
    pub transform: Option<Easing>,
    /// Timing function for `opacity`, if it animates
    pub opacity: Option<Easing>,
}

impl Transition {
    /// Overshooting slide on the transform only.
    pub fn slide(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            transform: Some(Easing::OVERSHOOT),
            opacity: None,
        }
    }

    /// Opacity fade with the given timing function.
    pub fn fade(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            transform: None,
            opacity: Some(easing),
        }
    }

    /// Add an opacity fade using CSS `ease`.
    pub fn with_fade(mut self) -> Self {
        self.opacity = Some(Easing::Ease);
        self
    }

    /// CSS `transition` shorthand (e.g., `transform 0.6s cubic-bezier(...), opacity 0.6s`).
    pub fn css(&self) -> String {
        let secs = self.duration_ms as f64 / 1000.0;
        let part = |property: &str, easing: Easing| match easing {
            Easing::Ease => format!("{property} {secs}s"),
            other => format!("{property} {secs}s {}", other.css()),
        };
        let mut parts = Vec::with_capacity(2);
        if let Some(easing) = self.transform {
            parts.push(part("transform", easing));
        }
        if let Some(easing) = self.opacity {
            parts.push(part("opacity", easing));
        }
        parts.join(", ")
    }
}
