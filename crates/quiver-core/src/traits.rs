//! The [`Trajectory`] trait: how charge motion is supplied to the core.

use glam::DVec2;

/// Relative step for the default finite-difference velocity.
const VELOCITY_STEP: f64 = 1e-6;

/// A pure function of time giving a charge's position in the plane.
///
/// # Contract
///
/// - `position()` is only ever called with `t >= 0`. Callers clamp
///   earlier times to zero first, so a charge sits at its initial
///   position for all of negative time.
/// - Implementations hold no mutable state: the same `t` always yields
///   the same position.
///
/// Closures `Fn(f64) -> DVec2` implement this trait directly:
///
/// ```
/// use glam::DVec2;
/// use quiver_core::Trajectory;
///
/// let drift = |t: f64| DVec2::new(0.5 * t, 0.0);
/// assert_eq!(drift.position(2.0), DVec2::new(1.0, 0.0));
/// ```
pub trait Trajectory: Send + Sync {
    /// Position at time `t >= 0`.
    fn position(&self, t: f64) -> DVec2;

    /// Velocity at time `t >= 0`.
    ///
    /// The default is a central difference on the clamped trajectory,
    /// falling back to a one-sided difference at `t = 0`. Implementations
    /// with a closed form should override it.
    fn velocity(&self, t: f64) -> DVec2 {
        let h = VELOCITY_STEP * t.abs().max(1.0);
        let lo = (t - h).max(0.0);
        let hi = (t + h).max(0.0);
        if hi <= lo {
            return DVec2::ZERO;
        }
        (self.position(hi) - self.position(lo)) / (hi - lo)
    }
}

impl<F> Trajectory for F
where
    F: Fn(f64) -> DVec2 + Send + Sync,
{
    fn position(&self, t: f64) -> DVec2 {
        self(t)
    }
}
