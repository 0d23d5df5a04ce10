//! Point charges with time-parameterized trajectories.

use glam::DVec2;
use quiver_core::Trajectory;
use std::fmt;
use std::sync::Arc;

/// A point charge: a fixed signed magnitude riding a [`Trajectory`].
///
/// The trajectory is shared behind an `Arc`, so cloning a source is
/// cheap and a scene can hand the same source list to every step.
///
/// Negative times are clamped to zero before the trajectory is queried:
/// a charge rests at its initial position for all of negative time.
///
/// ```
/// use glam::DVec2;
/// use quiver_field::ChargeSource;
///
/// let q = ChargeSource::new(1.0, |t: f64| DVec2::new(t, 0.0));
/// assert_eq!(q.position_at(2.0), DVec2::new(2.0, 0.0));
/// assert_eq!(q.position_at(-3.0), DVec2::ZERO);
/// ```
#[derive(Clone)]
pub struct ChargeSource {
    trajectory: Arc<dyn Trajectory>,
    charge: f64,
}

impl ChargeSource {
    /// Create a source from a charge magnitude and a trajectory.
    pub fn new(charge: f64, trajectory: impl Trajectory + 'static) -> Self {
        Self {
            trajectory: Arc::new(trajectory),
            charge,
        }
    }

    /// Create a source around an already shared trajectory.
    pub fn from_shared(charge: f64, trajectory: Arc<dyn Trajectory>) -> Self {
        Self { trajectory, charge }
    }

    /// Signed charge magnitude.
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// The shared trajectory.
    pub fn trajectory(&self) -> &Arc<dyn Trajectory> {
        &self.trajectory
    }

    /// Position at `t`, with negative `t` clamped to zero.
    pub fn position_at(&self, t: f64) -> DVec2 {
        self.trajectory.position(t.max(0.0))
    }

    /// Velocity at `t`. Zero for negative `t`, where the clamped
    /// trajectory is stationary.
    pub fn velocity_at(&self, t: f64) -> DVec2 {
        if t < 0.0 {
            DVec2::ZERO
        } else {
            self.trajectory.velocity(t)
        }
    }
}

impl fmt::Debug for ChargeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChargeSource")
            .field("charge", &self.charge)
            .field("initial_position", &self.position_at(0.0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_time_clamps_to_initial_position() {
        let q = ChargeSource::new(-2.0, |t: f64| DVec2::new(1.0 + t, t * t));
        assert_eq!(q.position_at(-10.0), DVec2::new(1.0, 0.0));
        assert_eq!(q.position_at(0.0), DVec2::new(1.0, 0.0));
        assert_eq!(q.position_at(1.0), DVec2::new(2.0, 1.0));
        assert_eq!(q.charge(), -2.0);
    }

    #[test]
    fn velocity_is_zero_before_start() {
        let q = ChargeSource::new(1.0, |t: f64| DVec2::new(5.0 * t, 0.0));
        assert_eq!(q.velocity_at(-0.1), DVec2::ZERO);
        assert!((q.velocity_at(1.0).x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn clones_share_trajectory() {
        let q = ChargeSource::new(1.0, |_t: f64| DVec2::ONE);
        let r = q.clone();
        assert!(Arc::ptr_eq(q.trajectory(), r.trajectory()));
    }

    #[test]
    fn debug_shows_charge_and_start() {
        let q = ChargeSource::new(3.0, |_t: f64| DVec2::new(1.0, 2.0));
        let s = format!("{q:?}");
        assert!(s.contains("charge: 3.0"), "got {s}");
        assert!(s.contains("initial_position"));
    }
}
