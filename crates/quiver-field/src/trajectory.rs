//! Standard charge trajectories.
//!
//! Trajectories are external collaborators: any `Fn(f64) -> DVec2` will
//! do. The types here cover the common motions and carry closed-form
//! velocities, which the analytic derivative path uses directly.
//!
//! [`TrajectorySpec`] is the serializable form used in configuration
//! files; [`TrajectorySpec::build`] turns it into a shared trajectory.

use glam::DVec2;
use quiver_core::Trajectory;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// A charge at rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stationary {
    /// Fixed position.
    pub position: DVec2,
}

impl Trajectory for Stationary {
    fn position(&self, _t: f64) -> DVec2 {
        self.position
    }

    fn velocity(&self, _t: f64) -> DVec2 {
        DVec2::ZERO
    }
}

/// Uniform circular motion, counter-clockwise for positive `angular_velocity`.
///
/// ```text
/// p(t) = center + radius * (cos(ωt + φ), sin(ωt + φ))
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularOrbit {
    /// Orbit center.
    pub center: DVec2,
    /// Orbit radius.
    pub radius: f64,
    /// Angular velocity ω in radians per unit time.
    pub angular_velocity: f64,
    /// Phase φ at `t = 0`.
    pub phase: f64,
}

impl Trajectory for CircularOrbit {
    fn position(&self, t: f64) -> DVec2 {
        let angle = self.angular_velocity * t + self.phase;
        self.center + self.radius * DVec2::new(angle.cos(), angle.sin())
    }

    fn velocity(&self, t: f64) -> DVec2 {
        let angle = self.angular_velocity * t + self.phase;
        self.radius * self.angular_velocity * DVec2::new(-angle.sin(), angle.cos())
    }
}

/// Constant-velocity motion from `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMotion {
    /// Position at `t = 0`.
    pub start: DVec2,
    /// Constant velocity.
    pub velocity: DVec2,
}

impl Trajectory for LinearMotion {
    fn position(&self, t: f64) -> DVec2 {
        self.start + self.velocity * t
    }

    fn velocity(&self, _t: f64) -> DVec2 {
        self.velocity
    }
}

/// Simple harmonic motion along `amplitude`.
///
/// ```text
/// p(t) = center + amplitude * sin(ωt + φ)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    /// Equilibrium position.
    pub center: DVec2,
    /// Peak displacement vector.
    pub amplitude: DVec2,
    /// Angular frequency ω.
    pub angular_frequency: f64,
    /// Phase φ at `t = 0`.
    pub phase: f64,
}

impl Trajectory for Oscillation {
    fn position(&self, t: f64) -> DVec2 {
        self.center + self.amplitude * (self.angular_frequency * t + self.phase).sin()
    }

    fn velocity(&self, t: f64) -> DVec2 {
        self.amplitude
            * self.angular_frequency
            * (self.angular_frequency * t + self.phase).cos()
    }
}

/// Piecewise-linear motion through time-stamped keyframes.
///
/// Before the first keyframe the charge sits at the first position;
/// after the last it holds the last position.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoints {
    keys: SmallVec<[(f64, DVec2); 8]>,
}

impl Waypoints {
    /// Build from `(time, position)` keyframes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - there are no keyframes
    /// - a time or position is non-finite
    /// - times are not strictly increasing
    pub fn new(keys: impl IntoIterator<Item = (f64, DVec2)>) -> Result<Self, String> {
        let keys: SmallVec<[(f64, DVec2); 8]> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err("at least one keyframe is required".to_string());
        }
        for (t, p) in &keys {
            if !t.is_finite() || !p.is_finite() {
                return Err(format!("keyframe ({t}, {p}) is not finite"));
            }
        }
        if let Some(w) = keys.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(format!(
                "keyframe times must be strictly increasing: {} then {}",
                w[0].0, w[1].0
            ));
        }
        Ok(Self { keys })
    }

    /// The keyframes in time order.
    pub fn keys(&self) -> &[(f64, DVec2)] {
        &self.keys
    }

    /// Index of the segment `[keys[k], keys[k+1]]` containing `t`, or
    /// `None` when `t` lies outside the keyed interval.
    fn segment(&self, t: f64) -> Option<usize> {
        let n = self.keys.len();
        if n < 2 || t < self.keys[0].0 || t >= self.keys[n - 1].0 {
            return None;
        }
        let upper = self.keys.partition_point(|(kt, _)| *kt <= t);
        Some(upper - 1)
    }
}

impl Trajectory for Waypoints {
    fn position(&self, t: f64) -> DVec2 {
        match self.segment(t) {
            Some(k) => {
                let (t0, p0) = self.keys[k];
                let (t1, p1) = self.keys[k + 1];
                p0.lerp(p1, (t - t0) / (t1 - t0))
            }
            None if t < self.keys[0].0 => self.keys[0].1,
            None => self.keys[self.keys.len() - 1].1,
        }
    }

    fn velocity(&self, t: f64) -> DVec2 {
        match self.segment(t) {
            Some(k) => {
                let (t0, p0) = self.keys[k];
                let (t1, p1) = self.keys[k + 1];
                (p1 - p0) / (t1 - t0)
            }
            None => DVec2::ZERO,
        }
    }
}

/// Serializable trajectory description.
///
/// ```
/// use quiver_core::Trajectory;
/// use quiver_field::TrajectorySpec;
///
/// let spec = TrajectorySpec::Circular {
///     center: [0.0, 0.0],
///     radius: 2.0,
///     angular_velocity: 1.0,
///     phase: 0.0,
/// };
/// let trajectory = spec.build().unwrap();
/// assert_eq!(trajectory.position(0.0).x, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrajectorySpec {
    /// See [`Stationary`].
    Stationary {
        /// Fixed position.
        position: [f64; 2],
    },
    /// See [`CircularOrbit`].
    Circular {
        /// Orbit center.
        center: [f64; 2],
        /// Orbit radius.
        radius: f64,
        /// Angular velocity.
        angular_velocity: f64,
        /// Phase at `t = 0`.
        #[serde(default)]
        phase: f64,
    },
    /// See [`LinearMotion`].
    Linear {
        /// Position at `t = 0`.
        start: [f64; 2],
        /// Constant velocity.
        velocity: [f64; 2],
    },
    /// See [`Oscillation`].
    Oscillating {
        /// Equilibrium position.
        center: [f64; 2],
        /// Peak displacement.
        amplitude: [f64; 2],
        /// Angular frequency.
        angular_frequency: f64,
        /// Phase at `t = 0`.
        #[serde(default)]
        phase: f64,
    },
    /// See [`Waypoints`].
    Waypoints {
        /// `[time, x, y]` keyframes.
        keys: Vec<[f64; 3]>,
    },
}

impl TrajectorySpec {
    /// Validate the parameters and build a shared trajectory.
    pub fn build(&self) -> Result<Arc<dyn Trajectory>, String> {
        let finite = |name: &str, values: &[f64]| {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(format!("{name} parameters must be finite"))
            }
        };
        let trajectory: Arc<dyn Trajectory> = match *self {
            Self::Stationary { position } => {
                finite("stationary", &position)?;
                Arc::new(Stationary {
                    position: DVec2::from(position),
                })
            }
            Self::Circular {
                center,
                radius,
                angular_velocity,
                phase,
            } => {
                finite("circular", &[center[0], center[1], radius, angular_velocity, phase])?;
                Arc::new(CircularOrbit {
                    center: DVec2::from(center),
                    radius,
                    angular_velocity,
                    phase,
                })
            }
            Self::Linear { start, velocity } => {
                finite("linear", &[start[0], start[1], velocity[0], velocity[1]])?;
                Arc::new(LinearMotion {
                    start: DVec2::from(start),
                    velocity: DVec2::from(velocity),
                })
            }
            Self::Oscillating {
                center,
                amplitude,
                angular_frequency,
                phase,
            } => {
                finite(
                    "oscillating",
                    &[
                        center[0],
                        center[1],
                        amplitude[0],
                        amplitude[1],
                        angular_frequency,
                        phase,
                    ],
                )?;
                Arc::new(Oscillation {
                    center: DVec2::from(center),
                    amplitude: DVec2::from(amplitude),
                    angular_frequency,
                    phase,
                })
            }
            Self::Waypoints { ref keys } => Arc::new(Waypoints::new(
                keys.iter().map(|&[t, x, y]| (t, DVec2::new(x, y))),
            )?),
        };
        Ok(trajectory)
    }
}
