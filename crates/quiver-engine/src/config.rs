//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the builder-input for a [`FieldAnimation`]. It
//! is plain serde data so that whole runs can be described in TOML;
//! [`validate()`](SimulationConfig::validate) checks every invariant up
//! front so that a run never starts with parameters it cannot finish.
//!
//! [`FieldAnimation`]: crate::animation::FieldAnimation

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use quiver_core::{ConstantsError, CoulombConvention, PhysicalConstants};
use quiver_field::{
    ChargeSource, DerivativeMode, RetardedFieldEvaluator, SingularityPolicy, TrajectorySpec,
};
use quiver_space::{Axis, AxisSpec, Grid2D, SpaceError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::scene::Scene;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a [`SimulationConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `steps` is zero.
    NoSteps,
    /// `start_time` is non-finite, or the last frame time overflows.
    InvalidStartTime {
        /// The invalid value.
        value: f64,
    },
    /// A physical constant is invalid.
    Constants(ConstantsError),
    /// A grid axis is invalid.
    Space(SpaceError),
    /// The evaluator rejected its configuration.
    Evaluator {
        /// Description of the rejected setting.
        reason: String,
    },
    /// A charge magnitude is non-finite.
    InvalidCharge {
        /// Name of the charge.
        name: String,
        /// The invalid value.
        value: f64,
    },
    /// Two charges share a name.
    DuplicateCharge {
        /// The repeated name.
        name: String,
    },
    /// A trajectory description is invalid.
    InvalidTrajectory {
        /// Name of the charge.
        name: String,
        /// Description of the failure.
        reason: String,
    },
    /// Reading or writing a config file failed.
    Io {
        /// The file path.
        path: String,
        /// The underlying I/O error message.
        reason: String,
    },
    /// The config file is not valid TOML for this schema.
    Parse {
        /// The parser's message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => write!(f, "dt must be finite and positive, got {value}"),
            Self::NoSteps => write!(f, "steps must be at least 1"),
            Self::InvalidStartTime { value } => {
                write!(f, "start_time must be finite, got {value}")
            }
            Self::Constants(e) => write!(f, "constants: {e}"),
            Self::Space(e) => write!(f, "grid: {e}"),
            Self::Evaluator { reason } => write!(f, "evaluator: {reason}"),
            Self::InvalidCharge { name, value } => {
                write!(f, "charge '{name}' must be finite, got {value}")
            }
            Self::DuplicateCharge { name } => write!(f, "duplicate charge name '{name}'"),
            Self::InvalidTrajectory { name, reason } => {
                write!(f, "trajectory of charge '{name}': {reason}")
            }
            Self::Io { path, reason } => write!(f, "{path}: {reason}"),
            Self::Parse { reason } => write!(f, "parse error: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constants(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstantsError> for ConfigError {
    fn from(e: ConstantsError) -> Self {
        Self::Constants(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── Sections ───────────────────────────────────────────────────────

/// Time axis of the animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Time between frames. Default: 0.05.
    pub dt: f64,
    /// Number of frames. Default: 200.
    pub steps: u64,
    /// Time of frame 0. Default: 0.
    pub start_time: f64,
    /// Pause after presenting each frame, in milliseconds. 0 disables
    /// pacing. Default: 0.
    pub frame_delay_ms: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            steps: 200,
            start_time: 0.0,
            frame_delay_ms: 0,
        }
    }
}

impl TimeConfig {
    /// Check that every frame time is finite.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `dt` is not finite and positive
    /// - `steps` is zero
    /// - `start_time`, or the time of the last frame, is not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if self.steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        if !self.start_time.is_finite() {
            return Err(ConfigError::InvalidStartTime {
                value: self.start_time,
            });
        }
        let last = self.start_time + (self.steps - 1) as f64 * self.dt;
        if !last.is_finite() {
            return Err(ConfigError::InvalidStartTime { value: last });
        }
        Ok(())
    }
}

/// Sampling grid bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// x axis.
    pub x: AxisSpec,
    /// y axis.
    pub y: AxisSpec,
}

impl Default for GridConfig {
    /// `[-5.25, 5.25)` in steps of 0.5 on both axes. The quarter offset
    /// keeps sample points off the default orbit.
    fn default() -> Self {
        let axis = AxisSpec {
            lower: -5.25,
            upper: 5.25,
            step: 0.5,
        };
        Self { x: axis, y: axis }
    }
}

/// One named charge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeConfig {
    /// Unique name within the scene.
    pub name: String,
    /// Signed charge.
    pub charge: f64,
    /// How the charge moves.
    pub trajectory: TrajectorySpec,
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete description of one animation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Coulomb coefficient convention.
    pub convention: CoulombConvention,
    /// Vacuum constants.
    pub constants: PhysicalConstants,
    /// Behaviour when a sample point coincides with a retarded charge.
    pub singularity: SingularityPolicy,
    /// How divergence and curl are computed.
    pub derivatives: DerivativeMode,
    /// Frame timing.
    pub time: TimeConfig,
    /// Sampling grid.
    pub grid: GridConfig,
    /// Charges in summation order.
    pub charges: Vec<ChargeConfig>,
}

impl Default for SimulationConfig {
    /// A `+1`/`-1` pair orbiting the origin at radius 2, half a turn apart.
    fn default() -> Self {
        let orbit = |phase: f64| TrajectorySpec::Circular {
            center: [0.0, 0.0],
            radius: 2.0,
            angular_velocity: 1.0,
            phase,
        };
        Self {
            convention: CoulombConvention::default(),
            constants: PhysicalConstants::default(),
            singularity: SingularityPolicy::default(),
            derivatives: DerivativeMode::default(),
            time: TimeConfig::default(),
            grid: GridConfig::default(),
            charges: vec![
                ChargeConfig {
                    name: "positive".to_string(),
                    charge: 1.0,
                    trajectory: orbit(0.0),
                },
                ChargeConfig {
                    name: "negative".to_string(),
                    charge: -1.0,
                    trajectory: orbit(std::f64::consts::PI),
                },
            ],
        }
    }
}

impl SimulationConfig {
    /// Validate all invariants.
    ///
    /// Pure validation: builds and discards the grid, evaluator, and
    /// trajectories. [`FieldAnimation::new`](crate::animation::FieldAnimation::new)
    /// calls this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Time axis.
        self.time.validate()?;
        // 2. Constants and evaluator settings.
        self.constants.validate()?;
        self.evaluator()?;
        // 3. Grid.
        self.grid()?;
        // 4. Charges.
        let mut seen = HashSet::new();
        for c in &self.charges {
            if !seen.insert(c.name.as_str()) {
                return Err(ConfigError::DuplicateCharge {
                    name: c.name.clone(),
                });
            }
            self.charge_source(c)?;
        }
        Ok(())
    }

    /// Build the sampling grid.
    pub fn grid(&self) -> Result<Grid2D, ConfigError> {
        let xs = Axis::from_spec(&self.grid.x)?;
        let ys = Axis::from_spec(&self.grid.y)?;
        Ok(Grid2D::new(xs, ys)?)
    }

    /// Build the per-charge evaluator.
    pub fn evaluator(&self) -> Result<RetardedFieldEvaluator, ConfigError> {
        RetardedFieldEvaluator::builder()
            .constants(self.constants)
            .convention(self.convention)
            .singularity(self.singularity)
            .derivatives(self.derivatives)
            .build()
            .map_err(|reason| ConfigError::Evaluator { reason })
    }

    fn charge_source(&self, c: &ChargeConfig) -> Result<ChargeSource, ConfigError> {
        if !c.charge.is_finite() {
            return Err(ConfigError::InvalidCharge {
                name: c.name.clone(),
                value: c.charge,
            });
        }
        let trajectory = c
            .trajectory
            .build()
            .map_err(|reason| ConfigError::InvalidTrajectory {
                name: c.name.clone(),
                reason,
            })?;
        Ok(ChargeSource::from_shared(c.charge, trajectory))
    }

    /// Build the named charge scene, in configuration order.
    pub fn scene(&self) -> Result<Scene, ConfigError> {
        let mut scene = Scene::new();
        for c in &self.charges {
            scene.insert(c.name.clone(), self.charge_source(c)?)?;
        }
        Ok(scene)
    }

    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Load and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a TOML file if it exists.
    ///
    /// Returns `Ok(None)` when there is no file at `path`. Any other read
    /// failure is [`ConfigError::Io`].
    pub fn try_load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load a TOML file, falling back to the defaults if it is missing,
    /// unreadable, or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e @ ConfigError::Io { .. }) => {
                warn!(path = %path.display(), error = %e, "failed to read config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write this configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
