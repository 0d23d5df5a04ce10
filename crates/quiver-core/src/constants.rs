//! Physical constants consumed by the field evaluator.
//!
//! Constants are passed explicitly rather than read from process-wide
//! globals, so tests can run the evaluator against alternate (e.g. unit)
//! constants in isolation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

/// Vacuum constants in a consistent unit system.
///
/// `speed_of_light` is stored independently rather than derived, so a
/// caller can slow light down to make retardation visible at animation
/// scales. Use [`PhysicalConstants::from_vacuum`] to derive it instead.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Permittivity of free space, ε₀.
    pub permittivity: f64,
    /// Permeability of free space, μ₀.
    pub permeability: f64,
    /// Propagation speed of the field, c.
    pub speed_of_light: f64,
}

impl PhysicalConstants {
    /// CODATA 2018 SI values.
    pub const SI: Self = Self {
        permittivity: 8.854_187_812_8e-12,
        permeability: 1.256_637_062_12e-6,
        speed_of_light: 299_792_458.0,
    };

    /// Build constants with `c = 1 / sqrt(ε₀ μ₀)`.
    pub fn from_vacuum(permittivity: f64, permeability: f64) -> Self {
        Self {
            permittivity,
            permeability,
            speed_of_light: 1.0 / (permittivity * permeability).sqrt(),
        }
    }

    /// Check that every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConstantsError> {
        let checks = [
            ("permittivity", self.permittivity),
            ("permeability", self.permeability),
            ("speed_of_light", self.speed_of_light),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConstantsError { name, value });
            }
        }
        Ok(())
    }

    /// The Coulomb coefficient `k` under the given convention.
    pub fn coulomb_coefficient(&self, convention: CoulombConvention) -> f64 {
        convention.coefficient(self.permittivity)
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::SI
    }
}

/// Which constant factor multiplies `q / r²` in the field magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoulombConvention {
    /// `(1 / (4·ε₀)) · π`.
    ///
    /// Differs from the textbook constant by a factor of π². This is the
    /// default; existing renders depend on it.
    #[default]
    Reference,
    /// The textbook Coulomb constant `1 / (4π·ε₀)`.
    Standard,
}

impl CoulombConvention {
    /// Evaluate the coefficient for a given permittivity.
    pub fn coefficient(self, permittivity: f64) -> f64 {
        match self {
            Self::Reference => (1.0 / (4.0 * permittivity)) * PI,
            Self::Standard => 1.0 / (4.0 * PI * permittivity),
        }
    }
}

/// A physical constant was non-finite or non-positive.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantsError {
    /// Name of the offending constant.
    pub name: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for ConstantsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be finite and positive, got {}",
            self.name, self.value
        )
    }
}

impl Error for ConstantsError {}
