//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the builder-input for constructing a [`World`]:
//! an already-extent-configured surface, the spawn sites, the behavior
//! strategy, and the numeric policies. [`WorldConfig::validate`] checks
//! the structural invariants up front so the world constructor never has
//! to re-check them mid-simulation.
//!
//! [`World`]: crate::World

use std::error::Error;
use std::fmt;

use formic_core::Position;
use formic_grid::Surface;

use crate::behavior::Behavior;

// ── SpawnPolicy ───────────────────────────────────────────────────

/// How a newly spawned agent gets its initial position.
///
/// The policy is a configuration-time choice; every variant draws from
/// the world's `sites` list. `RandomSite` consumes the world RNG, so it
/// stays inside the determinism contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Always the first site.
    #[default]
    FirstSite,
    /// A site drawn uniformly from the world RNG.
    RandomSite,
    /// Sites in rotation, one after another.
    RoundRobin,
}

// ── PopulationRule ────────────────────────────────────────────────

/// Per-tick population control, applied after movement and evaporation.
///
/// The default rule does nothing: no spawns, no cap, no age limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationRule {
    /// Agents spawned each tick (stopping at `max_population`).
    pub spawn_per_tick: u32,
    /// Hard population cap; `None` = unbounded.
    pub max_population: Option<usize>,
    /// Maximum agent age in ticks; agents at or past it are expired.
    /// `None` = agents never age out.
    pub max_age: Option<u64>,
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The sites list is empty; every spawn policy consults it.
    NoSites,
    /// A site lies outside the surface extent.
    SiteOutOfBounds {
        /// The offending site.
        position: Position,
        /// Number of rows in the extent.
        rows: u32,
        /// Number of columns in the extent.
        cols: u32,
    },
    /// The evaporation factor is NaN, negative, or above 1.
    InvalidEvaporation {
        /// The invalid value.
        value: f32,
    },
    /// The pheromone cap is NaN, zero, or negative.
    InvalidMaxPheromone {
        /// The invalid value.
        value: f32,
    },
    /// A population rule invariant was violated.
    InvalidRule {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSites => write!(f, "at least one site is required"),
            Self::SiteOutOfBounds {
                position,
                rows,
                cols,
            } => {
                write!(f, "site {position} out of bounds [0, {rows}) x [0, {cols})")
            }
            Self::InvalidEvaporation { value } => {
                write!(f, "evaporation must be in [0, 1], got {value}")
            }
            Self::InvalidMaxPheromone { value } => {
                write!(f, "max_pheromone must be finite and > 0, got {value}")
            }
            Self::InvalidRule { reason } => write!(f, "invalid population rule: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── WorldConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a [`World`].
///
/// The host supplies the surface (with any non-pheromone layers it
/// needs, such as obstacles or food, already loaded); the world adds the trail
/// layer itself if it is absent.
///
/// [`World`]: crate::World
pub struct WorldConfig {
    /// Extent-configured surface, possibly carrying host layers.
    pub surface: Surface,
    /// Spawn points / points of interest. Must be non-empty and in bounds.
    pub sites: Vec<Position>,
    /// Movement/deposit strategy.
    pub behavior: Box<dyn Behavior>,
    /// Initial-position policy for spawns.
    pub spawn: SpawnPolicy,
    /// Per-tick multiplicative trail decay factor, in `[0, 1]`.
    pub evaporation: f32,
    /// Optional upper clamp applied to every pheromone deposit.
    pub max_pheromone: Option<f32>,
    /// Per-tick population control.
    pub rule: PopulationRule,
    /// RNG seed for deterministic simulation.
    pub seed: u64,
}

impl WorldConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Sites: non-empty, all inside the extent.
        if self.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        for &site in &self.sites {
            if !self.surface.contains(site) {
                return Err(ConfigError::SiteOutOfBounds {
                    position: site,
                    rows: self.surface.rows(),
                    cols: self.surface.cols(),
                });
            }
        }
        // 2. Evaporation factor in [0, 1].
        if !self.evaporation.is_finite() || !(0.0..=1.0).contains(&self.evaporation) {
            return Err(ConfigError::InvalidEvaporation {
                value: self.evaporation,
            });
        }
        // 3. Pheromone cap, if present, finite and positive.
        if let Some(cap) = self.max_pheromone {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::InvalidMaxPheromone { value: cap });
            }
        }
        // 4. Population rule invariants.
        if self.rule.max_population == Some(0) {
            return Err(ConfigError::InvalidRule {
                reason: "max_population must be at least 1".to_string(),
            });
        }
        if self.rule.max_age == Some(0) {
            return Err(ConfigError::InvalidRule {
                reason: "max_age must be at least 1 tick".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for WorldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldConfig")
            .field("rows", &self.surface.rows())
            .field("cols", &self.surface.cols())
            .field("sites", &self.sites.len())
            .field("behavior", &self.behavior.name())
            .field("spawn", &self.spawn)
            .field("evaporation", &self.evaporation)
            .field("max_pheromone", &self.max_pheromone)
            .field("rule", &self.rule)
            .field("seed", &self.seed)
            .finish()
    }
}
