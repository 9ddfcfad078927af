//! Swarm world and tick driver for Formic stigmergy simulations.
//!
//! [`World`] owns a [`formic_grid::Surface`], the live agent population,
//! and the named sites (nests, points of interest). It drives the
//! discrete-time loop: each tick every live agent moves exactly once by
//! pheromone-weighted choice, then the trail field evaporates, then the
//! population rule runs. Agents never act on their own; the world calls
//! into them.
//!
//! Movement decisions are delegated to a [`Behavior`] strategy, the
//! extension point for different agent species. All randomness flows
//! through one seeded `ChaCha8Rng` owned by the world, so a fixed seed
//! and a fixed initial state reproduce the run exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod agent;
mod behavior;
mod config;
mod error;
mod metrics;
mod world;

pub use agent::Agent;
pub use behavior::{Behavior, TrailBehavior, TrailBehaviorBuilder};
pub use config::{ConfigError, PopulationRule, SpawnPolicy, WorldConfig};
pub use error::WorldError;
pub use metrics::TickMetrics;
pub use world::{MoveOutcome, World, TRAIL_LAYER};
