//! Formic: a stigmergic multi-agent grid simulation engine.
//!
//! A discretized landscape ([`grid::Surface`]) is populated by mobile
//! agents that sense and deposit a decaying scalar trail field. Agents
//! coordinate only through that field (stigmergy), which makes the
//! engine a building block for corridor and least-effort-path discovery
//! over raster-like terrain. The host supplies the surface (and any
//! obstacle/food layers it wants to model); the engine runs the
//! discrete-time loop.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Formic sub-crates. For most users, adding `formic` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use formic::prelude::*;
//!
//! // An 8x8 playground with a nest in the middle.
//! let surface = Surface::new(8, 8).unwrap();
//! let config = WorldConfig {
//!     surface,
//!     sites: vec![Position::new(4, 4)],
//!     behavior: Box::new(TrailBehavior::default()),
//!     spawn: SpawnPolicy::FirstSite,
//!     evaporation: 0.9,
//!     max_pheromone: None,
//!     rule: PopulationRule::default(),
//!     seed: 42,
//! };
//! let mut world = World::new(config).unwrap();
//!
//! let ant = world.spawn().unwrap();
//! let metrics = world.step(10).unwrap();
//!
//! assert_eq!(metrics.tick, TickId(10));
//! assert!(world.contains_agent(ant));
//! assert!(world
//!     .surface()
//!     .get_layer(TRAIL_LAYER)
//!     .unwrap()
//!     .iter()
//!     .any(|&v| v > 0.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `formic-core` | `Position`, `AgentId`, `TickId` |
//! | [`grid`] | `formic-grid` | `Surface`, layer registry, Moore neighbourhood |
//! | [`world`] | `formic-world` | `World`, behaviors, config, tick driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`formic-core`).
pub use formic_core as types;

/// Layered grid surface (`formic-grid`).
pub use formic_grid as grid;

/// Swarm world and tick driver (`formic-world`).
pub use formic_world as world;

/// Common imports for typical Formic usage.
///
/// ```rust
/// use formic::prelude::*;
/// ```
pub mod prelude {
    pub use formic_core::{AgentId, Position, TickId};
    pub use formic_grid::{GridError, Neighbours, Surface};
    pub use formic_world::{
        Agent, Behavior, ConfigError, MoveOutcome, PopulationRule, SpawnPolicy, TickMetrics,
        TrailBehavior, World, WorldConfig, WorldError, TRAIL_LAYER,
    };
}
