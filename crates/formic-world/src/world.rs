//! The [`World`]: population lifecycle, sensing, movement, and the
//! tick driver.

use std::time::Instant;

use formic_core::{AgentId, Position, TickId};
use formic_grid::{Neighbours, Surface};
use indexmap::IndexMap;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::agent::Agent;
use crate::behavior::Behavior;
use crate::config::{ConfigError, PopulationRule, SpawnPolicy, WorldConfig};
use crate::error::WorldError;
use crate::metrics::TickMetrics;

/// Name of the pheromone trail layer on the surface.
///
/// The world guarantees this layer exists before any pheromone read or
/// write: [`World::new`] creates it if the host did not.
pub const TRAIL_LAYER: &str = "trail";

/// Result of a single movement decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The agent moved to the given cell and deposited there.
    Moved(Position),
    /// No valid neighbour existed (degenerate extent) or the behavior
    /// declined to move; the agent stays put. Reported, not an error.
    Blocked,
}

/// The swarm world: one surface, the live population, the sites.
///
/// Single-threaded and tick-driven: one [`step`](World::step) call
/// fully completes (every live agent moved once, the field evaporated
/// once, the population rule applied) before the next begins. The
/// surface and the agent collection are exclusively owned and mutated
/// here; no other component holds a writable reference to either.
///
/// Within a tick, agents move one at a time in the deterministic order
/// of the tick-start membership snapshot and read the trail as it
/// currently is; deposits targeting the same cell resolve
/// last-writer-wins in that processing order.
pub struct World {
    surface: Surface,
    agents: IndexMap<AgentId, Agent>,
    sites: Vec<Position>,
    behavior: Box<dyn Behavior>,
    spawn_policy: SpawnPolicy,
    evaporation: f32,
    max_pheromone: Option<f32>,
    rule: PopulationRule,
    rng: ChaCha8Rng,
    next_agent: u64,
    spawn_cursor: usize,
    tick: TickId,
    last_metrics: TickMetrics,
}

impl World {
    /// Construct a world from a validated configuration.
    ///
    /// Consumes the `WorldConfig`. Ensures the [`TRAIL_LAYER`] exists
    /// on the surface, creating it when the host has not.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let WorldConfig {
            mut surface,
            sites,
            behavior,
            spawn,
            evaporation,
            max_pheromone,
            rule,
            seed,
        } = config;

        if !surface.has_layer(TRAIL_LAYER) {
            surface
                .add_layer(TRAIL_LAYER)
                .expect("layer absence just checked");
        }

        Ok(Self {
            surface,
            agents: IndexMap::new(),
            sites,
            behavior,
            spawn_policy: spawn,
            evaporation,
            max_pheromone,
            rule,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_agent: 0,
            spawn_cursor: 0,
            tick: TickId(0),
            last_metrics: TickMetrics::default(),
        })
    }

    // ── Population lifecycle ────────────────────────────────────

    /// Spawn a new agent at a position chosen by the spawn policy.
    ///
    /// Population size increases by exactly one; the returned id is a
    /// member of [`agents`](World::agents) immediately after. Errors
    /// with [`WorldError::PopulationLimit`] when a cap is configured
    /// and already reached.
    pub fn spawn(&mut self) -> Result<AgentId, WorldError> {
        if let Some(limit) = self.rule.max_population {
            if self.agents.len() >= limit {
                return Err(WorldError::PopulationLimit { limit });
            }
        }
        Ok(self.spawn_unchecked())
    }

    /// Spawn without the cap check; the driver's population phase stops
    /// at the cap on its own.
    fn spawn_unchecked(&mut self) -> AgentId {
        let position = self.spawn_position();
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        self.agents.insert(id, Agent::new(position, self.tick));
        id
    }

    /// Initial position per the configured [`SpawnPolicy`]. The sites
    /// list is validated non-empty at construction.
    fn spawn_position(&mut self) -> Position {
        match self.spawn_policy {
            SpawnPolicy::FirstSite => self.sites[0],
            SpawnPolicy::RandomSite => {
                let idx = self.rng.random_range(0..self.sites.len());
                self.sites[idx]
            }
            SpawnPolicy::RoundRobin => {
                let idx = self.spawn_cursor % self.sites.len();
                self.spawn_cursor += 1;
                self.sites[idx]
            }
        }
    }

    /// Remove an agent from the population.
    ///
    /// Membership is the sole life/death signal; a second removal of
    /// the same id reports [`WorldError::UnknownAgent`], which is how
    /// double-kill bugs surface.
    pub fn remove(&mut self, id: AgentId) -> Result<(), WorldError> {
        match self.agents.shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(WorldError::UnknownAgent { id }),
        }
    }

    // ── Sensing and the trail field ─────────────────────────────

    /// Read the trail value at `position`.
    pub fn read_pheromone(&self, position: Position) -> Result<f32, WorldError> {
        Ok(self.surface.get(TRAIL_LAYER, position)?)
    }

    /// Overwrite the trail cell at `position` with `amount`.
    ///
    /// Overwrite, not accumulate: trail strength reflects most-recent
    /// visitation rather than cumulative traffic. The configured
    /// `max_pheromone` cap, if any, clamps the written value.
    pub fn deposit_pheromone(&mut self, position: Position, amount: f32) -> Result<(), WorldError> {
        let value = match self.max_pheromone {
            Some(cap) => amount.min(cap),
            None => amount,
        };
        self.surface.set(TRAIL_LAYER, position, value)?;
        Ok(())
    }

    /// The valid Moore neighbours of `position`, in the surface's fixed
    /// offset order.
    pub fn neighbours(&self, position: Position) -> Result<Neighbours, WorldError> {
        Ok(self.surface.neighbours(position)?)
    }

    /// Apply one round of trail evaporation to the whole field.
    ///
    /// The driver calls this exactly once per tick; agents never do.
    pub fn evaporate(&mut self) -> Result<(), WorldError> {
        self.surface.decay_layer(TRAIL_LAYER, self.evaporation)?;
        Ok(())
    }

    // ── Movement ────────────────────────────────────────────────

    /// Move one agent by the pheromone-weighted transition rule.
    ///
    /// Candidates are the Moore neighbours of the agent's cell, read
    /// with their current trail values; the behavior picks one, the
    /// agent's position updates, and the behavior's deposit amount is
    /// written at the new cell. An agent with no valid neighbour does
    /// not move and reports [`MoveOutcome::Blocked`].
    pub fn move_agent(&mut self, id: AgentId) -> Result<MoveOutcome, WorldError> {
        let from = match self.agents.get(&id) {
            Some(agent) => agent.position,
            None => return Err(WorldError::UnknownAgent { id }),
        };

        let neighbours = self.surface.neighbours(from)?;
        if neighbours.is_empty() {
            return Ok(MoveOutcome::Blocked);
        }

        let mut candidates: Vec<(Position, f32)> = Vec::with_capacity(neighbours.len());
        for position in neighbours {
            let reading = self.surface.get(TRAIL_LAYER, position)?;
            candidates.push((position, reading));
        }

        let index = match self.behavior.choose(&candidates, &mut self.rng) {
            Some(index) => index,
            None => return Ok(MoveOutcome::Blocked),
        };
        let to = match candidates.get(index) {
            Some(&(position, _)) => position,
            None => {
                return Err(WorldError::BehaviorFailed {
                    name: self.behavior.name().to_string(),
                    reason: format!("chose candidate {index} of {}", candidates.len()),
                });
            }
        };

        let amount = self.behavior.deposit(from, to);
        self.deposit_pheromone(to, amount)?;
        match self.agents.get_mut(&id) {
            Some(agent) => agent.position = to,
            None => return Err(WorldError::UnknownAgent { id }),
        }
        Ok(MoveOutcome::Moved(to))
    }

    // ── Tick driver ─────────────────────────────────────────────

    /// Advance the simulation by `ticks` discrete time steps.
    ///
    /// Per tick, in order: (a) move every agent in the tick-start
    /// membership snapshot exactly once, in insertion order; agents
    /// spawned or removed mid-tick do not affect this tick's roster;
    /// (b) evaporate the trail field once; (c) apply the population
    /// rule (expire aged agents, then spawn up to the cap).
    ///
    /// Returns the metrics of the final tick (or the previous metrics
    /// when `ticks` is 0).
    pub fn step(&mut self, ticks: u64) -> Result<TickMetrics, WorldError> {
        for _ in 0..ticks {
            self.step_once()?;
        }
        Ok(self.last_metrics.clone())
    }

    fn step_once(&mut self) -> Result<(), WorldError> {
        let start = Instant::now();
        self.tick = TickId(self.tick.0 + 1);
        let mut metrics = TickMetrics {
            tick: self.tick,
            ..TickMetrics::default()
        };

        // (a) Movement over the tick-start roster.
        let roster: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in roster {
            if !self.agents.contains_key(&id) {
                continue; // removed mid-tick
            }
            match self.move_agent(id)? {
                MoveOutcome::Moved(_) => metrics.moved += 1,
                MoveOutcome::Blocked => metrics.blocked += 1,
            }
        }

        // (b) Evaporation, exactly once per tick.
        self.evaporate()?;

        // (c) Population rule: expire, then spawn.
        if let Some(max_age) = self.rule.max_age {
            let now = self.tick.0;
            let expired: Vec<AgentId> = self
                .agents
                .iter()
                .filter(|(_, agent)| now.saturating_sub(agent.born.0) >= max_age)
                .map(|(id, _)| *id)
                .collect();
            for id in expired {
                self.agents.shift_remove(&id);
                metrics.expired += 1;
            }
        }
        for _ in 0..self.rule.spawn_per_tick {
            if let Some(limit) = self.rule.max_population {
                if self.agents.len() >= limit {
                    break;
                }
            }
            self.spawn_unchecked();
            metrics.spawned += 1;
        }

        metrics.total_us = start.elapsed().as_micros() as u64;
        self.last_metrics = metrics;
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Snapshot of the current population: `(id, position)` pairs in
    /// insertion order.
    pub fn agents(&self) -> Vec<(AgentId, Position)> {
        self.agents
            .iter()
            .map(|(id, agent)| (*id, agent.position))
            .collect()
    }

    /// Number of live agents.
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Whether `id` is a current population member.
    pub fn contains_agent(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// The current position of a live agent.
    pub fn position(&self, id: AgentId) -> Result<Position, WorldError> {
        match self.agents.get(&id) {
            Some(agent) => Ok(agent.position),
            None => Err(WorldError::UnknownAgent { id }),
        }
    }

    /// Borrow a live agent.
    pub fn agent(&self, id: AgentId) -> Result<&Agent, WorldError> {
        match self.agents.get(&id) {
            Some(agent) => Ok(agent),
            None => Err(WorldError::UnknownAgent { id }),
        }
    }

    /// The configured sites.
    pub fn sites(&self) -> &[Position] {
        &self.sites
    }

    /// Borrow the surface, e.g. for reporting or visualization.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutably borrow the surface, e.g. for host layer setup.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// The current tick. Tick 0 is the state before any step.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Metrics of the most recent tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }
}
