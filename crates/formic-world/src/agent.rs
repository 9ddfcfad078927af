//! The [`Agent`]: a mobile entity with position and identity.

use formic_core::{Position, TickId};

/// A single mobile agent.
///
/// Agents carry no memory of where they have been; movement history is
/// reconstructed from the trail field, not from the agent. The birth
/// tick exists only so the population rule can expire old agents.
///
/// Agents live exclusively in the world's collection; membership there
/// is the sole life/death signal. An agent outside that collection is
/// dead and must not be referenced.
#[derive(Clone, Copy, Debug)]
pub struct Agent {
    pub(crate) position: Position,
    pub(crate) born: TickId,
}

impl Agent {
    pub(crate) fn new(position: Position, born: TickId) -> Self {
        Self { position, born }
    }

    /// The agent's current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The tick on which the agent was spawned.
    pub fn born(&self) -> TickId {
        self.born
    }
}
