//! The [`Surface`]: named scalar layers over a fixed 2D extent.

use crate::error::GridError;
use formic_core::Position;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// All 8 Moore offsets: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Inline neighbour list; an interior cell has exactly 8.
pub type Neighbours = SmallVec<[Position; 8]>;

/// An addressable 2D array store with named scalar layers.
///
/// The extent is fixed at construction and shared by every layer: each
/// layer is a flat row-major `rows * cols` buffer of `f32`, default-
/// initialized to `0.0` when added. Layers are registered and removed
/// dynamically by name; the registry is insertion-ordered, so iteration
/// is deterministic.
///
/// Neighbourhood queries use the 8-connected (Moore) topology with
/// absorbing edges: candidates that would fall outside the extent are
/// omitted, so corners have 3 neighbours and edge cells have 5.
#[derive(Debug, Clone)]
pub struct Surface {
    rows: u32,
    cols: u32,
    layers: IndexMap<String, Vec<f32>>,
}

impl Surface {
    /// Maximum dimension size: positions use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a surface with a fixed `rows x cols` extent and no layers.
    ///
    /// The extent is immutable for the lifetime of the surface; changing
    /// it means constructing a fresh surface. Returns
    /// `Err(GridError::InvalidExtent)` if either dimension is 0 or
    /// exceeds [`Self::MAX_DIM`].
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 || rows > Self::MAX_DIM || cols > Self::MAX_DIM {
            return Err(GridError::InvalidExtent { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            layers: IndexMap::new(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells per layer.
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether `position` lies inside the extent.
    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.row < self.rows as i32
            && position.col >= 0
            && position.col < self.cols as i32
    }

    /// Bounds-check `position` and return its flat row-major index.
    fn index_of(&self, position: Position) -> Result<usize, GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((position.row as usize) * (self.cols as usize) + position.col as usize)
    }

    /// Register a new layer of zeros under `name`.
    ///
    /// Returns `Err(GridError::DuplicateLayer)` if the name is taken;
    /// silently reusing an existing layer would mask host setup bugs.
    pub fn add_layer(&mut self, name: &str) -> Result<(), GridError> {
        if self.layers.contains_key(name) {
            return Err(GridError::DuplicateLayer {
                name: name.to_string(),
            });
        }
        self.layers
            .insert(name.to_string(), vec![0.0; self.cell_count()]);
        Ok(())
    }

    /// Delete the layer registered under `name`.
    ///
    /// Returns `Err(GridError::UnknownLayer)` if no such layer exists.
    /// Uses shift-removal so the registry keeps its insertion order.
    pub fn remove_layer(&mut self, name: &str) -> Result<(), GridError> {
        match self.layers.shift_remove(name) {
            Some(_) => Ok(()),
            None => Err(GridError::UnknownLayer {
                name: name.to_string(),
            }),
        }
    }

    /// Whether a layer is registered under `name`.
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Layer names in registration order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Borrow the live buffer for `name` (flat row-major).
    pub fn get_layer(&self, name: &str) -> Result<&[f32], GridError> {
        match self.layers.get(name) {
            Some(buf) => Ok(buf),
            None => Err(GridError::UnknownLayer {
                name: name.to_string(),
            }),
        }
    }

    /// Mutably borrow the live buffer for `name` (flat row-major).
    pub fn get_layer_mut(&mut self, name: &str) -> Result<&mut [f32], GridError> {
        match self.layers.get_mut(name) {
            Some(buf) => Ok(buf),
            None => Err(GridError::UnknownLayer {
                name: name.to_string(),
            }),
        }
    }

    /// Read the cell at `position` on the named layer.
    pub fn get(&self, name: &str, position: Position) -> Result<f32, GridError> {
        let idx = self.index_of(position)?;
        let buf = self.get_layer(name)?;
        Ok(buf[idx])
    }

    /// Write `value` to the cell at `position` on the named layer.
    pub fn set(&mut self, name: &str, position: Position, value: f32) -> Result<(), GridError> {
        let idx = self.index_of(position)?;
        let buf = self.get_layer_mut(name)?;
        buf[idx] = value;
        Ok(())
    }

    /// Multiply every cell of the named layer by `factor`, clamping the
    /// result at zero from below.
    ///
    /// With `factor` in `[0, 1]` and non-negative cells this is monotone
    /// non-increasing with a fixed point at zero: the evaporation step
    /// of a pheromone field.
    pub fn decay_layer(&mut self, name: &str, factor: f32) -> Result<(), GridError> {
        let buf = self.get_layer_mut(name)?;
        for v in buf.iter_mut() {
            *v = (*v * factor).max(0.0);
        }
        Ok(())
    }

    /// The valid Moore neighbours of `position`, in offset-table order
    /// (N, S, W, E, NW, NE, SW, SE) with out-of-extent candidates
    /// omitted.
    ///
    /// The order is fixed so that movement decisions driven by a seeded
    /// RNG are reproducible. Returns `Err(GridError::OutOfBounds)` if
    /// `position` itself lies outside the extent.
    pub fn neighbours(&self, position: Position) -> Result<Neighbours, GridError> {
        self.index_of(position)?;
        let mut result = Neighbours::new();
        for (dr, dc) in OFFSETS_8 {
            let candidate = Position::new(position.row + dr, position.col + dc);
            if self.contains(candidate) {
                result.push(candidate);
            }
        }
        Ok(result)
    }
}
