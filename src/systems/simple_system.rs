use crate::{Error, Vector3D};

use super::{NeighborsList, Pair, System, UnitCell};

/// A simple implementation of [`System`], owning its atoms, to use when no
/// engine-backed system is available
#[derive(Clone, Debug)]
pub struct SimpleSystem {
    cell: UnitCell,
    species: Vec<u32>,
    positions: Vec<Vector3D>,
    neighbors: Option<NeighborsList>,
}

impl SimpleSystem {
    /// Create a new empty system with the given unit cell
    pub fn new(cell: UnitCell) -> SimpleSystem {
        SimpleSystem {
            cell: cell,
            species: Vec::new(),
            positions: Vec::new(),
            neighbors: None,
        }
    }

    /// Add an atom with the given species and position to this system
    pub fn add_atom(&mut self, species: u32, position: Vector3D) {
        self.species.push(species);
        self.positions.push(position);
    }

    #[cfg(test)]
    pub(crate) fn positions_mut(&mut self) -> &mut [Vector3D] {
        // any change to the positions invalidates the neighbor list
        self.neighbors = None;
        return &mut self.positions;
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, cell: UnitCell) {
        // changing the cell invalidates the neighbor list
        self.neighbors = None;
        self.cell = cell;
    }

    fn neighbors(&self) -> Result<&NeighborsList, Error> {
        self.neighbors.as_ref().ok_or(Error::NeighborsNotComputed)
    }
}

impl System for SimpleSystem {
    fn size(&self) -> Result<usize, Error> {
        Ok(self.species.len())
    }

    fn positions(&self) -> Result<&[Vector3D], Error> {
        Ok(&self.positions)
    }

    fn species(&self) -> Result<&[u32], Error> {
        Ok(&self.species)
    }

    fn cell(&self) -> Result<UnitCell, Error> {
        Ok(self.cell)
    }

    #[allow(clippy::float_cmp)]
    fn compute_neighbors(&mut self, cutoff: f64) -> Result<(), Error> {
        if !(cutoff > 0.0 && cutoff.is_finite()) {
            // leave any existing list untouched
            return Err(Error::InvalidCutoff(cutoff));
        }

        // re-use the already computed list if possible
        if let Some(ref neighbors) = self.neighbors {
            if neighbors.cutoff == cutoff {
                return Ok(());
            }
        }

        self.neighbors = Some(NeighborsList::new(&self.positions, self.cell, cutoff));
        Ok(())
    }

    fn pairs(&self) -> Result<&[Pair], Error> {
        Ok(&self.neighbors()?.pairs)
    }

    fn pairs_containing(&self, center: usize) -> Result<&[Pair], Error> {
        if center >= self.species.len() {
            return Err(Error::InvalidAtomIndex {
                index: center,
                size: self.species.len(),
            });
        }
        Ok(&self.neighbors()?.pairs_by_atom[center])
    }
}

impl std::convert::TryFrom<&dyn System> for SimpleSystem {
    type Error = Error;

    fn try_from(system: &dyn System) -> Result<SimpleSystem, Error> {
        let mut new = SimpleSystem::new(system.cell()?);
        for (&species, &position) in system.species()?.iter().zip(system.positions()?) {
            new.add_atom(species, position);
        }
        return Ok(new);
    }
}
