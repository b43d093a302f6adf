use crate::{Error, Vector3D};

mod cell;
pub use self::cell::{UnitCell, CellShape};

mod neighbors;
pub use self::neighbors::NeighborsList;

mod simple_system;
pub use self::simple_system::SimpleSystem;

#[cfg(test)]
pub(crate) mod test_utils;

/// Pair of atoms coming from a neighbor list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    /// index of the first atom in the pair
    pub first: usize,
    /// index of the second atom in the pair
    pub second: usize,
    /// distance between the two atoms
    pub distance: f64,
    /// vector from the first atom to the second atom, accounting for
    /// periodic boundary conditions. This is `position[second] -
    /// position[first] + H * cell_shift` where `H` is the cell matrix.
    pub vector: Vector3D,
    /// How many cell shifts were applied to the `second` atom to create
    /// this pair
    pub cell_shift_indices: [i32; 3],
}

/// A `System` provides read access to an atomic configuration (positions,
/// species and unit cell) and computes neighbor lists on demand; it
/// abstracts over how the underlying structure is stored or generated.
///
/// Concrete implementations can be backed by a simulation engine, by a
/// structure loaded from a file, or by a synthetic test double; descriptor
/// calculators only ever see this trait.
///
/// The expected call order is `compute_neighbors` first, once per cutoff a
/// caller needs; then any number of calls to `pairs` and `pairs_containing`
/// until the next `compute_neighbors` call, which replaces the list
/// wholesale.
pub trait System: Send + Sync {
    /// Get the unit cell for this system. An infinite cell means the
    /// system is not periodic, and all pairs are then computed with a zero
    /// image shift.
    fn cell(&self) -> Result<UnitCell, Error>;

    /// Get the number of atoms in this system. This must be stable across
    /// all other calls on the same instance.
    fn size(&self) -> Result<usize, Error>;

    /// Get the species of all atoms in this system. The returned value
    /// must be a slice of length `self.size()`, where each different
    /// species is identified with a different integer value. These values
    /// are usually the atomic numbers, but don't have to.
    fn species(&self) -> Result<&[u32], Error>;

    /// Get the positions of all atoms in this system. The returned value
    /// must be a slice of length `self.size()` containing the cartesian
    /// coordinates of all atoms, in the same length unit as the cutoff and
    /// the unit cell.
    fn positions(&self) -> Result<&[Vector3D], Error>;

    /// Compute the neighbor list for the given `cutoff`, and store it for
    /// later access with `pairs` or `pairs_containing`. Computing a new
    /// list discards any previously computed one.
    ///
    /// This fails with [`Error::InvalidCutoff`] if the cutoff is not a
    /// strictly positive number, leaving any previous list untouched.
    fn compute_neighbors(&mut self, cutoff: f64) -> Result<(), Error>;

    /// Get the list of pairs in this system, as computed by the last call
    /// to `compute_neighbors`. This list contains each pair only once
    /// (i.e. as `i-j` but not also as `j-i`), never contains `i-i` pairs
    /// within the same periodic image, and only contains pairs where the
    /// distance between the atoms is below the cutoff.
    ///
    /// This fails with [`Error::NeighborsNotComputed`] if
    /// `compute_neighbors` has not been called successfully yet.
    fn pairs(&self) -> Result<&[Pair], Error>;

    /// Get the pairs from the current list which contain the atom with the
    /// given index, i.e. exactly the pairs where `center` is either
    /// `first` or `second`. The pair `i-j` is included in the return of
    /// both `pairs_containing(i)` and `pairs_containing(j)`.
    ///
    /// This fails with [`Error::InvalidAtomIndex`] if `center` is not in
    /// `[0, self.size())`, and with [`Error::NeighborsNotComputed`] if
    /// `compute_neighbors` has not been called successfully yet.
    fn pairs_containing(&self, center: usize) -> Result<&[Pair], Error>;
}

#[cfg(test)]
mod tests {
    use super::test_utils::test_systems;

    #[test]
    fn pair_views_are_consistent() {
        let names = ["methane", "water", "CH", "NaCl", "CsCl", "ZnS"];
        for (system, name) in test_systems(&names).iter_mut().zip(&names) {
            let cutoff = 1.2;
            system.compute_neighbors(cutoff).unwrap();

            let pairs = system.pairs().unwrap().to_vec();
            for pair in &pairs {
                assert!(pair.distance < cutoff, "pair above cutoff in {}", name);
                assert!((pair.vector.norm() - pair.distance).abs() < 1e-12);
            }

            for center in 0..system.size().unwrap() {
                let expected = pairs.iter()
                    .filter(|pair| pair.first == center || pair.second == center)
                    .copied()
                    .collect::<Vec<_>>();

                assert_eq!(
                    system.pairs_containing(center).unwrap(),
                    &expected[..],
                    "inconsistent pairs_containing({}) in {}", center, name
                );
            }
        }
    }

    #[test]
    fn no_duplicated_pairs() {
        for system in &mut test_systems(&["methane", "NaCl", "CsCl", "ZnS"]) {
            system.compute_neighbors(1.2).unwrap();

            let pairs = system.pairs().unwrap();
            for (i, pair) in pairs.iter().enumerate() {
                for other in &pairs[(i + 1)..] {
                    let same_triple = pair.first == other.first
                        && pair.second == other.second
                        && pair.cell_shift_indices == other.cell_shift_indices;
                    let reversed = pair.first == other.second && pair.second == other.first
                        && pair.cell_shift_indices == [
                            -other.cell_shift_indices[0],
                            -other.cell_shift_indices[1],
                            -other.cell_shift_indices[2],
                        ];
                    assert!(!same_triple && !reversed, "duplicated pair {:?}", pair);
                }
            }
        }
    }
}
