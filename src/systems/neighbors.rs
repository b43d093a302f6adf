use log::warn;
use ndarray::Array3;

use crate::{Matrix3, Vector3D};
use super::{Pair, UnitCell};

/// Upper bound on the total number of bins in a cell list, to keep memory
/// use in check when a small unit cell is combined with a large cutoff
const MAX_NUMBER_OF_CELLS: f64 = 1e5;

/// A cell shift is the number of periodic images along each lattice vector
/// separating the actual position of an atom from the image of this atom
/// used in a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellShift([i32; 3]);

impl std::ops::Add<CellShift> for CellShift {
    type Output = CellShift;

    fn add(mut self, other: CellShift) -> CellShift {
        self.0[0] += other[0];
        self.0[1] += other[1];
        self.0[2] += other[2];
        return self;
    }
}

impl std::ops::Sub<CellShift> for CellShift {
    type Output = CellShift;

    fn sub(mut self, other: CellShift) -> CellShift {
        self.0[0] -= other[0];
        self.0[1] -= other[1];
        self.0[2] -= other[2];
        return self;
    }
}

impl std::ops::Index<usize> for CellShift {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        &self.0[index]
    }
}

impl CellShift {
    /// Get the cartesian translation corresponding to this shift, for the
    /// given cell matrix (one lattice vector per row)
    pub fn cartesian(&self, cell: &Matrix3) -> Vector3D {
        let shift = Vector3D::new(self[0] as f64, self[1] as f64, self[2] as f64);
        // shift expressed on the lattice vectors basis, i.e. row vector
        // times matrix
        cell.transposed() * shift
    }
}

/// Candidate pair produced by the cell list, before distance filtering. The
/// vector between the two atoms can be reconstructed as
/// `position[second] - position[first] + shift.cartesian(cell)`.
#[derive(Debug, Clone)]
struct CandidatePair {
    first: usize,
    second: usize,
    shift: CellShift,
}

/// An atom stored inside one bin of the cell list
#[derive(Debug, Clone)]
struct BinnedAtom {
    /// index of the atom in the original system
    index: usize,
    /// shift from the actual atom position to its image wrapped inside the
    /// unit cell
    shift: CellShift,
}

/// Spatial binning of the atoms in a system.
///
/// Atoms are sorted into a grid of bins sized from the cutoff; candidate
/// pairs are then built by looking at the bins surrounding each atom's bin,
/// instead of at every other atom.
#[derive(Debug, Clone)]
struct CellList {
    /// how many bins we need to search in each direction to cover the
    /// cutoff
    n_search: [i32; 3],
    /// the bins, as a 3D grid
    bins: Array3<Vec<BinnedAtom>>,
    /// unit cell of the system being binned
    cell: UnitCell,
}

impl CellList {
    /// Create a cell list for the given unit cell and cutoff
    fn new(cell: UnitCell, cutoff: f64) -> CellList {
        let distances_between_faces = if cell.is_infinite() {
            // pretend we have a cell of size one, `n_search` will then
            // cover everything up to the cutoff
            Vector3D::new(1.0, 1.0, 1.0)
        } else {
            cell.distances_between_faces()
        };

        let mut n_bins = [
            f64::clamp(f64::trunc(distances_between_faces[0] / cutoff), 1.0, f64::INFINITY),
            f64::clamp(f64::trunc(distances_between_faces[1] / cutoff), 1.0, f64::INFINITY),
            f64::clamp(f64::trunc(distances_between_faces[2] / cutoff), 1.0, f64::INFINITY),
        ];
        assert!(n_bins[0].is_finite() && n_bins[1].is_finite() && n_bins[2].is_finite());

        if n_bins[0] * n_bins[1] * n_bins[2] > MAX_NUMBER_OF_CELLS {
            // rescale down to roughly MAX_NUMBER_OF_CELLS bins, keeping the
            // relative number of bins along each direction
            let ratio_x_y = n_bins[0] / n_bins[1];
            let ratio_y_z = n_bins[1] / n_bins[2];

            n_bins[2] = f64::trunc(f64::cbrt(MAX_NUMBER_OF_CELLS / (ratio_x_y * ratio_y_z * ratio_y_z)));
            n_bins[1] = f64::trunc(ratio_y_z * n_bins[2]);
            n_bins[0] = f64::trunc(ratio_x_y * n_bins[1]);
        }

        // number of neighboring bins to visit to be sure we find all pairs
        // below the cutoff
        let mut n_search = [
            f64::ceil(cutoff * n_bins[0] / distances_between_faces[0]) as i32,
            f64::ceil(cutoff * n_bins[1] / distances_between_faces[1]) as i32,
            f64::ceil(cutoff * n_bins[2] / distances_between_faces[2]) as i32,
        ];

        let n_bins = [n_bins[0] as usize, n_bins[1] as usize, n_bins[2] as usize];

        for spatial in 0..3 {
            if n_search[spatial] < 1 {
                n_search[spatial] = 1;
            }

            // a single bin without periodic boundaries already contains
            // every possible neighbor
            if n_bins[spatial] == 1 && cell.is_infinite() {
                n_search[spatial] = 0;
            }
        }

        CellList {
            n_search: n_search,
            bins: Array3::from_elem(n_bins, Vec::new()),
            cell: cell,
        }
    }

    /// Add one atom to the cell list, identified by its `index` in the
    /// system
    fn add_atom(&mut self, index: usize, position: Vector3D) {
        let fractional = if self.cell.is_infinite() {
            position
        } else {
            self.cell.fractional(position)
        };

        let shape = self.bins.shape();
        let n_bins = [shape[0], shape[1], shape[2]];

        let bin_index = [
            f64::floor(fractional[0] * n_bins[0] as f64) as i32,
            f64::floor(fractional[1] * n_bins[1] as f64) as i32,
            f64::floor(fractional[2] * n_bins[2] as f64) as i32,
        ];

        // wrap atoms outside of the cell back inside, recording the shift
        // needed to do so
        let (shift, bin_index) = if self.cell.is_infinite() {
            let bin_index = [
                i32::clamp(bin_index[0], 0, n_bins[0] as i32 - 1) as usize,
                i32::clamp(bin_index[1], 0, n_bins[1] as i32 - 1) as usize,
                i32::clamp(bin_index[2], 0, n_bins[2] as i32 - 1) as usize,
            ];
            ([0, 0, 0], bin_index)
        } else {
            divmod_vec(bin_index, n_bins)
        };

        self.bins[bin_index].push(BinnedAtom {
            index: index,
            shift: CellShift(shift),
        });
    }

    /// Get all candidate pairs in the cell list.
    ///
    /// This produces a half list: if atoms `i` and `j` are within range of
    /// one another, only the `i-j` pair is included, not `j-i`. Pairs
    /// between an atom and its own periodic images are included once per
    /// distinct image. Candidates can still be further apart than the
    /// cutoff and must be filtered by actual distance afterward.
    fn candidates(&self) -> Vec<CandidatePair> {
        let mut candidates = Vec::new();

        let shape = self.bins.shape();
        let n_bins = [shape[0], shape[1], shape[2]];

        let search_x = -self.n_search[0]..=self.n_search[0];
        let search_y = -self.n_search[1]..=self.n_search[1];
        let search_z = -self.n_search[2]..=self.n_search[2];

        for ((bin_x, bin_y, bin_z), current_bin) in self.bins.indexed_iter() {
            for delta_x in search_x.clone() {
                for delta_y in search_y.clone() {
                    for delta_z in search_z.clone() {
                        let neighbor_bin = [
                            bin_x as i32 + delta_x,
                            bin_y as i32 + delta_y,
                            bin_z as i32 + delta_z,
                        ];

                        // shift from the current bin to the neighboring
                        // bin, and index of this bin inside the grid
                        let (bin_shift, neighbor_bin) = divmod_vec(neighbor_bin, n_bins);

                        for atom_i in current_bin {
                            for atom_j in &self.bins[neighbor_bin] {
                                // only generate the half list
                                if atom_i.index > atom_j.index {
                                    continue;
                                }

                                let shift = CellShift(bin_shift) + atom_i.shift - atom_j.shift;
                                let shift_is_zero = shift[0] == 0 && shift[1] == 0 && shift[2] == 0;

                                if atom_i.index == atom_j.index {
                                    if shift_is_zero {
                                        // atom with itself in the same
                                        // image, this is not a pair
                                        continue;
                                    }

                                    // atom-with-own-image pairs come in
                                    // redundant mirrored versions (for
                                    // example shifts 0 1 1 and 0 -1 -1):
                                    // keep only the ones pointing to the
                                    // positive half space
                                    if shift[0] + shift[1] + shift[2] < 0 {
                                        continue;
                                    }

                                    if (shift[0] + shift[1] + shift[2] == 0)
                                        && (shift[2] < 0 || (shift[2] == 0 && shift[1] < 0)) {
                                        // tie-break shifts summing to zero:
                                        // drop the negative half plane and
                                        // the negative shift[1] half axis
                                        continue;
                                    }
                                }

                                if self.cell.is_infinite() && !shift_is_zero {
                                    // no pairs across periodic images in a
                                    // non-periodic system
                                    continue;
                                }

                                candidates.push(CandidatePair {
                                    first: atom_i.index,
                                    second: atom_j.index,
                                    shift: shift,
                                });
                            }
                        }
                    }
                }
            }
        }

        return candidates;
    }
}

/// Compute both quotient and remainder of the division of `a` by `b`,
/// following Python conventions: the remainder has the same sign as `b`.
fn divmod(a: i32, b: usize) -> (i32, usize) {
    debug_assert!(b < (i32::MAX as usize));
    let b = b as i32;
    let mut quotient = a / b;
    let mut remainder = a % b;
    if remainder < 0 {
        remainder += b;
        quotient -= 1;
    }
    return (quotient, remainder as usize);
}

/// Apply [`divmod`] to all three components at once
fn divmod_vec(a: [i32; 3], b: [usize; 3]) -> ([i32; 3], [usize; 3]) {
    let (qx, rx) = divmod(a[0], b[0]);
    let (qy, ry) = divmod(a[1], b[1]);
    let (qz, rz) = divmod(a[2], b[2]);
    return ([qx, qy, qz], [rx, ry, rz]);
}

/// A neighbor list computed for a single cutoff, storing both the full
/// list of pairs and the per-atom view of the same pairs.
#[derive(Debug, Clone)]
pub struct NeighborsList {
    /// the cutoff used to create this neighbor list
    pub cutoff: f64,
    /// all pairs in the system, sorted by `(first, second)`
    pub pairs: Vec<Pair>,
    /// for each atom, all the pairs this atom is part of
    pub pairs_by_atom: Vec<Vec<Pair>>,
}

impl NeighborsList {
    /// Compute the neighbor list for the given positions, unit cell and
    /// cutoff
    #[time_graph::instrument(name = "NeighborsList")]
    pub fn new(positions: &[Vector3D], cell: UnitCell, cutoff: f64) -> NeighborsList {
        let mut cell_list = CellList::new(cell, cutoff);
        for (index, &position) in positions.iter().enumerate() {
            cell_list.add_atom(index, position);
        }

        let cell_matrix = cell.matrix();
        let cutoff2 = cutoff * cutoff;

        let mut pairs = Vec::new();
        let mut pairs_by_atom = vec![Vec::new(); positions.len()];

        // keep only the candidates which are actually below the cutoff
        for candidate in cell_list.candidates() {
            let mut vector = positions[candidate.second] - positions[candidate.first];
            vector += candidate.shift.cartesian(&cell_matrix);

            let distance2 = vector.norm2();
            if distance2 < cutoff2 {
                if distance2 < 1e-3 {
                    warn!(
                        "atoms {} and {} are very close to one another ({} A)",
                        candidate.first, candidate.second, distance2.sqrt()
                    );
                }

                let pair = Pair {
                    first: candidate.first,
                    second: candidate.second,
                    distance: distance2.sqrt(),
                    vector: vector,
                    cell_shift_indices: candidate.shift.0,
                };

                pairs.push(pair);
                pairs_by_atom[pair.first].push(pair);
                if pair.second != pair.first {
                    pairs_by_atom[pair.second].push(pair);
                }
            }
        }

        pairs.sort_unstable_by_key(|pair| (pair.first, pair.second));
        for pairs in &mut pairs_by_atom {
            pairs.sort_unstable_by_key(|pair| (pair.first, pair.second));
        }

        return NeighborsList {
            cutoff: cutoff,
            pairs: pairs,
            pairs_by_atom: pairs_by_atom,
        };
    }
}
