/// All the errors that can be produced by this crate.
///
/// All of these are caller-input errors: the caller must fix the input (a
/// valid cutoff, a valid atom index, the right call order) and retry.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A non-positive or non-finite cutoff was passed to
    /// `System::compute_neighbors`
    InvalidCutoff(f64),
    /// An out-of-range center atom was passed to `System::pairs_containing`
    InvalidAtomIndex {
        /// the requested atom index
        index: usize,
        /// the number of atoms in the system
        size: usize,
    },
    /// A pair accessor was called before any successful call to
    /// `System::compute_neighbors`
    NeighborsNotComputed,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCutoff(cutoff) => {
                write!(f, "invalid cutoff: expected a positive value, got {}", cutoff)
            },
            Error::InvalidAtomIndex { index, size } => {
                write!(f, "invalid atom index: {} is out of bounds for a system with {} atoms", index, size)
            },
            Error::NeighborsNotComputed => {
                write!(f, "the neighbor list for this system has not been computed yet")
            },
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::InvalidCutoff(-1.5).to_string(),
            "invalid cutoff: expected a positive value, got -1.5"
        );
        assert_eq!(
            Error::InvalidAtomIndex { index: 7, size: 4 }.to_string(),
            "invalid atom index: 7 is out of bounds for a system with 4 atoms"
        );
        assert_eq!(
            Error::NeighborsNotComputed.to_string(),
            "the neighbor list for this system has not been computed yet"
        );
    }
}
