//! The `UnitCell` type describes the periodic boundaries of an atomic
//! system.
use crate::{Matrix3, Vector3D};

/// The shape of a unit cell determines how periodic boundary conditions are
/// applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    /// Infinite unit cell, without boundaries (i.e. a non-periodic system)
    Infinite,
    /// Orthorhombic unit cell, with cuboid shape
    Orthorhombic,
    /// Triclinic unit cell, with arbitrary parallelepiped shape
    Triclinic,
}

/// A `UnitCell` stores the three lattice vectors of a periodic system as
/// the rows of a 3x3 matrix. A cell with a zero matrix is infinite, and
/// signals to callers that the system is not periodic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    /// Unit cell matrix, one lattice vector per row
    matrix: Matrix3,
    /// Transpose of the cell matrix, cached to transform fractional
    /// coordinates to cartesian ones
    transpose: Matrix3,
    /// Inverse of the transpose, cached to transform cartesian coordinates
    /// to fractional ones
    inverse: Matrix3,
    /// Cell shape, deduced from the matrix
    shape: CellShape,
}

impl From<Matrix3> for UnitCell {
    fn from(matrix: Matrix3) -> UnitCell {
        if matrix == Matrix3::zero() {
            // a zero cell means "no periodic boundary conditions"
            return UnitCell::infinite();
        }

        assert!(
            matrix.determinant().abs() > 1e-6,
            "unit cell matrix is not invertible"
        );

        let off_diagonal_is_zero = matrix[0][1].abs() < 1e-6 && matrix[0][2].abs() < 1e-6
            && matrix[1][0].abs() < 1e-6 && matrix[1][2].abs() < 1e-6
            && matrix[2][0].abs() < 1e-6 && matrix[2][1].abs() < 1e-6;

        let shape = if off_diagonal_is_zero {
            CellShape::Orthorhombic
        } else {
            CellShape::Triclinic
        };

        let transpose = matrix.transposed();
        return UnitCell {
            matrix: matrix,
            transpose: transpose,
            inverse: transpose.inverse(),
            shape: shape,
        };
    }
}

impl UnitCell {
    /// Create an infinite unit cell, for systems without periodic boundary
    /// conditions
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Matrix3::zero(),
            transpose: Matrix3::zero(),
            inverse: Matrix3::zero(),
            shape: CellShape::Infinite,
        }
    }

    /// Create an orthorhombic unit cell with the given side lengths
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c],
        ]);
        UnitCell {
            matrix: matrix,
            transpose: matrix,
            inverse: matrix.inverse(),
            shape: CellShape::Orthorhombic,
        }
    }

    /// Create a cubic unit cell with the given side length
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell with side lengths `a, b, c` and angles
    /// (in degrees) `alpha, beta, gamma`
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "cell lengths must be positive");
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return UnitCell::from(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Get the shape of this cell
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Check if this cell is infinite, i.e. if the system does not have
    /// periodic boundary conditions
    pub fn is_infinite(&self) -> bool {
        self.shape() == CellShape::Infinite
    }

    /// Get the matrix of this cell, one lattice vector per row
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the first lattice vector
    fn a_vector(&self) -> Vector3D {
        self.matrix[0].into()
    }

    /// Get the second lattice vector
    fn b_vector(&self) -> Vector3D {
        self.matrix[1].into()
    }

    /// Get the third lattice vector
    fn c_vector(&self) -> Vector3D {
        self.matrix[2].into()
    }

    /// Get the norm of the first lattice vector
    pub fn a(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.a_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[0][0],
        }
    }

    /// Get the norm of the second lattice vector
    pub fn b(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.b_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[1][1],
        }
    }

    /// Get the norm of the third lattice vector
    pub fn c(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.c_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[2][2],
        }
    }

    /// Get the angle between the second and third lattice vectors, in
    /// degrees
    pub fn alpha(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.b_vector(), self.c_vector()),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the angle between the first and third lattice vectors, in
    /// degrees
    pub fn beta(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.c_vector()),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the angle between the first and second lattice vectors, in
    /// degrees
    pub fn gamma(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.b_vector()),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the volume of this cell, which is zero for an infinite cell
    pub fn volume(&self) -> f64 {
        let volume = match self.shape {
            CellShape::Infinite => 0.0,
            CellShape::Orthorhombic => self.a() * self.b() * self.c(),
            // mixed product of the three lattice vectors
            CellShape::Triclinic => self.a_vector() * (self.b_vector() ^ self.c_vector()),
        };
        assert!(volume >= 0.0, "unit cell volume is negative");
        return volume;
    }

    /// Get the distances between the opposite faces of this cell
    pub fn distances_between_faces(&self) -> Vector3D {
        if self.is_infinite() {
            return Vector3D::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        }

        let (a, b, c) = (self.a_vector(), self.b_vector(), self.c_vector());
        // normal vectors to the faces
        let na = (b ^ c).normalized();
        let nb = (c ^ a).normalized();
        let nc = (a ^ b).normalized();

        Vector3D::new((na * a).abs(), (nb * b).abs(), (nc * c).abs())
    }
}

/// Geometric operations using periodic boundary conditions
impl UnitCell {
    /// Get the fractional representation of the given cartesian vector in
    /// this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // positions are row vectors, so this uses the inverse of the
        // transpose of the cell matrix
        return self.inverse * vector;
    }

    /// Get the cartesian representation of the given fractional vector in
    /// this cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        return self.transpose * fractional;
    }

    /// Wrap a vector inside the unit cell. For a cubic cell of side `L`,
    /// all components of the result are in `[0, L)`.
    pub fn wrap_vector(&self, vector: &mut Vector3D) {
        match self.shape {
            CellShape::Infinite => {},
            CellShape::Orthorhombic => {
                vector[0] -= f64::floor(vector[0] / self.a()) * self.a();
                vector[1] -= f64::floor(vector[1] / self.b()) * self.b();
                vector[2] -= f64::floor(vector[2] / self.c()) * self.c();
            },
            CellShape::Triclinic => {
                let mut fractional = self.fractional(*vector);
                fractional[0] -= f64::floor(fractional[0]);
                fractional[1] -= f64::floor(fractional[1]);
                fractional[2] -= f64::floor(fractional[2]);
                *vector = self.cartesian(fractional);
            },
        }
    }

    /// Find the periodic image of a vector closest to the origin. For a
    /// cubic cell of side `L`, all components of the result are in
    /// `[-L/2, L/2)`.
    pub fn vector_image(&self, vector: &mut Vector3D) {
        match self.shape {
            CellShape::Infinite => {},
            CellShape::Orthorhombic => {
                vector[0] -= f64::round(vector[0] / self.a()) * self.a();
                vector[1] -= f64::round(vector[1] / self.b()) * self.b();
                vector[2] -= f64::round(vector[2] / self.c()) * self.c();
            },
            CellShape::Triclinic => {
                let mut fractional = self.fractional(*vector);
                fractional[0] -= f64::round(fractional[0]);
                fractional[1] -= f64::round(fractional[1]);
                fractional[2] -= f64::round(fractional[2]);
                *vector = self.cartesian(fractional);
            },
        }
    }

    /// Get the squared minimal-image distance between the points `u` and
    /// `v`
    pub fn distance2(&self, u: Vector3D, v: Vector3D) -> f64 {
        let mut d = v - u;
        self.vector_image(&mut d);
        return d.norm2();
    }

    /// Get the minimal-image distance between the points `u` and `v`
    pub fn distance(&self, u: Vector3D, v: Vector3D) -> f64 {
        return f64::sqrt(self.distance2(u, v));
    }
}

/// Angle between the vectors `u` and `v`, in degrees
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    f64::acos(u.normalized() * v.normalized()).to_degrees()
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_ulps_eq};

    use super::*;

    #[test]
    #[should_panic(expected = "cell lengths must be positive")]
    fn negative_lengths() {
        let _ = UnitCell::orthorhombic(3.0, 0.0, -5.0);
    }

    #[test]
    fn infinite() {
        let cell = UnitCell::infinite();
        assert_eq!(cell.shape(), CellShape::Infinite);
        assert!(cell.is_infinite());

        assert_eq!(cell.matrix(), Matrix3::zero());
        assert_eq!(cell.a(), 0.0);
        assert_eq!(cell.b(), 0.0);
        assert_eq!(cell.c(), 0.0);

        assert_eq!(cell.alpha(), 90.0);
        assert_eq!(cell.beta(), 90.0);
        assert_eq!(cell.gamma(), 90.0);

        assert_eq!(cell.volume(), 0.0);
    }

    #[test]
    fn zero_matrix_is_infinite() {
        let cell = UnitCell::from(Matrix3::zero());
        assert_eq!(cell.shape(), CellShape::Infinite);
        assert!(cell.is_infinite());
    }

    #[test]
    fn orthorhombic() {
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        assert_eq!(cell.shape(), CellShape::Orthorhombic);
        assert!(!cell.is_infinite());

        assert_eq!(cell.a(), 3.0);
        assert_eq!(cell.b(), 4.0);
        assert_eq!(cell.c(), 5.0);

        assert_eq!(cell.alpha(), 90.0);
        assert_eq!(cell.beta(), 90.0);
        assert_eq!(cell.gamma(), 90.0);

        assert_eq!(cell.volume(), 3.0 * 4.0 * 5.0);

        let cubic = UnitCell::cubic(4.2);
        assert_eq!(cubic.shape(), CellShape::Orthorhombic);
        assert_eq!(cubic.volume(), 4.2 * 4.2 * 4.2);
    }

    #[test]
    fn triclinic() {
        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 80.0, 90.0, 110.0);
        assert_eq!(cell.shape(), CellShape::Triclinic);
        assert!(!cell.is_infinite());

        assert_eq!(cell.a(), 3.0);
        assert_eq!(cell.b(), 4.0);
        assert_eq!(cell.c(), 5.0);

        assert_relative_eq!(cell.alpha(), 80.0, epsilon = 1e-12);
        assert_relative_eq!(cell.beta(), 90.0, epsilon = 1e-12);
        assert_relative_eq!(cell.gamma(), 110.0, epsilon = 1e-12);

        assert_relative_eq!(cell.volume(), 55.410529, epsilon = 1e-6);
    }

    #[test]
    fn distances_between_faces() {
        let ortho = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        assert_eq!(ortho.distances_between_faces(), Vector3D::new(3.0, 4.0, 5.0));

        let triclinic = UnitCell::triclinic(3.0, 4.0, 5.0, 90.0, 80.0, 100.0);
        assert_relative_eq!(
            triclinic.distances_between_faces(),
            Vector3D::new(2.908132319388713, 3.9373265973230853, 4.921658246653857),
            epsilon = 1e-12,
        );
    }

    #[test]
    fn distances() {
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        let u = Vector3D::zero();
        let v = Vector3D::new(1.0, 2.0, 6.0);
        assert_eq!(cell.distance(u, v), f64::sqrt(6.0));

        let cell = UnitCell::infinite();
        assert_eq!(cell.distance(u, v), v.norm());
    }

    #[test]
    fn wrap_vector() {
        let cell = UnitCell::cubic(10.0);
        let mut v = Vector3D::new(9.0, 18.0, -6.0);
        cell.wrap_vector(&mut v);
        assert_eq!(v, Vector3D::new(9.0, 8.0, 4.0));

        let cell = UnitCell::infinite();
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.wrap_vector(&mut v);
        assert_eq!(v, Vector3D::new(1.0, 1.5, 6.0));

        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 90.0, 90.0, 90.0);
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.wrap_vector(&mut v);
        assert_ulps_eq!(v, Vector3D::new(1.0, 1.5, 1.0), max_ulps = 5);
    }

    #[test]
    fn vector_image() {
        let cell = UnitCell::cubic(10.0);
        let mut v = Vector3D::new(9.0, 18.0, -6.0);
        cell.vector_image(&mut v);
        assert_eq!(v, Vector3D::new(-1.0, -2.0, 4.0));

        let cell = UnitCell::infinite();
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.vector_image(&mut v);
        assert_eq!(v, Vector3D::new(1.0, 1.5, 6.0));
    }

    #[test]
    fn fractional_cartesian() {
        let cell = UnitCell::cubic(5.0);

        assert_eq!(
            cell.fractional(Vector3D::new(0.0, 10.0, 4.0)),
            Vector3D::new(0.0, 2.0, 0.8)
        );
        assert_eq!(
            cell.cartesian(Vector3D::new(0.0, 2.0, 0.8)),
            Vector3D::new(0.0, 10.0, 4.0)
        );

        let cell = UnitCell::triclinic(5.0, 6.0, 3.6, 90.0, 53.0, 77.0);
        for vector in [Vector3D::new(0.0, 10.0, 4.0), Vector3D::new(-5.0, 12.0, 4.9)] {
            let roundtrip = cell.cartesian(cell.fractional(vector));
            assert_ulps_eq!(vector, roundtrip, epsilon = 1e-12);
        }
    }
}
