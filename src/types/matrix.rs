use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use super::Vector3D;

/// A 3x3 matrix, stored in row-major order; used for unit cell matrices
/// where each row is one lattice vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new matrix from the given rows
    #[inline]
    pub fn new(rows: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(rows)
    }

    /// Create a matrix with all elements set to zero
    #[inline]
    pub fn zero() -> Matrix3 {
        Matrix3([[0.0; 3]; 3])
    }

    /// Create the identity matrix
    #[inline]
    pub fn one() -> Matrix3 {
        Matrix3::new([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Compute the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Get the transpose of this matrix
    pub fn transposed(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Compute the inverse of this matrix.
    ///
    /// # Panics
    ///
    /// If the matrix is not invertible, i.e. if its determinant is zero.
    pub fn inverse(&self) -> Matrix3 {
        let determinant = self.determinant();
        assert!(determinant.abs() > 1e-30, "matrix is not invertible");

        let m = &self.0;
        let inv_det = 1.0 / determinant;
        let mut inverse = Matrix3::zero();
        inverse[0][0] = inv_det * (m[1][1] * m[2][2] - m[2][1] * m[1][2]);
        inverse[0][1] = inv_det * (m[0][2] * m[2][1] - m[0][1] * m[2][2]);
        inverse[0][2] = inv_det * (m[0][1] * m[1][2] - m[0][2] * m[1][1]);
        inverse[1][0] = inv_det * (m[1][2] * m[2][0] - m[1][0] * m[2][2]);
        inverse[1][1] = inv_det * (m[0][0] * m[2][2] - m[0][2] * m[2][0]);
        inverse[1][2] = inv_det * (m[1][0] * m[0][2] - m[0][0] * m[1][2]);
        inverse[2][0] = inv_det * (m[1][0] * m[2][1] - m[2][0] * m[1][1]);
        inverse[2][1] = inv_det * (m[2][0] * m[0][1] - m[0][0] * m[2][1]);
        inverse[2][2] = inv_det * (m[0][0] * m[1][1] - m[1][0] * m[0][1]);
        return inverse;
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(rows: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(rows)
    }
}

impl From<Matrix3> for [[f64; 3]; 3] {
    fn from(matrix: Matrix3) -> [[f64; 3]; 3] {
        matrix.0
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];
    #[inline]
    fn index(&self, index: usize) -> &[f64; 3] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f64; 3] {
        &mut self.0[index]
    }
}

// Matrix-vector product, treating the vector as a column vector
impl_arithmetic!(
    Mul, mul, Matrix3, Vector3D, Vector3D, matrix, vector,
    Vector3D::new(
        matrix[0][0] * vector[0] + matrix[0][1] * vector[1] + matrix[0][2] * vector[2],
        matrix[1][0] * vector[0] + matrix[1][1] * vector[1] + matrix[1][2] * vector[2],
        matrix[2][0] * vector[0] + matrix[2][1] * vector[1] + matrix[2][2] * vector[2],
    )
);

impl_arithmetic!(
    Mul, mul, Matrix3, Matrix3, Matrix3, lhs, rhs,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = lhs[i][0] * rhs[0][j]
                    + lhs[i][1] * rhs[1][j]
                    + lhs[i][2] * rhs[2][j];
            }
        }
        result
    }
);

impl AbsDiffEq for Matrix3 {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::abs_diff_eq(&self[i][j], &other[i][j], epsilon) {
                    return false;
                }
            }
        }
        return true;
    }
}

impl RelativeEq for Matrix3 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::relative_eq(&self[i][j], &other[i][j], epsilon, max_relative) {
                    return false;
                }
            }
        }
        return true;
    }
}

impl UlpsEq for Matrix3 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::ulps_eq(&self[i][j], &other[i][j], epsilon, max_ulps) {
                    return false;
                }
            }
        }
        return true;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;

    use super::*;

    #[test]
    fn determinant() {
        assert_eq!(Matrix3::one().determinant(), 1.0);
        assert_eq!(Matrix3::zero().determinant(), 0.0);

        let matrix = Matrix3::new([
            [2.0, 0.0, 0.0],
            [0.0, 3.0, 0.0],
            [0.0, 0.0, 4.0],
        ]);
        assert_eq!(matrix.determinant(), 24.0);
    }

    #[test]
    fn transposed() {
        let matrix = Matrix3::new([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let transposed = Matrix3::new([
            [1.0, 4.0, 7.0],
            [2.0, 5.0, 8.0],
            [3.0, 6.0, 9.0],
        ]);

        assert_eq!(matrix.transposed(), transposed);
        assert_eq!(matrix.transposed().transposed(), matrix);
    }

    #[test]
    fn inverse() {
        let matrix = Matrix3::new([
            [4.26, -2.45951215, 0.0],
            [2.13, 1.22975607, 0.0],
            [0.0, 0.0, 50.0],
        ]);

        let product = matrix * matrix.inverse();
        assert_ulps_eq!(product, Matrix3::one(), epsilon = 1e-14);
    }

    #[test]
    #[should_panic(expected = "matrix is not invertible")]
    fn inverse_singular() {
        let _ = Matrix3::zero().inverse();
    }

    #[test]
    fn matrix_vector_product() {
        let matrix = Matrix3::new([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let vector = Vector3D::new(1.0, -1.0, 2.0);

        assert_eq!(matrix * vector, Vector3D::new(5.0, 11.0, 17.0));
        assert_eq!(Matrix3::one() * vector, vector);
    }
}
