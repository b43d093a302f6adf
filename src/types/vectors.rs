use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

/// A 3-dimensional vector, used for atomic positions and for displacement
/// vectors between atoms.
///
/// `Vector3D` implements the usual arithmetic operations; `*` between two
/// vectors is the dot product and `^` is the cross product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D([f64; 3]);

impl Vector3D {
    /// Create a new vector with the given components
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D([x, y, z])
    }

    /// Create a vector with all components set to zero
    #[inline]
    pub fn zero() -> Vector3D {
        Vector3D([0.0; 3])
    }

    /// Get the squared euclidean norm of this vector
    #[inline]
    pub fn norm2(&self) -> f64 {
        self * self
    }

    /// Get the euclidean norm of this vector
    #[inline]
    pub fn norm(&self) -> f64 {
        f64::sqrt(self.norm2())
    }

    /// Get a new unit length vector pointing in the same direction as this
    /// one
    #[inline]
    pub fn normalized(&self) -> Vector3D {
        self / self.norm()
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from(values: [f64; 3]) -> Vector3D {
        Vector3D(values)
    }
}

impl From<Vector3D> for [f64; 3] {
    fn from(vector: Vector3D) -> [f64; 3] {
        vector.0
    }
}

impl Index<usize> for Vector3D {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector3D {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Add, add, Vector3D, Vector3D, Vector3D, lhs, rhs,
    Vector3D::new(lhs[0] + rhs[0], lhs[1] + rhs[1], lhs[2] + rhs[2])
);

impl_arithmetic!(
    Sub, sub, Vector3D, Vector3D, Vector3D, lhs, rhs,
    Vector3D::new(lhs[0] - rhs[0], lhs[1] - rhs[1], lhs[2] - rhs[2])
);

// Dot product
impl_arithmetic!(
    Mul, mul, Vector3D, Vector3D, f64, lhs, rhs,
    lhs[0] * rhs[0] + lhs[1] * rhs[1] + lhs[2] * rhs[2]
);

// Cross product
impl_arithmetic!(
    BitXor, bitxor, Vector3D, Vector3D, Vector3D, lhs, rhs,
    Vector3D::new(
        lhs[1] * rhs[2] - lhs[2] * rhs[1],
        lhs[2] * rhs[0] - lhs[0] * rhs[2],
        lhs[0] * rhs[1] - lhs[1] * rhs[0],
    )
);

impl_arithmetic!(
    Mul, mul, Vector3D, f64, Vector3D, lhs, scalar,
    Vector3D::new(lhs[0] * scalar, lhs[1] * scalar, lhs[2] * scalar)
);

impl_arithmetic!(
    Mul, mul, f64, Vector3D, Vector3D, scalar, rhs,
    Vector3D::new(scalar * rhs[0], scalar * rhs[1], scalar * rhs[2])
);

impl_arithmetic!(
    Div, div, Vector3D, f64, Vector3D, lhs, scalar,
    Vector3D::new(lhs[0] / scalar, lhs[1] / scalar, lhs[2] / scalar)
);

impl_inplace_arithmetic!(
    AddAssign, add_assign, Vector3D, Vector3D, lhs, rhs,
    { lhs[0] += rhs[0]; lhs[1] += rhs[1]; lhs[2] += rhs[2]; }
);

impl_inplace_arithmetic!(
    SubAssign, sub_assign, Vector3D, Vector3D, lhs, rhs,
    { lhs[0] -= rhs[0]; lhs[1] -= rhs[1]; lhs[2] -= rhs[2]; }
);

impl_inplace_arithmetic!(
    MulAssign, mul_assign, Vector3D, f64, lhs, scalar,
    { lhs[0] *= scalar; lhs[1] *= scalar; lhs[2] *= scalar; }
);

impl_inplace_arithmetic!(
    DivAssign, div_assign, Vector3D, f64, lhs, scalar,
    { lhs[0] /= scalar; lhs[1] /= scalar; lhs[2] /= scalar; }
);

impl std::ops::Neg for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn neg(self) -> Vector3D {
        Vector3D::new(-self[0], -self[1], -self[2])
    }
}

impl<'a> std::ops::Neg for &'a Vector3D {
    type Output = Vector3D;
    #[inline]
    fn neg(self) -> Vector3D {
        Vector3D::new(-self[0], -self[1], -self[2])
    }
}

impl AbsDiffEq for Vector3D {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self[0], &other[0], epsilon)
            && f64::abs_diff_eq(&self[1], &other[1], epsilon)
            && f64::abs_diff_eq(&self[2], &other[2], epsilon)
    }
}

impl RelativeEq for Vector3D {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        f64::relative_eq(&self[0], &other[0], epsilon, max_relative)
            && f64::relative_eq(&self[1], &other[1], epsilon, max_relative)
            && f64::relative_eq(&self[2], &other[2], epsilon, max_relative)
    }
}

impl UlpsEq for Vector3D {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        f64::ulps_eq(&self[0], &other[0], epsilon, max_ulps)
            && f64::ulps_eq(&self[1], &other[1], epsilon, max_ulps)
            && f64::ulps_eq(&self[2], &other[2], epsilon, max_ulps)
    }
}
