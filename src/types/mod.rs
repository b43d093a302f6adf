//! 3D vector and matrix types used for positions, displacement vectors and
//! unit cells in the rest of the crate.

/// Implement the binary operator `$Op` between `$Lhs` and `$Rhs`, for all
/// combinations of values and references of the operands. Inside `$res`,
/// both operands (`$sel` and `$other`) are references.
macro_rules! impl_arithmetic {
    ($Op:ident, $op:ident, $Lhs:ty, $Rhs:ty, $Output:ty, $sel:ident, $other:ident, $res:expr) => (
        impl std::ops::$Op<$Rhs> for $Lhs {
            type Output = $Output;
            #[inline]
            fn $op(self, other: $Rhs) -> $Output {
                let $sel = &self;
                let $other = &other;
                $res
            }
        }

        impl<'a> std::ops::$Op<&'a $Rhs> for $Lhs {
            type Output = $Output;
            #[inline]
            fn $op(self, other: &'a $Rhs) -> $Output {
                let $sel = &self;
                let $other = other;
                $res
            }
        }

        impl<'a> std::ops::$Op<$Rhs> for &'a $Lhs {
            type Output = $Output;
            #[inline]
            fn $op(self, other: $Rhs) -> $Output {
                let $sel = self;
                let $other = &other;
                $res
            }
        }

        impl<'a, 'b> std::ops::$Op<&'b $Rhs> for &'a $Lhs {
            type Output = $Output;
            #[inline]
            fn $op(self, other: &'b $Rhs) -> $Output {
                let $sel = self;
                let $other = other;
                $res
            }
        }
    );
}

/// Implement the in-place operator `$Op` between `$Lhs` and `$Rhs`, taking
/// the right-hand side both by value and by reference.
macro_rules! impl_inplace_arithmetic {
    ($Op:ident, $op:ident, $Lhs:ty, $Rhs:ty, $sel:ident, $other:ident, $res:expr) => (
        impl std::ops::$Op<$Rhs> for $Lhs {
            #[inline]
            fn $op(&mut self, other: $Rhs) {
                let $sel = self;
                let $other = &other;
                $res
            }
        }

        impl<'a> std::ops::$Op<&'a $Rhs> for $Lhs {
            #[inline]
            fn $op(&mut self, other: &'a $Rhs) {
                let $sel = self;
                let $other = other;
                $res
            }
        }
    );
}

mod vectors;
pub use self::vectors::Vector3D;

mod matrix;
pub use self::matrix::Matrix3;
