use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::params::CurveParameters;
use crate::uint::U256;

/// Anything that can be read as a little-endian 256-bit multiplier.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

impl ScalarBits for U256 {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.limbs()
    }
}

/// Additive group of curve points over a runtime-selected parameter set.
pub trait Group:
    Sized
    + Copy
    + PartialEq
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
{
    fn identity(curve: &'static CurveParameters) -> Self;
    fn generator(curve: &'static CurveParameters) -> Self;
    fn curve(&self) -> &'static CurveParameters;
    fn is_identity(&self) -> bool;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Right-to-left double-and-add over all 256 bits.
    #[inline]
    fn scalar_mul<S: ScalarBits>(&self, scalar: &S) -> Self {
        let mut result = Self::identity(self.curve());
        let mut temp = *self;

        for &limb in scalar.to_u64_limbs().iter() {
            let mut bits = limb;
            for _ in 0..64 {
                if bits & 1 == 1 {
                    result += temp;
                }
                temp = temp.double();
                bits >>= 1;
            }
        }

        result
    }

    /// Fixed 4-bit window, most significant nibble first.
    fn scalar_mul_windowed<S: ScalarBits>(&self, scalar: &S) -> Self {
        let identity = Self::identity(self.curve());
        if self.is_identity() {
            return identity;
        }

        let table = window_table(self);
        let mut result = identity;

        for &limb in scalar.to_u64_limbs().iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                for _ in 0..4 {
                    result = result.double();
                }

                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result += table[window];
                }
            }
        }

        result
    }
}

/// `[0, P, 2P, ..., 15P]`
pub(crate) fn window_table<G: Group>(point: &G) -> [G; 16] {
    let mut table = [G::identity(point.curve()); 16];
    table[1] = *point;
    for i in 2..16 {
        table[i] = if i % 2 == 0 {
            table[i / 2].double()
        } else {
            table[i - 1] + table[1]
        };
    }
    table
}
