//! Fixed-width 256-bit unsigned integers.
//!
//! Limbs are stored as `[u64; 4]` in little-endian order. The wide products
//! used by the Barrett reducer are computed with one Karatsuba step over
//! 128-bit halves, matching the decomposition of the on-chain reducer.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter, LowerHex};
use core::ops::{BitOr, Shl, Shr};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;

/// 256-bit unsigned integer.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct U256 {
    limbs: [u64; 4],
}

// 2^128, the exclusive lower bound accepted by the checked wide products.
const TWO_POW_128: U256 = U256::from_limbs([0, 0, 1, 0]);

impl U256 {
    pub const ZERO: Self = U256 { limbs: [0; 4] };
    pub const ONE: Self = U256 {
        limbs: [1, 0, 0, 0],
    };
    pub const MAX: Self = U256 {
        limbs: [u64::MAX; 4],
    };

    #[inline]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        U256 { limbs }
    }

    #[inline]
    pub const fn limbs(&self) -> [u64; 4] {
        self.limbs
    }

    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        U256 {
            limbs: [value, 0, 0, 0],
        }
    }

    /// Builds `high * 2^128 + low`.
    #[inline]
    pub const fn from_halves(high: u128, low: u128) -> Self {
        U256 {
            limbs: [low as u64, (low >> 64) as u64, high as u64, (high >> 64) as u64],
        }
    }

    #[inline]
    pub const fn low_u128(&self) -> u128 {
        (self.limbs[0] as u128) | ((self.limbs[1] as u128) << 64)
    }

    #[inline]
    pub const fn high_u128(&self) -> u128 {
        (self.limbs[2] as u128) | ((self.limbs[3] as u128) << 64)
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        U256 { limbs }
    }

    /// Parses a big-endian byte string of at most 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > 32 {
            return None;
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(bytes);
        Some(Self::from_be_bytes(&padded))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.limbs.iter().rev().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Returns `None` when `value` does not fit in 256 bits.
    pub fn from_biguint(value: &BigUint) -> Option<Self> {
        let digits = value.to_u64_digits();
        if digits.len() > 4 {
            return None;
        }
        let mut limbs = [0u64; 4];
        limbs[..digits.len()].copy_from_slice(&digits);
        Some(U256 { limbs })
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_slice(&[
            self.limbs[0] as u32,
            (self.limbs[0] >> 32) as u32,
            self.limbs[1] as u32,
            (self.limbs[1] >> 32) as u32,
            self.limbs[2] as u32,
            (self.limbs[2] >> 32) as u32,
            self.limbs[3] as u32,
            (self.limbs[3] >> 32) as u32,
        ])
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Bit `index`, counting from the least significant bit.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        index < 256 && (self.limbs[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Number of significant bits.
    pub fn bits(&self) -> u32 {
        for i in (0..4).rev() {
            if self.limbs[i] != 0 {
                return 64 * i as u32 + (64 - self.limbs[i].leading_zeros());
            }
        }
        0
    }

    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (r0, carry) = self.limbs[0].overflowing_add(rhs.limbs[0]);
        let (r1, carry) = carrying_add(self.limbs[1], rhs.limbs[1], carry);
        let (r2, carry) = carrying_add(self.limbs[2], rhs.limbs[2], carry);
        let (r3, carry) = carrying_add(self.limbs[3], rhs.limbs[3], carry);
        (U256::from_limbs([r0, r1, r2, r3]), carry)
    }

    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (r0, borrow) = self.limbs[0].overflowing_sub(rhs.limbs[0]);
        let (r1, borrow) = borrowing_sub(self.limbs[1], rhs.limbs[1], borrow);
        let (r2, borrow) = borrowing_sub(self.limbs[2], rhs.limbs[2], borrow);
        let (r3, borrow) = borrowing_sub(self.limbs[3], rhs.limbs[3], borrow);
        (U256::from_limbs([r0, r1, r2, r3]), borrow)
    }

    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    /// Subtraction modulo `2^256`.
    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }
}

/// Carrying addition
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Borrowing subtraction
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// 128x128 -> 256-bit schoolbook product on 64-bit limbs.
#[inline]
fn widening_mul_u128(a: u128, b: u128) -> U256 {
    let (a0, a1) = (a as u64 as u128, a >> 64);
    let (b0, b1) = (b as u64 as u128, b >> 64);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    let mid = (p00 >> 64) + (p01 as u64 as u128) + (p10 as u64 as u128);
    let high = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);

    U256::from_limbs([p00 as u64, mid as u64, high as u64, (high >> 64) as u64])
}

/// Full 512-bit product of two 256-bit values, returned as `(high, low)`.
///
/// One Karatsuba step: with `x = xh*2^128 + xl`,
/// `z0 = xl*yl`, `z2 = xh*yh`, `z1 = (xl + xh)(yl + yh) - z2 - z0` and
/// `x*y = z2*2^256 + z1*2^128 + z0`. No operand range is enforced here.
pub(crate) fn karatsuba_mul(left: U256, right: U256) -> (U256, U256) {
    let (left_high, left_low) = (left.high_u128(), left.low_u128());
    let (right_high, right_low) = (right.high_u128(), right.low_u128());

    let z0 = widening_mul_u128(left_low, right_low);
    let z2 = widening_mul_u128(left_high, right_high);

    // (xl + xh)(yl + yh) needs up to 258 bits; `mid_top` holds bits 256 and up.
    let (left_sum, left_carry) = left_low.overflowing_add(left_high);
    let (right_sum, right_carry) = right_low.overflowing_add(right_high);
    let mut mid = widening_mul_u128(left_sum, right_sum);
    let mut mid_top = 0u64;
    if left_carry {
        let (sum, carry) = mid.overflowing_add(U256::from_halves(right_sum, 0));
        mid = sum;
        mid_top += carry as u64;
    }
    if right_carry {
        let (sum, carry) = mid.overflowing_add(U256::from_halves(left_sum, 0));
        mid = sum;
        mid_top += carry as u64;
    }
    if left_carry && right_carry {
        mid_top += 1;
    }

    // z1 = xl*yh + xh*yl < 2^257, so at most one bit remains in `mid_top`.
    let (z1, borrow) = mid.overflowing_sub(z2);
    mid_top -= borrow as u64;
    let (z1, borrow) = z1.overflowing_sub(z0);
    mid_top -= borrow as u64;

    // Bits 128..256: high half of z0 plus low half of z1, carry goes up.
    let (low, low_carry) = z0.overflowing_add(U256::from_halves(z1.low_u128(), 0));
    let z1_shifted = U256::from_halves(mid_top as u128, z1.high_u128());
    let high = z2
        .wrapping_add(z1_shifted)
        .wrapping_add(U256::from_u64(low_carry as u64));

    (high, low)
}

fn check_karatsuba_operand(operand: &U256) -> Result<(), CurveError> {
    // 2^128 itself is rejected along with everything below it.
    if *operand <= TWO_POW_128 {
        return Err(CurveError::ArithmeticRange {
            bits: operand.bits(),
        });
    }
    Ok(())
}

/// Upper 256 bits of `left * right`.
///
/// Both operands must lie strictly above `2^128`; the upper bound `2^256` is
/// implied by the type.
pub fn mul_high_256(left: &U256, right: &U256) -> Result<U256, CurveError> {
    check_karatsuba_operand(left)?;
    check_karatsuba_operand(right)?;
    Ok(karatsuba_mul(*left, *right).0)
}

/// Lower 256 bits of `left * right`, under the same operand bounds as
/// [`mul_high_256`].
pub fn mul_low_256(left: &U256, right: &U256) -> Result<U256, CurveError> {
    check_karatsuba_operand(left)?;
    check_karatsuba_operand(right)?;
    Ok(karatsuba_mul(*left, *right).1)
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Shr<u32> for U256 {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        if shift >= 256 {
            return U256::ZERO;
        }
        let limb_shift = (shift / 64) as usize;
        let bit_shift = shift % 64;
        let mut out = [0u64; 4];
        for (i, limb) in out.iter_mut().enumerate().take(4 - limb_shift) {
            let src = i + limb_shift;
            *limb = self.limbs[src] >> bit_shift;
            if bit_shift > 0 && src + 1 < 4 {
                *limb |= self.limbs[src + 1] << (64 - bit_shift);
            }
        }
        U256 { limbs: out }
    }
}

impl Shl<u32> for U256 {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        if shift >= 256 {
            return U256::ZERO;
        }
        let limb_shift = (shift / 64) as usize;
        let bit_shift = shift % 64;
        let mut out = [0u64; 4];
        for (i, limb) in out.iter_mut().enumerate().skip(limb_shift) {
            let src = i - limb_shift;
            *limb = self.limbs[src] << bit_shift;
            if bit_shift > 0 && src > 0 {
                *limb |= self.limbs[src - 1] >> (64 - bit_shift);
            }
        }
        U256 { limbs: out }
    }
}

impl BitOr for U256 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        U256 {
            limbs: [
                self.limbs[0] | rhs.limbs[0],
                self.limbs[1] | rhs.limbs[1],
                self.limbs[2] | rhs.limbs[2],
                self.limbs[3] | rhs.limbs[3],
            ],
        }
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256::from_u64(value)
    }
}

impl LowerHex for U256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:016x}{:016x}{:016x}{:016x}",
            self.limbs[3], self.limbs[2], self.limbs[1], self.limbs[0]
        )
    }
}

impl Display for U256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self)
    }
}

impl Debug for U256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self)
    }
}
