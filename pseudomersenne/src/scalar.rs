//! Scalars for the ladder and comb scalar multiplications.
//!
//! A scalar is an opaque little-endian limb string of the curve's length; it
//! is not reduced modulo the group order here. Bit and comb-digit extraction
//! use public indices only, so they are safe on secret scalars.

use crate::word::{MAX_LEN, WORD_BITS, Word};
use core::fmt;
use subtle::Choice;
use zeroize::Zeroize;

/// Scalar multiplier, wiped on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Scalar(pub(crate) [Word; MAX_LEN]);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print secret material
        f.write_str("Scalar(...)")
    }
}

impl Scalar {
    /// Unpack a little-endian byte string.
    pub const fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0 as Word; MAX_LEN];
        let mut i = 0;
        while i < 32 {
            limbs[i / (WORD_BITS / 8)] |= (bytes[i] as Word) << (8 * (i % (WORD_BITS / 8)));
            i += 1;
        }
        Self(limbs)
    }

    /// Prune the scalar per the Curve25519 convention: clear the three low
    /// bits, clear the top bit and set the second-highest bit of the top
    /// limb.
    pub fn clamp(&mut self, len: usize) {
        self.0[0] &= !7;
        self.0[len - 1] &= Word::MAX >> 1;
        self.0[len - 1] |= 1 << (WORD_BITS - 2);
    }

    /// Bit i of the scalar. The index is a public loop counter.
    pub(crate) fn bit(&self, i: usize) -> Choice {
        let w = self.0[i / WORD_BITS];
        Choice::from(((w >> (i % WORD_BITS)) & 1) as u8)
    }

    /// 4-bit comb digit for column i: one bit from each of the four
    /// `maxd`-bit rows the scalar is partitioned into, row j contributing
    /// bit j of the digit.
    pub(crate) fn comb_digit(&self, i: usize, maxd: usize) -> u8 {
        let mut d = 0u8;
        for j in 0..4 {
            d |= self.bit(i + j * maxd).unwrap_u8() << j;
        }
        d
    }

    /// Constant-time zero test over the low `len` limbs.
    pub fn is_zero(&self, len: usize) -> Choice {
        use subtle::ConstantTimeEq;
        let mut acc: Word = 0;
        for i in 0..len {
            acc |= self.0[i];
        }
        acc.ct_eq(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_sets_expected_bits() {
        let mut k = Scalar::from_le_bytes([0xff; 32]);
        k.clamp(MAX_LEN);
        let bytes_equiv = {
            let mut b = [0xffu8; 32];
            b[0] &= 248;
            b[31] &= 127;
            b[31] |= 64;
            Scalar::from_le_bytes(b)
        };
        assert_eq!(k.0, bytes_equiv.0);
        assert_eq!(k.bit(0).unwrap_u8(), 0);
        assert_eq!(k.bit(1).unwrap_u8(), 0);
        assert_eq!(k.bit(2).unwrap_u8(), 0);
        assert_eq!(k.bit(255).unwrap_u8(), 0);
        assert_eq!(k.bit(254).unwrap_u8(), 1);
    }

    #[test]
    fn comb_digit_gathers_row_bits() {
        // set bit 5 of each 64-bit row: digit at column 5 is 0b1111
        let mut bytes = [0u8; 32];
        bytes[0] = 1 << 5;
        bytes[8] = 1 << 5;
        bytes[16] = 1 << 5;
        bytes[24] = 1 << 5;
        let k = Scalar::from_le_bytes(bytes);
        assert_eq!(k.comb_digit(5, 64), 0b1111);
        assert_eq!(k.comb_digit(4, 64), 0);

        let k = Scalar::from_le_bytes({
            let mut b = [0u8; 32];
            b[16] = 1; // bit 128 = row 2, column 0
            b
        });
        assert_eq!(k.comb_digit(0, 64), 0b0100);
    }

    #[test]
    fn zero_test() {
        assert!(bool::from(Scalar::from_le_bytes([0; 32]).is_zero(MAX_LEN)));
        let mut b = [0u8; 32];
        b[17] = 1;
        assert!(!bool::from(Scalar::from_le_bytes(b).is_zero(MAX_LEN)));
    }
}
