//! Fixed-base, double-base and compression paths on edwards25519, against
//! the RFC 8032 test 1 key material.

use hex_literal::hex;
use pseudomersenne::edwards::{self, CompressedPointY};
use pseudomersenne::subtle::Choice;
use pseudomersenne::{CURVE25519, Scalar};

/// SHA-512 lower half of the RFC 8032 test 1 secret key, already pruned.
const TEST1_SCALAR: [u8; 32] =
    hex!("307c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de94f");

/// RFC 8032 test 1 public key (compressed).
const TEST1_PUBKEY: [u8; 32] =
    hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

fn affine_eq(a: &edwards::AffinePoint, b: &edwards::AffinePoint) -> bool {
    let fp = &CURVE25519.field;
    bool::from(fp.ct_eq(&a.x, &b.x) & fp.ct_eq(&a.y, &b.y))
}

#[test]
fn fixed_base_known_answer() {
    let k = Scalar::from_le_bytes(TEST1_SCALAR);
    let r = edwards::mul_fixbase(&k, &CURVE25519).unwrap();
    assert_eq!(
        r.x.to_le_bytes(),
        hex!("ce457677bd8627b1247c185372d413c520f6d0608de0972229349d2b9ae0d055")
    );
    assert_eq!(
        r.y.to_le_bytes(),
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
    );
}

#[test]
fn fixed_base_matches_binary_reference() {
    let k = Scalar::from_le_bytes(TEST1_SCALAR);
    let comb = edwards::mul_fixbase(&k, &CURVE25519).unwrap();
    let binary = edwards::mul_varbase(&k, &CURVE25519.generator, &CURVE25519).unwrap();
    assert!(affine_eq(&comb, &binary));
}

#[test]
fn compression_matches_rfc_encoding() {
    let k = Scalar::from_le_bytes(TEST1_SCALAR);
    let r = edwards::mul_fixbase(&k, &CURVE25519).unwrap();
    assert_eq!(r.compress(&CURVE25519).0, TEST1_PUBKEY);
}

#[test]
fn decompression_recovers_the_point() {
    let k = Scalar::from_le_bytes(TEST1_SCALAR);
    let want = edwards::mul_fixbase(&k, &CURVE25519).unwrap();
    let got = CompressedPointY(TEST1_PUBKEY).decompress(&CURVE25519).unwrap();
    assert!(affine_eq(&want, &got));

    // and the opposite sign decodes to the negated point
    let mut flipped = TEST1_PUBKEY;
    flipped[31] ^= 0x80;
    let neg = CompressedPointY(flipped).decompress(&CURVE25519).unwrap();
    let fp = &CURVE25519.field;
    let neg_x = fp.lnr(&fp.cneg(&want.x, Choice::from(1)));
    assert!(bool::from(fp.ct_eq(&neg.x, &neg_x) & fp.ct_eq(&neg.y, &want.y)));
}

/// Little-endian byte addition; inputs are kept small enough not to wrap.
fn add_le(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    let mut r = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        carry += a[i] as u16 + b[i] as u16;
        r[i] = carry as u8;
        carry >>= 8;
    }
    assert_eq!(carry, 0);
    r
}

#[test]
fn scalar_multiplication_is_homomorphic() {
    let m = &CURVE25519;
    let mut k1 = [0x35u8; 32];
    let mut k2 = [0x4eu8; 32];
    k1[31] &= 0x3f;
    k2[31] &= 0x3f;

    let p = edwards::mul_varbase(
        &Scalar::from_le_bytes([0x09; 32]),
        &m.generator,
        m,
    )
    .unwrap();

    let lhs = edwards::mul_varbase(&Scalar::from_le_bytes(add_le(k1, k2)), &p, m).unwrap();

    let a = edwards::mul_binary_vartime(&Scalar::from_le_bytes(k1), &p, m).to_projective();
    let b = edwards::mul_binary_vartime(&Scalar::from_le_bytes(k2), &p, m).to_projective();
    let rhs = a.add(&b, m).to_affine(m).unwrap();

    assert!(affine_eq(&lhs, &rhs));
}

#[test]
fn double_base_matches_naive_combination() {
    let m = &CURVE25519;
    let k_var = Scalar::from_le_bytes(hex!(
        "9e6b1e0f2c74a2b19c0e54d1f3a886c1d7350b9e7a4412f860c9237e5a10b534"
    ));
    let k_fix = Scalar::from_le_bytes(hex!(
        "1cf84477c5b590cd1ae26db0a78cee52c3b1a1f1d35e97202a6d6f9257e4a61e"
    ));
    let p = edwards::mul_varbase(&Scalar::from_le_bytes([0x2d; 32]), &m.generator, m).unwrap();

    let got = edwards::mul_double_base(&k_var, &k_fix, &p, m).unwrap();

    let a = edwards::mul_binary_vartime(&k_var, &p, m).to_projective();
    let b = edwards::mul_binary_vartime(&k_fix, &m.generator, m).to_projective();
    let want = a.add(&b, m).to_affine(m).unwrap();
    assert!(affine_eq(&got, &want));
}
