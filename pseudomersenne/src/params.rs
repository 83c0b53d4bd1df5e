//! Immutable elliptic-curve domain parameters.
//!
//! One record bundles everything both curve forms need: the field, the
//! Montgomery doubling constant (A+2)/4, the twisted Edwards parameter d,
//! the square roots used by the birational maps and decompression, the
//! generator, and the fixed-base comb table. The record is `'static`, holds
//! no interior mutability, and is freely sharable between threads.

use crate::edwards::{AffineNielsPoint, AffinePoint};
use crate::field::{Field, FieldElement};
use crate::word::Word;
use hex_literal::hex;

/// Domain parameters for a Montgomery curve and its birationally equivalent
/// twisted Edwards curve over GF(2^(w*len - 1) - c).
#[derive(Clone, Copy, Debug)]
pub struct CurveParams {
    /// The underlying prime field.
    pub field: Field,
    /// (A+2)/4 for the Montgomery doubling formula.
    pub a24: u32,
    /// Twisted Edwards curve parameter d.
    pub d: FieldElement,
    /// sqrt(-(A+2)/B) = sqrt(-a), scaling factor of the Mon <-> TED maps.
    pub sqrt_minus_a: FieldElement,
    /// sqrt(-1), for the second decompression candidate.
    pub sqrt_minus_one: FieldElement,
    /// Generator of the prime-order subgroup, twisted Edwards affine form.
    pub generator: AffinePoint,
    /// Precomputed multiples of the generator for the 4-bit comb, in
    /// extended-affine (u, v, w) form; entry 0 is the identity.
    pub comb: [AffineNielsPoint; 16],
}

const fn fe(bytes: [u8; 32]) -> FieldElement {
    FieldElement::from_le_bytes(bytes)
}

const fn niels(u: [u8; 32], v: [u8; 32], w: [u8; 32]) -> AffineNielsPoint {
    AffineNielsPoint {
        u: fe(u),
        v: fe(v),
        w: fe(w),
    }
}

/// Curve25519 / edwards25519: p = 2^255 - 19, A = 486662,
/// d = -121665/121666.
pub static CURVE25519: CurveParams = CurveParams {
    field: Field::new(256 / crate::word::WORD_BITS, 19 as Word),
    a24: 121666,
    d: fe(hex!(
        "a3785913ca4deb75abd841414d0a700098e879777940c78c73fe6f2bee6c0352"
    )),
    sqrt_minus_a: fe(hex!(
        "067e45ffaa046ecc821a7d4bd1d3a1c57e4ffc03dc087bd2bb06a060f4ed260f"
    )),
    sqrt_minus_one: fe(hex!(
        "b0a00e4a271beec478e42fad0618432fa7d7fb3d99004d2b0bdfc14f8024832b"
    )),
    generator: AffinePoint {
        x: fe(hex!(
            "1ad5258f602d56c9b2a7259560c72c695cdcd6fd31e2a4c0fe536ecdd3366921"
        )),
        y: fe(hex!(
            "5866666666666666666666666666666666666666666666666666666666666666"
        )),
    },
    comb: [
        // identity: ((x+y)/2, (y-x)/2, d*x*y) of (0, 1)
        niels(
            hex!("f7ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff3f"),
            hex!("f7ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff3f"),
            hex!("0000000000000000000000000000000000000000000000000000000000000000"),
        ),
        // G
        niels(
            hex!("b91dc67ae349de970c07c67de396c96761a11e324ca48593325dea199dcee743"),
            hex!("9f48a0eb821c88ce595fa0e882cf9cfe04c547341ac2e0d233097c4cc9977e22"),
            hex!("3455bdc30289e4554f6255e611f46c13c6aca1eee5be0d2dd432864fb4bd8837"),
        ),
        // 2^64 G
        niels(
            hex!("81fae8bbf33295e67830d5c7c3c844aa72035e6dde9ddbd8fd64bed4653ca472"),
            hex!("7f58fbc663c789a88dfabaf244edcba9dc78bdb80e3d9004286b9015dd7e8110"),
            hex!("4773ae8202724fcb94d62809b4535e9b0ad23ed58b7a0d1d5d59f694ed926b45"),
        ),
        // (2^64 + 1) G
        niels(
            hex!("f42c0fb0c2e22a00300724b3159ac94326f2227f68550a9f95e70924736c7513"),
            hex!("5231424e5bdcbae56b8ee9b3e237ec167ba1094476b98ce69797e087cbdaba04"),
            hex!("98d32ded8191e73137dd78a9c0ce5f02edb3395568c89b19f562fbce2338a369"),
        ),
        // 2^128 G
        niels(
            hex!("51c756d65f821d2c42f4450af4a1db94ed6208841d2c8f15d5dd59c7f224aa15"),
            hex!("1adf9e75b13a9d2f5cd05e472a1cf5fb4c39baa298f26180a8ea138bf3748249"),
            hex!("7f4e6e35690a4cbc856ea4c59fd50d1e05e3bcfcfff007ed49eb16be166f3422"),
        ),
        // (2^128 + 1) G
        niels(
            hex!("a433def1c6138c907b075968b0fe8f73ccd83de328dfa8faa61e2a68329b5013"),
            hex!("f79cd1899d16a994944a6c36a812a9c278787a566a1df56f173aa13cddb5eb24"),
            hex!("0573abc619217d0acd94a861a39c8e8cc2d8d6d3b6ab3e12e1767ed4f1d70f67"),
        ),
        // (2^128 + 2^64) G
        niels(
            hex!("2602b5919e82f38af1c3c69d58de6e1e14d4906969b0cc28d2dde28707cd2a27"),
            hex!("0e38094e3b7400ffaf1dce01056eeeca8d750186a5a2b46086a9c3afe9103839"),
            hex!("0f92ef930382b8529b064859d5f7a26f6f4d5330ae6d37ff0ee0dd03985b7e32"),
        ),
        // (2^128 + 2^64 + 1) G
        niels(
            hex!("65c8e93766ac771c7e4c8d8bba32bcf72f6b21e2c75b28c47743e8b736639a37"),
            hex!("026e4c1cdae5f9c993db8321d9ffc8830e4c1a674bc0deebb64fc245c7c5ac05"),
            hex!("3b7b6106c5e0e70815e794da03a38840a0ac056023e04d056433d65858949060"),
        ),
        // 2^192 G
        niels(
            hex!("600d06e44ee636531b529c0d7a2ed04be3ebed4adff9f5d3d53ebf467b5cd03e"),
            hex!("d33a2b1c0a10bc77f4d47e55984f32d165d46f2ea8f568a659e0a60e5dad0823"),
            hex!("3beddae1a98c07ea4dcf8890b937d60eb02c59ff1030e681a5a5b3413fc42f2d"),
        ),
        // (2^192 + 1) G
        niels(
            hex!("fa6051060cb04605a06f34e66d58afc04ca717dc233df36be08a3f304814d022"),
            hex!("c2f8a0fe68b3797f8ff0e78008a5b4c5a653a800aff09c25dda869b51ef80920"),
            hex!("e63270376e41815e237325917eca5c1b3a745e7f6c4da7a92737f8ece02a1124"),
        ),
        // (2^192 + 2^64) G
        niels(
            hex!("007ce7b867f5019e5d7f4565a23a1bc83be2143514f51f1c31aa325ed8c94227"),
            hex!("c6b1f251a5086f890679e294542515ddd189c5bd4e69582ba2bccdbd248ddc35"),
            hex!("03e9f36223f3249522e231c9e67c9f584fa9d57674b655a8cdf175d8bcbe6710"),
        ),
        // (2^192 + 2^64 + 1) G
        niels(
            hex!("24ae7345a747e965b00500a248016f1eb8105e4ce4dc9d1b4384abcf29c4083e"),
            hex!("e53e7ff8ce49da3ee7a8d4e5875c87fa8e0ebf1a0ef3c5844ea34cc41bb11a01"),
            hex!("f825ad70fd777b9002c73b1e4a85a39733ef4cfe0185fabc410a8368c400695c"),
        ),
        // (2^192 + 2^128) G
        niels(
            hex!("e68a3187d608f411485957f18286b20536acaed3ac07dd5bf7a60f2fea761f42"),
            hex!("02998363f9a3607b06e9d7f98cdc286301fc20b8feedc7129f83a2a7d4279e4b"),
            hex!("e2fc464930f5b89e16abb919033cbf2d59a94a51a628d86c39629e4c1238150f"),
        ),
        // (2^192 + 2^128 + 1) G
        niels(
            hex!("86402e6ade070db0010476c93ede5b923f20e98b15736550932d1103f7a1e56f"),
            hex!("d2fd849adc848298ba8db102bbd9c686430e20295d66efcbb973d908fa242302"),
            hex!("a610ccca5692060646311b6613c8bf0d756e0bb8aa17c799c772602efd0d4546"),
        ),
        // (2^192 + 2^128 + 2^64) G
        niels(
            hex!("26880eb4da81f3c6a2e531892cbd979e31b6728e0b86385765f3617e3fbec235"),
            hex!("e00094455a2be93ce207201e56df4fbf20dd99a38ed5a85365c5a0eefa15ef04"),
            hex!("3634f8f7f987f81dd1bdf1781a755dafa601b30e93304f726521d9611537a36d"),
        ),
        // (2^192 + 2^128 + 2^64 + 1) G
        niels(
            hex!("21dcfda3b375bf89458d40b03aaeef3c4d64fcb8b7d3152de17fe41d2b95ca04"),
            hex!("1e7c3feea565545113e1c92f7de35acbd27132838df575ea9767e3726ea54d20"),
            hex!("62a8a1c1dc9e6a22da82fad282c994c497ffa42c517d917db2be328253b4dc34"),
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use subtle::Choice;

    #[test]
    fn sqrt_minus_one_squares_to_minus_one() {
        let fp = &CURVE25519.field;
        let minus_one = fp.cneg(&FieldElement::ONE, Choice::from(1));
        assert!(bool::from(
            fp.ct_eq(&fp.sqr(&CURVE25519.sqrt_minus_one), &minus_one)
        ));
    }

    #[test]
    fn sqrt_minus_a_squares_to_minus_486664() {
        let fp = &CURVE25519.field;
        let mut a = [0u8; 32];
        a[..4].copy_from_slice(&486664u32.to_le_bytes());
        let minus_a = fp.cneg(&FieldElement::from_le_bytes(a), Choice::from(1));
        assert!(bool::from(
            fp.ct_eq(&fp.sqr(&CURVE25519.sqrt_minus_a), &minus_a)
        ));
    }

    #[test]
    fn generator_on_curve() {
        assert!(bool::from(CURVE25519.generator.is_on_curve(&CURVE25519)));
    }

    #[test]
    fn comb_entry_one_is_generator() {
        let g = CURVE25519.generator.to_niels(&CURVE25519);
        let fp = &CURVE25519.field;
        assert!(bool::from(
            fp.ct_eq(&g.u, &CURVE25519.comb[1].u)
                & fp.ct_eq(&g.v, &CURVE25519.comb[1].v)
                & fp.ct_eq(&g.w, &CURVE25519.comb[1].w)
        ));
    }

    #[test]
    fn comb_entry_zero_is_identity() {
        let fp = &CURVE25519.field;
        let half = fp.hlv(&FieldElement::ONE);
        assert!(bool::from(fp.ct_eq(&CURVE25519.comb[0].u, &half)));
        assert!(bool::from(fp.ct_eq(&CURVE25519.comb[0].v, &half)));
        assert!(bool::from(fp.is_zero(&CURVE25519.comb[0].w)));
    }
}
