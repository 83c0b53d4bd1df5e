//! Montgomery-curve (X,Z) arithmetic and the constant-time ladder.
//!
//! Only the x-coordinate is tracked through scalar multiplication;
//! differential addition needs the affine x of the difference of its
//! operands, which the ladder keeps fixed at the base point. The ladder
//! returns both k*P and (k+1)*P so the caller can recover the y-coordinate
//! (Okeya-Sakurai) when the full point is needed.

use crate::Error;
use crate::edwards;
use crate::field::FieldElement;
use crate::params::CurveParams;
use crate::scalar::Scalar;
use crate::word::WORD_BITS;
use subtle::{Choice, ConditionallySelectable};

/// Projective point in (X,Z) form; the y-coordinate is not represented.
/// U/W naming keeps Montgomery coordinates visually distinct from the
/// twisted Edwards X/Y/Z.
#[derive(Clone, Copy, Debug)]
pub struct ProjectiveXPoint {
    /// Projective U (= X) coordinate.
    pub U: FieldElement,
    /// Projective W (= Z) coordinate.
    pub W: FieldElement,
}

/// Projective point with all three coordinates, as produced by y-recovery.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    /// Projective U coordinate.
    pub U: FieldElement,
    /// Projective V coordinate.
    pub V: FieldElement,
    /// Projective W coordinate.
    pub W: FieldElement,
}

/// Affine point (u, v) on the Montgomery curve.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// Affine u coordinate.
    pub u: FieldElement,
    /// Affine v coordinate.
    pub v: FieldElement,
}

impl ConditionallySelectable for ProjectiveXPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }
}

impl ProjectiveXPoint {
    /// The point at infinity, (1, 0).
    pub const IDENTITY: Self = Self {
        U: FieldElement::ONE,
        W: FieldElement::ZERO,
    };

    /// Lift an affine x-coordinate to (x, 1).
    pub fn from_affine_x(x: &FieldElement) -> Self {
        Self {
            U: *x,
            W: FieldElement::ONE,
        }
    }

    /// Differential addition: self + other, given the affine x-coordinate
    /// of self - other. The operation sequence is fixed and branch-free.
    pub fn differential_add(
        &self,
        other: &Self,
        x_diff: &FieldElement,
        m: &CurveParams,
    ) -> Self {
        let fp = &m.field;
        let t1 = fp.add(&self.U, &self.W);
        let t2 = fp.sub(&self.U, &self.W);
        let t3 = fp.sub(&other.U, &other.W);
        let zr = fp.mul(&t1, &t3);
        let t4 = fp.add(&other.U, &other.W);
        let xr = fp.mul(&t4, &t2);
        let t1 = fp.sub(&xr, &zr);
        let t2 = fp.add(&xr, &zr);
        Self {
            U: fp.sqr(&t2),
            W: fp.mul(x_diff, &fp.sqr(&t1)),
        }
    }

    /// Doubling via (A+2)/4.
    pub fn double(&self, m: &CurveParams) -> Self {
        let fp = &m.field;
        let t1 = fp.add(&self.U, &self.W);
        let t2 = fp.sqr(&t1);
        let t1 = fp.sub(&self.U, &self.W);
        let zr = fp.sqr(&t1);
        let xr = fp.mul(&t2, &zr);
        let t1 = fp.sub(&t2, &zr);
        let t2 = fp.mul_small(&t1, m.a24);
        let t2 = fp.add(&t2, &zr);
        Self {
            U: xr,
            W: fp.mul(&t1, &t2),
        }
    }

    /// Normalize to the affine x-coordinate.
    ///
    /// The inversion of W is blinded: the binary EEA's branching would
    /// otherwise leak through the projective representation ("Projective
    /// Coordinates Leak", EUROCRYPT 2004).
    pub fn to_affine_x(&self, m: &CurveParams) -> Result<FieldElement, Error> {
        let fp = &m.field;
        let w_inv = fp.invert_blinded(&self.W)?;
        Ok(fp.lnr(&fp.mul(&self.U, &w_inv)))
    }
}

impl ProjectivePoint {
    /// Normalize to affine coordinates with blinded inversion.
    pub fn to_affine(&self, m: &CurveParams) -> Result<AffinePoint, Error> {
        let fp = &m.field;
        let w_inv = fp.invert_blinded(&self.W)?;
        Ok(AffinePoint {
            u: fp.lnr(&fp.mul(&self.U, &w_inv)),
            v: fp.lnr(&fp.mul(&self.V, &w_inv)),
        })
    }

    /// Map to the birationally equivalent twisted Edwards curve:
    /// x_t = sqrt(-a) * u / v, y_t = (u - 1)/(u + 1), in projective form.
    pub fn to_edwards(&self, m: &CurveParams) -> edwards::ProjectivePoint {
        let fp = &m.field;
        let t1 = fp.add(&self.U, &self.W);
        let t2 = fp.sub(&self.U, &self.W);
        let t3 = fp.mul(&self.U, &m.sqrt_minus_a);
        edwards::ProjectivePoint {
            X: fp.mul(&t3, &t1),
            Y: fp.mul(&self.V, &t2),
            Z: fp.mul(&self.V, &t1),
        }
    }
}

/// Reject base points of order <= 8 by checking whether 8*P collapses to
/// the point at infinity (Z = 0 mod p). Defends against the CHES 2011
/// low-order-point combined attack; always executed before a variable-base
/// scalar multiplication here.
pub fn check_order(xp: &FieldElement, m: &CurveParams) -> Result<(), Error> {
    let fp = &m.field;
    let mut r = ProjectiveXPoint::from_affine_x(xp);
    r = r.double(m);
    r = r.double(m);
    r = r.double(m);
    // a field result is < 2p, so 0 mod p is exactly {0, p}
    if bool::from(fp.is_zero(&r.W) | fp.is_p(&r.W)) {
        return Err(Error::InvalidPoint);
    }
    Ok(())
}

/// Fully constant-time Montgomery ladder: w*len iterations regardless of
/// the scalar value, with branch-free conditional swaps.
///
/// Returns (k*P, (k+1)*P); the difference of the pair stays P throughout,
/// which is what makes y-recovery possible afterwards.
pub fn ladder(
    k: &Scalar,
    xp: &FieldElement,
    m: &CurveParams,
) -> (ProjectiveXPoint, ProjectiveXPoint) {
    let mut t0 = ProjectiveXPoint::IDENTITY;
    let mut t1 = ProjectiveXPoint::from_affine_x(xp);
    let mut swap = Choice::from(0);

    for i in (0..WORD_BITS * m.field.len).rev() {
        let ki = k.bit(i);
        ProjectiveXPoint::conditional_swap(&mut t0, &mut t1, swap ^ ki);
        t1 = t0.differential_add(&t1, xp, m);
        t0 = t0.double(m);
        swap = ki;
    }
    ProjectiveXPoint::conditional_swap(&mut t0, &mut t1, swap);
    (t0, t1)
}

/// Ladder variant that seeks the leading one of the scalar before entering
/// the loop. Per-iteration work is identical to [`ladder`], but the
/// iteration count depends on the position of the leading one, so this is
/// only safe for scalars whose leading bit sits at a fixed, public position
/// (e.g. clamped Curve25519 scalars, bit w*len - 2).
///
/// The scalar must be nonzero.
pub fn ladder_vartime(
    k: &Scalar,
    xp: &FieldElement,
    m: &CurveParams,
) -> (ProjectiveXPoint, ProjectiveXPoint) {
    let mut i = WORD_BITS * m.field.len - 1;
    while i > 0 && !bool::from(k.bit(i)) {
        i -= 1;
    }

    // leading bit consumed: T0 = P, T1 = 2P
    let mut t0 = ProjectiveXPoint::from_affine_x(xp);
    let mut t1 = t0.double(m);
    let mut swap = Choice::from(0);

    for j in (0..i).rev() {
        let kj = k.bit(j);
        ProjectiveXPoint::conditional_swap(&mut t0, &mut t1, swap ^ kj);
        t1 = t0.differential_add(&t1, xp, m);
        t0 = t0.double(m);
        swap = kj;
    }
    ProjectiveXPoint::conditional_swap(&mut t0, &mut t1, swap);
    (t0, t1)
}

/// Recover the full projective point for Q = k*P from the ladder output
/// pair (Q, Q+P) and the affine base point. Okeya-Sakurai recovery,
/// specialized for curves with B = 1; the schedule is fixed.
pub fn recover_y(
    q: &ProjectiveXPoint,
    q_plus: &ProjectiveXPoint,
    base: &AffinePoint,
    m: &CurveParams,
) -> ProjectivePoint {
    let fp = &m.field;
    let (x1, z1) = (&q.U, &q.W);
    let (x2, z2) = (&q_plus.U, &q_plus.W);

    let t1 = fp.mul(&base.u, x1);
    let t1 = fp.sub(&t1, z1);
    let t2 = fp.mul(z1, &base.u);
    let t2 = fp.sub(x1, &t2);
    let t3 = fp.mul(z2, &t1);
    let t1 = fp.mul(x2, &t2);
    let t2 = fp.add(&t3, &t1);
    let t3 = fp.sub(&t3, &t1);
    let t1 = fp.mul(x2, &base.v);
    let yr = fp.mul(&t2, &t3);
    let t3 = fp.add(z2, z2);
    let t2 = fp.add(&t3, &t3);
    let t3 = fp.mul(&t2, &t1);
    let t2 = fp.mul(&t3, z1);
    ProjectivePoint {
        U: fp.mul(&t2, x1),
        V: yr,
        W: fp.mul(&t2, z1),
    }
}

/// Variable-base scalar multiplication (the ECDH primitive): the affine
/// x-coordinate of k*P from the affine x-coordinate of P.
///
/// A zero scalar is rejected, the base point is checked for low order, and
/// the fully constant-time ladder is used unconditionally.
pub fn mul_varbase(
    k: &Scalar,
    xp: &FieldElement,
    m: &CurveParams,
) -> Result<FieldElement, Error> {
    if bool::from(k.is_zero(m.field.len)) {
        return Err(Error::InvalidScalar);
    }
    check_order(xp, m)?;

    let (q, _) = ladder(k, xp, m);
    q.to_affine_x(m).map_err(|_| Error::InvalidPoint)
}

/// Fixed-base scalar multiplication with Montgomery-u output: runs the
/// twisted Edwards comb and maps the result back through
/// u = (Z + Y)/(Z - Y), with the inversion blinded.
pub fn mul_fixbase(k: &Scalar, m: &CurveParams) -> Result<FieldElement, Error> {
    if bool::from(k.is_zero(m.field.len)) {
        return Err(Error::InvalidScalar);
    }
    let fp = &m.field;

    let q = edwards::mul_comb(k, m);
    let den = fp.sub(&q.Z, &q.Y);
    let num = fp.add(&q.Z, &q.Y);
    let den_inv = fp.invert_blinded(&den).map_err(|_| Error::InvalidPoint)?;
    Ok(fp.lnr(&fp.mul(&num, &den_inv)))
}

/// Decode a little-endian u-coordinate, clearing bit 255 per the wire
/// format.
pub fn decode_u(bytes: [u8; 32]) -> FieldElement {
    let mut b = bytes;
    b[31] &= 0x7f;
    FieldElement::from_le_bytes(b)
}
