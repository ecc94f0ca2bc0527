//! RQ decomposition of 3x3 matrices via sequential Givens rotations.

use crate::matrix::{mat_mul, mat_mul_chain, Matrix};

/// Result of [`rq_givens_decomposition_3`]: `A = R * Q` with `R` upper
/// triangular and `Q` a rotation matrix.
#[derive(Debug)]
pub struct RqDecomposition {
    /// Upper-triangular factor.
    pub r: Matrix<'static>,
    /// Orthonormal factor.
    pub q: Matrix<'static>,
}

/// Decomposes a 3x3 matrix into upper-triangular times rotation, `A = R * Q`.
///
/// Three Givens rotations are applied by right-multiplication, each zeroing
/// one sub-diagonal entry: `Qx` clears (2,1), `Qy` clears (2,0) of `A*Qx`,
/// `Qz` clears (1,0) of `A*Qx*Qy`. Then `R = A*Qx*Qy*Qz` and
/// `Q = (Qx*Qy*Qz)^T`, transposed because the eliminations were applied on
/// the right while the decomposition composes `Q` on the right of `R`.
/// The factors are canonicalized with paired sign flips so the diagonal of
/// `R` is non-negative; decomposing an identity (or any upper-triangular
/// matrix with positive diagonal) therefore reproduces it as `R`.
///
/// Returns `None` for numerically degenerate input: when any Givens step
/// produces a non-finite cosine/sine pair, or when the reconstruction
/// `R * Q` misses `A` by more than a relative 1e-3 on any entry (entries
/// below 1e-15 in magnitude are treated as structural zeros and skipped).
/// The reconstruction check turns silent numerical drift into an explicit
/// failure instead of a plausible-looking wrong result.
///
/// Non-3x3 input is a contract violation and panics.
///
/// # Examples
///
/// ```
/// use camgeo_matrix::{rq_givens_decomposition_3, Matrix};
///
/// let mut a = Matrix::zeros(3, 3);
/// a.identity();
/// let rq = rq_givens_decomposition_3(&a).unwrap();
/// assert!((rq.r[(0, 0)] - 1.0).abs() < 1e-12);
/// ```
pub fn rq_givens_decomposition_3(a: &Matrix<'_>) -> Option<RqDecomposition> {
    assert!(a.is_square() && a.rows() == 3, "rq decomposition expects a 3x3 matrix");

    // rotation about x clearing A(2,1)
    let r = (a[(2, 1)].powi(2) + a[(2, 2)].powi(2)).sqrt();
    let c = -a[(2, 2)] / r;
    let s = a[(2, 1)] / r;
    if !(c * s).is_finite() {
        return None;
    }
    let qx = Matrix::from_vec(3, 3, vec![1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c]);
    let mut aqx = Matrix::new();
    mat_mul(a, &qx, &mut aqx);

    // rotation about y clearing (2,0)
    let r = (aqx[(2, 2)].powi(2) + aqx[(2, 0)].powi(2)).sqrt();
    let c = aqx[(2, 2)] / r;
    let s = aqx[(2, 0)] / r;
    if !(c * s).is_finite() {
        return None;
    }
    let qy = Matrix::from_vec(3, 3, vec![c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c]);
    let mut aqxqy = Matrix::new();
    mat_mul(&aqx, &qy, &mut aqxqy);

    // rotation about z clearing (1,0)
    let r = (aqxqy[(1, 0)].powi(2) + aqxqy[(1, 1)].powi(2)).sqrt();
    let c = -aqxqy[(1, 1)] / r;
    let s = aqxqy[(1, 0)] / r;
    if !(c * s).is_finite() {
        return None;
    }
    let qz = Matrix::from_vec(3, 3, vec![c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0]);

    let mut upper = Matrix::new();
    mat_mul(&aqxqy, &qz, &mut upper);
    let mut q = Matrix::new();
    mat_mul_chain(&qx, &qy, &qz, &mut q);
    q.transpose();

    // the Givens composition leaves a paired sign ambiguity; canonicalize to
    // a non-negative diagonal of R, which keeps R*Q unchanged
    for i in 0..3 {
        if upper[(i, i)] < 0.0 {
            upper.scale_col(i, -1.0);
            q.scale_row(i, -1.0);
        }
    }

    // reconstruction check: every significant entry of A must be recovered
    let mut recon = Matrix::new();
    mat_mul(&upper, &q, &mut recon);
    for (orig, rec) in a.as_slice().iter().zip(recon.as_slice()) {
        if orig.abs() < 1e-15 {
            continue;
        }
        if ((orig - rec) / orig).abs() > 1e-3 {
            return None;
        }
    }

    Some(RqDecomposition { r: upper, q })
}
