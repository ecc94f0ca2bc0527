//! Azimuth/elevation directions, local coordinate frames and the twist angle
//! about a viewing normal.
//!
//! Azimuth is the angle from the positive x axis to the normal in [-180, 180]
//! degrees; elevation the angle from the xy plane in [-90, 90] degrees; twist
//! the residual in-plane rotation about the normal after azimuth and
//! elevation have been accounted for.

use camgeo_matrix::linalg::{
    cross3_normalized, dot3, is_unit_norm3, l2_normalize3, matmul_transb, matvec3,
};

use crate::RotationMatrix;

/// Canonical x axis.
pub const CANONICAL_X: [f64; 3] = [1.0, 0.0, 0.0];
/// Canonical y axis.
pub const CANONICAL_Y: [f64; 3] = [0.0, 1.0, 0.0];
/// Canonical z axis.
pub const CANONICAL_Z: [f64; 3] = [0.0, 0.0, 1.0];

/// Unit direction vector for an azimuth/elevation pair in degrees.
pub fn az_el_to_direction(az: f64, el: f64) -> [f64; 3] {
    let az = az.to_radians();
    let el = el.to_radians();
    [el.cos() * az.cos(), el.cos() * az.sin(), el.sin()]
}

/// Azimuth and elevation in degrees of a direction vector.
///
/// The input need not be unit-norm but must not vanish (magnitudes at or
/// below 1e-16 are a contract violation). Within 1e-8 degrees of the poles
/// the azimuth is ill-conditioned and defined as 0.
pub fn direction_to_az_el(n: &[f64; 3]) -> (f64, f64) {
    let r = dot3(n, n).sqrt();
    assert!(r > 1e-16, "normal magnitude approaches zero");
    let nz = (n[2] / r).clamp(-1.0, 1.0);
    let el = nz.asin().to_degrees();
    let az = if (el.abs() - 90.0).abs() > 1e-8 {
        n[1].atan2(n[0]).to_degrees()
    } else {
        0.0
    };
    (az, el)
}

/// Completes a unit normal `z` to an orthonormal frame, returning `(u, v)`
/// with `u x v = z`.
///
/// The reference axis is the canonical x axis unless `z` is too aligned with
/// it (`|z . x| > 0.8`, where the cross product degrades), in which case the
/// canonical y axis takes over. Requires unit-norm input; the outputs are
/// asserted unit-norm.
pub fn local_coordinate_frame(z_normal: &[f64; 3]) -> ([f64; 3], [f64; 3]) {
    assert!(is_unit_norm3(z_normal, 1e-6), "z should be unit normed");

    let (u, v);
    if dot3(z_normal, &CANONICAL_X).abs() > 0.8 {
        u = cross3_normalized(&CANONICAL_Y, z_normal);
        v = cross3_normalized(z_normal, &u);
    } else {
        v = cross3_normalized(z_normal, &CANONICAL_X);
        u = cross3_normalized(&v, z_normal);
    }

    assert!(
        is_unit_norm3(&u, 1e-6) && is_unit_norm3(&v, 1e-6),
        "output is not unit normed"
    );
    (u, v)
}

/// Decomposes a rotation into azimuth, elevation and twist, all in degrees.
///
/// The rotation's third row is taken as the viewing normal and yields the
/// azimuth/elevation pair. A canonical frame is built from that normal and
/// the twist `zeta` is the signed angle between the canonical frame's x axis
/// and the rotation's actual x axis, measured in the plane of the normal.
pub fn rotation_matrix_to_az_el_twist(r: &RotationMatrix) -> (f64, f64, f64) {
    let mut nz = [r[6], r[7], r[8]];
    l2_normalize3(&mut nz);

    let (az, el) = direction_to_az_el(&nz);

    let (nx, ny) = local_coordinate_frame(&nz);
    let canonical = [
        nx[0], nx[1], nx[2], ny[0], ny[1], ny[2], nz[0], nz[1], nz[2],
    ];

    // relative rotation between the actual frame and the canonical one
    let mut rel = [0.0; 9];
    matmul_transb(r, 3, 3, &canonical, 3, 3, &mut rel);

    let x_image = matvec3(&rel, &CANONICAL_X);
    let mut zeta = x_image[0].clamp(-1.0, 1.0).acos().to_degrees();
    if x_image[1] < 0.0 {
        zeta = -zeta;
    }
    (az, el, zeta)
}

/// Splits the discrepancy between two rotations into a boresight error and
/// an in-plane error, both in degrees.
///
/// The boresight error is the angle between the viewing normals (third
/// rows); the in-plane error is the twist difference about the normal,
/// wrapped to [0, 180].
pub fn rotation_frame_error(r_ref: &RotationMatrix, r_obs: &RotationMatrix) -> (f64, f64) {
    let mut nz_ref = [r_ref[6], r_ref[7], r_ref[8]];
    let mut nz_obs = [r_obs[6], r_obs[7], r_obs[8]];
    l2_normalize3(&mut nz_ref);
    l2_normalize3(&mut nz_obs);

    let e_boresight = dot3(&nz_ref, &nz_obs).clamp(-1.0, 1.0).acos().to_degrees();

    let (_, _, zeta_ref) = rotation_matrix_to_az_el_twist(r_ref);
    let (_, _, zeta_obs) = rotation_matrix_to_az_el_twist(r_obs);
    let mut e_inplane = (zeta_ref - zeta_obs).abs() % 360.0;
    if e_inplane > 180.0 {
        e_inplane = 360.0 - e_inplane;
    }

    (e_boresight, e_inplane)
}
