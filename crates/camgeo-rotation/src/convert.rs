//! Conversions between axis-angle, quaternion, rotation-matrix and Euler
//! representations.

use camgeo_matrix::linalg::{cross3_normalized, dot3, matmul3_chain, normalized3};

use crate::frame::local_coordinate_frame;
use crate::{AxisAngle, Quaternion, RotationMatrix};

/// Converts an axis-angle rotation to a quaternion.
///
/// The axis is assumed unit-norm and is not renormalized; the result is a
/// unit quaternion exactly when that holds.
pub fn axis_angle_to_quaternion(aa: &AxisAngle) -> Quaternion {
    let t = aa[3] / 2.0;
    let s = t.sin();
    [aa[0] * s, aa[1] * s, aa[2] * s, t.cos()]
}

/// Converts a quaternion to a 3x3 rotation matrix.
///
/// The closed-form expansion from the quaternion components; the result is
/// orthonormal exactly when `q` has unit magnitude.
pub fn quaternion_to_rotation_matrix(q: &Quaternion) -> RotationMatrix {
    let qx2 = q[0] * q[0];
    let qy2 = q[1] * q[1];
    let qz2 = q[2] * q[2];

    let qxy = q[0] * q[1];
    let qxz = q[0] * q[2];
    let qxw = q[0] * q[3];
    let qyz = q[1] * q[2];
    let qyw = q[1] * q[3];
    let qzw = q[2] * q[3];

    [
        1.0 - 2.0 * (qy2 + qz2),
        2.0 * (qxy - qzw),
        2.0 * (qxz + qyw),
        2.0 * (qxy + qzw),
        1.0 - 2.0 * (qx2 + qz2),
        2.0 * (qyz - qxw),
        2.0 * (qxz - qyw),
        2.0 * (qyz + qxw),
        1.0 - 2.0 * (qx2 + qy2),
    ]
}

/// Converts an axis-angle rotation to a 3x3 rotation matrix.
///
/// # Examples
///
/// ```
/// use camgeo_rotation::{axis_angle_to_rotation_matrix, rotation_matrix_around_z};
///
/// let around_z = axis_angle_to_rotation_matrix(&[0.0, 0.0, 1.0, std::f64::consts::FRAC_PI_2]);
/// let reference = rotation_matrix_around_z(90.0);
/// for i in 0..9 {
///     assert!((around_z[i] - reference[i]).abs() < 1e-12);
/// }
/// ```
pub fn axis_angle_to_rotation_matrix(aa: &AxisAngle) -> RotationMatrix {
    quaternion_to_rotation_matrix(&axis_angle_to_quaternion(aa))
}

/// Computes the rotation matrix that rotates direction `na` onto `nb`.
///
/// Both inputs are L2-normalized first. Nearly identical directions return
/// the identity rotation. Antiparallel directions have no unique rotation
/// axis — the cross product vanishes — so the axis is taken from the local
/// coordinate frame of `na` with a half-turn angle; any perpendicular axis
/// maps `na` onto `-na`.
pub fn rotation_between_normals(na: &[f64; 3], nb: &[f64; 3]) -> RotationMatrix {
    let na = normalized3(na);
    let nb = normalized3(nb);

    let dot_ab = dot3(&na, &nb);

    let aa: AxisAngle = if 1.0 - dot_ab < 1e-10 {
        [0.0, 0.0, 1.0, 0.0]
    } else if 1.0 + dot_ab < 1e-10 {
        let (u, _v) = local_coordinate_frame(&na);
        [u[0], u[1], u[2], std::f64::consts::PI]
    } else {
        let axis = cross3_normalized(&na, &nb);
        [axis[0], axis[1], axis[2], dot_ab.acos()]
    };

    axis_angle_to_rotation_matrix(&aa)
}

/// Rotation matrix about the z axis; angle in degrees.
pub fn rotation_matrix_around_z(angle_in_degrees: f64) -> RotationMatrix {
    let in_plane = angle_in_degrees.to_radians();
    let (s, c) = in_plane.sin_cos();
    [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0]
}

/// Builds a rotation matrix from Euler angles in degrees.
///
/// Elementary rotations about x (`theta`), y (`phi`) and z (`psi`) composed
/// as `R = Rx * Ry * Rz`.
pub fn euler_to_rotation_matrix(theta: f64, phi: f64, psi: f64) -> RotationMatrix {
    let (s, c) = theta.to_radians().sin_cos();
    let rx = [1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c];

    let (s, c) = phi.to_radians().sin_cos();
    let ry = [c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c];

    let (s, c) = psi.to_radians().sin_cos();
    let rz = [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0];

    matmul3_chain(&rx, &ry, &rz)
}

/// Extracts Euler angles in degrees from a rotation matrix.
///
/// Inverse of [`euler_to_rotation_matrix`]. Near `phi = ±90°` (gimbal lock)
/// the rotation loses a degree of freedom and `theta`/`psi` are no longer
/// separately recoverable; the returned pair is one valid combination.
pub fn rotation_matrix_to_euler(r: &RotationMatrix) -> (f64, f64, f64) {
    let theta = r[5].atan2(r[8]);
    let c2 = (r[0] * r[0] + r[1] * r[1]).sqrt();
    let phi = (-r[2]).atan2(c2);
    let (s1, c1) = theta.sin_cos();
    let psi = (s1 * r[6] - c1 * r[3]).atan2(c1 * r[4] - s1 * r[7]);
    (-theta.to_degrees(), -phi.to_degrees(), -psi.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use camgeo_matrix::linalg::{det3, matmul_transb, matvec3};
    use rand::Rng;

    /// Uniformly distributed unit quaternion.
    fn random_unit_quaternion(rng: &mut impl Rng) -> Quaternion {
        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        let two_pi = 2.0 * std::f64::consts::PI;
        [
            (1.0 - r1).sqrt() * (two_pi * r2).cos(),
            r1.sqrt() * (two_pi * r3).sin(),
            r1.sqrt() * (two_pi * r3).cos(),
            (1.0 - r1).sqrt() * (two_pi * r2).sin(),
        ]
    }

    fn assert_orthonormal(r: &RotationMatrix) {
        let mut rrt = [0.0; 9];
        matmul_transb(r, 3, 3, r, 3, 3, &mut rrt);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(rrt[i * 3 + j], expected, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(det3(r), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_quaternion_gives_orthonormal_rotation() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let q = random_unit_quaternion(&mut rng);
            let r = quaternion_to_rotation_matrix(&q);
            assert_orthonormal(&r);
        }
    }

    #[test]
    fn test_axis_angle_around_z_matches_z_rotation() {
        let aa = [0.0, 0.0, 1.0, std::f64::consts::FRAC_PI_2];
        let r = axis_angle_to_rotation_matrix(&aa);
        let rz = rotation_matrix_around_z(90.0);
        for i in 0..9 {
            assert_relative_eq!(r[i], rz[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_around_z_rotates_x_to_y() {
        let r = rotation_matrix_around_z(90.0);
        let v = matvec3(&r, &[1.0, 0.0, 0.0]);
        assert_relative_eq!(v[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_zero_is_identity() {
        let r = euler_to_rotation_matrix(0.0, 0.0, 0.0);
        let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for i in 0..9 {
            assert_relative_eq!(r[i], eye[i], epsilon = 1e-15);
        }
    }

    #[test]
    fn test_euler_roundtrip_away_from_gimbal() {
        let cases = [
            (10.0, 20.0, 30.0),
            (-45.0, 60.0, 120.0),
            (170.0, -75.0, -150.0),
            (0.0, 0.0, 90.0),
            (-5.0, 89.0, 5.0),
        ];
        for (theta, phi, psi) in cases {
            let r = euler_to_rotation_matrix(theta, phi, psi);
            let (t, p, s) = rotation_matrix_to_euler(&r);
            assert_relative_eq!(t, theta, epsilon = 1e-9);
            assert_relative_eq!(p, phi, epsilon = 1e-9);
            assert_relative_eq!(s, psi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotation_between_normals_maps_a_to_b() {
        let cases = [
            ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, 1.0], [1.0, 1.0, 1.0]),
            ([3.0, -2.0, 0.5], [-1.0, 4.0, 2.0]),
        ];
        for (a, b) in cases {
            let r = rotation_between_normals(&a, &b);
            let na = normalized3(&a);
            let nb = normalized3(&b);
            let mapped = matvec3(&r, &na);
            for i in 0..3 {
                assert_relative_eq!(mapped[i], nb[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_rotation_between_identical_normals_is_identity() {
        let n = normalized3(&[0.3, -0.4, 0.8]);
        let r = rotation_between_normals(&n, &n);
        let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for i in 0..9 {
            assert_relative_eq!(r[i], eye[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_between_antiparallel_normals() {
        let cases = [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.6, -0.3, 0.9]];
        for a in cases {
            let na = normalized3(&a);
            let nb = [-na[0], -na[1], -na[2]];
            let r = rotation_between_normals(&na, &nb);
            assert_orthonormal(&r);
            let mapped = matvec3(&r, &na);
            for i in 0..3 {
                assert_relative_eq!(mapped[i], nb[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_quaternion_roundtrip_through_axis_angle() {
        let axis = normalized3(&[1.0, 2.0, 2.0]);
        let angle = 0.7;
        let q = axis_angle_to_quaternion(&[axis[0], axis[1], axis[2], angle]);
        let norm_sq: f64 = q.iter().map(|v| v * v).sum();
        assert_relative_eq!(norm_sq, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q[3], (angle / 2.0).cos(), epsilon = 1e-12);
    }
}
