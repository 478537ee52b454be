//! Helpers for 4x4 homogeneous affine matrices.
use nalgebra::{Matrix3, Matrix4, Vector3};

/// 3x3 linear part of an affine transformation.
pub type Affine3 = Matrix3<f64>;
/// 4x4 homogeneous affine transformation.
pub type Affine4 = Matrix4<f64>;

/// Separate a 4x4 affine into its 3x3 affine and translation components.
pub fn get_affine_and_translation(affine: &Affine4) -> (Affine3, Vector3<f64>) {
    let translation = affine.fixed_view::<3, 1>(0, 3).into_owned();
    let affine = affine.fixed_view::<3, 3>(0, 0).into_owned();
    (affine, translation)
}

/// Assemble an affine with the given basis vectors as the columns of its
/// linear part, `translation` as its last column and `[0, 0, 0, 1]` as its
/// bottom row.
#[rustfmt::skip]
pub fn from_basis(
    x: &Vector3<f64>,
    y: &Vector3<f64>,
    z: &Vector3<f64>,
    translation: &Vector3<f64>,
) -> Affine4 {
    Affine4::new(
        x[0], y[0], z[0], translation[0],
        x[1], y[1], z[1], translation[1],
        x[2], y[2], z[2], translation[2],
        0.0,  0.0,  0.0,  1.0,
    )
}

/// Like [`from_basis`], with each basis vector scaled by the voxel size
/// along its axis.
///
/// [`from_basis`]: ./fn.from_basis.html
pub fn from_scaled_basis(
    x: &Vector3<f64>,
    y: &Vector3<f64>,
    z: &Vector3<f64>,
    translation: &Vector3<f64>,
    voxel_size: &Vector3<f64>,
) -> Affine4 {
    from_basis(
        &(x * voxel_size[0]),
        &(y * voxel_size[1]),
        &(z * voxel_size[2]),
        translation,
    )
}

/// Transform a single point.
pub fn transform_point(affine: &Affine4, point: &Vector3<f64>) -> Vector3<f64> {
    let (linear, translation) = get_affine_and_translation(affine);
    linear * point + translation
}
