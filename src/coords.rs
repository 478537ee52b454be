//! Dense per-voxel coordinate fields.
//!
//! A coordinate field holds, for each voxel of a 3-D volume, the position
//! of that voxel under an affine map. The last axis of the field has
//! length 3.
use crate::affine::{get_affine_and_translation, Affine4};
use crate::error::{GeometryError, Result};
use crate::lta::{LinearTransformArray, TransformType};
use half::f16;
use ndarray::{Array4, Zip};
use std::path::Path;

/// Coordinate field stored at half precision.
///
/// Values are accurate to about three significant decimal digits, which
/// is enough for an auxiliary input channel and halves the memory of a
/// full `f32` field.
pub type CoordinateField = Array4<f16>;

/// Map every voxel index of a volume of the given shape through `matrix`.
///
/// The output has shape `[shape[0], shape[1], shape[2], 3]`, with
/// `out[[i, j, k, ..]] == matrix * [i, j, k, 1]` (homogeneous component
/// dropped).
pub fn map_coordinates(matrix: &Affine4, shape: [usize; 3]) -> Array4<f32> {
    let (linear, translation) = get_affine_and_translation(matrix);
    Array4::from_shape_fn((shape[0], shape[1], shape[2], 3), |(i, j, k, c)| {
        let row = linear.row(c);
        (row[0] * i as f64 + row[1] * j as f64 + row[2] * k as f64 + translation[c]) as f32
    })
}

/// Compute the Talairach coordinates of every voxel of a volume.
///
/// `vox2ras` maps voxel indices of the volume to scanner RAS coordinates,
/// and `lta` must be a RAS to RAS registration into Talairach space. The
/// composed map `lta.matrix() * vox2ras` is applied to the voxel grid of
/// the given shape.
///
/// # Errors
///
/// - `UnsupportedTransformType` if the transform is not RAS to RAS.
pub fn talairach_coordinates(
    lta: &LinearTransformArray,
    shape: [usize; 3],
    vox2ras: &Affine4,
) -> Result<CoordinateField> {
    match lta.transform_type() {
        Ok(TransformType::RasToRas) => {}
        _ => return Err(GeometryError::UnsupportedTransformType(lta.type_code)),
    }
    let composed = lta.matrix() * vox2ras;
    debug!("talairach coordinates for shape {:?}", shape);

    let mut out = CoordinateField::from_elem((shape[0], shape[1], shape[2], 3), f16::ZERO);
    let (linear, translation) = get_affine_and_translation(&composed);
    Zip::indexed(&mut out).for_each(|(i, j, k, c), v| {
        let row = linear.row(c);
        let x = row[0] * i as f64 + row[1] * j as f64 + row[2] * k as f64 + translation[c];
        *v = f16::from_f64(x);
    });
    Ok(out)
}

/// Read an LTA file and compute the Talairach coordinates of every voxel
/// of a volume (see [`talairach_coordinates`]).
///
/// [`talairach_coordinates`]: ./fn.talairach_coordinates.html
pub fn load_talairach_coordinates<P: AsRef<Path>>(
    path: P,
    shape: [usize; 3],
    vox2ras: &Affine4,
) -> Result<CoordinateField> {
    let lta = LinearTransformArray::from_file(path)?;
    talairach_coordinates(&lta, shape, vox2ras)
}
