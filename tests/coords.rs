#[macro_use]
extern crate approx;

mod util;

use nalgebra::Vector3;
use tempfile::tempdir;
use volgeom::affine::transform_point;
use util::{write_lta, IDENTITY_LTA, TALAIRACH_LTA};
use volgeom::{
    load_talairach_coordinates, map_coordinates, talairach_coordinates, Affine4, GeometryError,
    LinearTransformArray,
};

#[test]
fn identity_registration_gives_index_grid() {
    let dir = tempdir().unwrap();
    let path = write_lta(dir.path(), "identity.lta.gz", IDENTITY_LTA);
    let field = load_talairach_coordinates(&path, [4, 5, 6], &Affine4::identity()).unwrap();
    assert_eq!(field.shape(), &[4, 5, 6, 3]);
    for ((i, j, k, c), v) in field.indexed_iter() {
        assert_eq!(v.to_f64(), [i, j, k][c] as f64);
    }
}

#[test]
fn talairach_matches_full_precision() {
    let lta: LinearTransformArray = TALAIRACH_LTA.parse().unwrap();
    let vox2ras = lta.src.scaled_matrix();
    let shape = [8, 9, 10];
    let field = talairach_coordinates(&lta, shape, &vox2ras).unwrap();
    let full = map_coordinates(&(lta.matrix() * vox2ras), shape);
    assert_eq!(field.shape(), full.shape());
    for (half, full) in field.iter().zip(full.iter()) {
        assert_abs_diff_eq!(half.to_f32(), *full, epsilon = 0.05);
    }

    // every voxel is the composed transform applied to its index
    let composed = lta.matrix() * vox2ras;
    for &(i, j, k) in &[(0, 0, 0), (7, 8, 9), (3, 0, 5)] {
        let p = transform_point(&composed, &Vector3::new(i as f64, j as f64, k as f64));
        for c in 0..3 {
            assert_abs_diff_eq!(full[[i, j, k, c]], p[c] as f32, epsilon = 1e-4);
        }
    }
}

#[test]
fn non_ras_registration_is_rejected() {
    let text = IDENTITY_LTA.replace("type      = 1", "type      = 0");
    let lta: LinearTransformArray = text.parse().unwrap();
    assert!(matches!(
        talairach_coordinates(&lta, [2, 2, 2], &Affine4::identity()),
        Err(GeometryError::UnsupportedTransformType(0))
    ));
}
