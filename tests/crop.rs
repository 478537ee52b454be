#[macro_use]
extern crate pretty_assertions;

mod util;

use half::f16;
use ndarray::{arr2, s, Array3};
use util::ramp;
use volgeom::{crop_transform, BoundaryMode, CropOptions, Padding, KEEP_EXTENT};

#[test]
fn center_crop_plan() {
    let plan = CropOptions::<u8>::new()
        .target_shape(&[128, 128, 128])
        .plan(&[256, 256, 256])
        .unwrap();
    assert!(!plan.needs_padding());
    assert_eq!(plan.ranges(), vec![64..192, 64..192, 64..192]);
    assert_eq!(plan.output_shape(&[256, 256, 256]), vec![128, 128, 128]);
}

#[test]
fn center_pad_plan() {
    let plan = CropOptions::<u8>::new()
        .target_shape(&[20, 20, 20])
        .plan(&[10, 10, 10])
        .unwrap();
    assert_eq!(plan.ranges(), vec![0..10, 0..10, 0..10]);
    assert_eq!(plan.padding(), Some(vec![(5, 5), (5, 5), (5, 5)]));
}

#[test]
fn centering_parity() {
    // even delta: same on both sides
    let plan = CropOptions::<u8>::new().target_shape(&[6]).plan(&[10]).unwrap();
    assert_eq!(plan.ranges(), vec![2..8]);

    // odd delta: the low side gets the floor half
    let plan = CropOptions::<u8>::new().target_shape(&[7]).plan(&[10]).unwrap();
    assert_eq!(plan.ranges(), vec![1..8]);

    let plan = CropOptions::<u8>::new().target_shape(&[13]).plan(&[10]).unwrap();
    assert_eq!(plan.padding(), Some(vec![(1, 2)]));
}

#[test]
fn region_outside_of_volume() {
    let volume = ramp((4, 4, 4));
    let out = crop_transform(
        &volume,
        Some(&[10, 0, 0][..]),
        Some(&[3, 4, 4][..]),
        Padding::Constant(-7),
    )
    .unwrap();
    assert_eq!(out.shape(), &[3, 4, 4]);
    assert!(out.iter().all(|&v| v == -7));
}

#[test]
fn keep_extent() {
    let volume = ramp((5, 6, 7));
    let out = CropOptions::new()
        .target_shape(&[KEEP_EXTENT, 2, KEEP_EXTENT])
        .apply(&volume)
        .unwrap();
    assert_eq!(out, volume.slice(s![.., 2..4, ..]));
}

#[test]
fn boundary_modes_2d() {
    let volume = arr2(&[[1, 2, 3], [4, 5, 6]]);
    let options = CropOptions::new().offsets(&[-1, -2]).target_shape(&[4, 7]);

    let edge = options.clone().padding(BoundaryMode::Edge.into()).apply(&volume).unwrap();
    assert_eq!(
        edge,
        arr2(&[
            [1, 1, 1, 2, 3, 3, 3],
            [1, 1, 1, 2, 3, 3, 3],
            [4, 4, 4, 5, 6, 6, 6],
            [4, 4, 4, 5, 6, 6, 6],
        ])
    );

    let wrap = options.clone().padding(BoundaryMode::Wrap.into()).apply(&volume).unwrap();
    assert_eq!(
        wrap,
        arr2(&[
            [5, 6, 4, 5, 6, 4, 5],
            [2, 3, 1, 2, 3, 1, 2],
            [5, 6, 4, 5, 6, 4, 5],
            [2, 3, 1, 2, 3, 1, 2],
        ])
    );

    let reflect = options.padding(Padding::from_mode("reflect").unwrap()).apply(&volume).unwrap();
    assert_eq!(
        reflect,
        arr2(&[
            [6, 5, 4, 5, 6, 5, 4],
            [3, 2, 1, 2, 3, 2, 1],
            [6, 5, 4, 5, 6, 5, 4],
            [3, 2, 1, 2, 3, 2, 1],
        ])
    );
}

#[test]
fn half_precision_volume() {
    let volume = Array3::from_elem((3, 3, 3), f16::from_f32(0.5));
    let out = CropOptions::new().target_shape(&[5, 5, 5]).apply(&volume).unwrap();
    assert_eq!(out[[0, 0, 0]], f16::ZERO);
    assert_eq!(out[[2, 2, 2]], f16::from_f32(0.5));
    assert_eq!(out.iter().filter(|v| **v != f16::ZERO).count(), 27);
}

#[test]
fn view_input() {
    let volume = ramp((8, 8, 8));
    let view = volume.slice(s![.., .., ..;2]);
    let out = CropOptions::new().target_shape(&[4, 4, 4]).apply(&view).unwrap();
    assert_eq!(out, volume.slice(s![2..6, 2..6, 0..8;2]));
}
