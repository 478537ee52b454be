//! Volumetric geometry primitives for medical image preprocessing.
//!
//! This crate reshapes, crops, pads and re-maps the coordinates of 3-D
//! (and batched N-D) image volumes, keeping the information needed to
//! invert each transformation exactly.
//!
//! - [`crop`] resizes the trailing axes of an array to a target shape,
//!   cropping and padding as needed (see [`CropOptions`]).
//! - [`resize`] centers a volume inside a canonical working shape and
//!   records the [`BorderIndices`] of the original region.
//! - [`bbox`] finds the tight foreground region of a volume and expands
//!   it to a fixed size within the image bounds.
//! - [`lta`] reads linear transform array files, and [`coords`] turns
//!   them into dense per-voxel coordinate fields.
//!
//! Volumes are `ndarray` arrays of any element type implementing
//! [`Voxel`]; affine matrices are `nalgebra` 4x4 matrices.
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use volgeom::resize_to_shape_with_border;
//! # use volgeom::Result;
//!
//! # fn run() -> Result<()> {
//! let volume = Array3::<f32>::ones((100, 120, 90));
//! let (resized, border) = resize_to_shape_with_border(&volume, &[128, 128, 128])?;
//! assert_eq!(resized.shape(), &[128, 128, 128]);
//!
//! let original = border.extract(&resized)?;
//! assert_eq!(original, volume);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! [`crop`]: ./crop/index.html
//! [`resize`]: ./resize/index.html
//! [`bbox`]: ./bbox/index.html
//! [`lta`]: ./lta/index.html
//! [`coords`]: ./coords/index.html
//! [`CropOptions`]: ./crop/struct.CropOptions.html
//! [`BorderIndices`]: ./resize/struct.BorderIndices.html
//! [`Voxel`]: ./element/trait.Voxel.html
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate log;

pub mod affine;
pub mod bbox;
pub mod coords;
pub mod crop;
pub mod element;
pub mod error;
pub mod lta;
pub mod pad;
pub mod resize;
pub mod shape;
mod util;

pub use crate::affine::Affine4;
pub use crate::bbox::{
    bounding_box_offset, bounding_volume, bounding_volume_offset, BoundingBox, RegionOfInterest,
};
pub use crate::coords::{
    load_talairach_coordinates, map_coordinates, talairach_coordinates, CoordinateField,
};
pub use crate::crop::{crop_transform, CropOptions};
pub use crate::element::Voxel;
pub use crate::error::{GeometryError, Result};
pub use crate::lta::{LinearTransformArray, TransformType, VolumeGeometry};
pub use crate::pad::{BoundaryMode, Padding};
pub use crate::resize::{
    resize_to_shape, resize_to_shape_with_border, BorderIndices, CenterBias, ResizeOptions,
};
pub use crate::shape::{CropPlan, KEEP_EXTENT};
