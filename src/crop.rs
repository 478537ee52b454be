//! The crop/pad engine.
//!
//! This module resizes the trailing (spatial) axes of an array to a target
//! shape. Cropping "just removes" voxels, while regions outside of the
//! input are produced by padding; voxel values are never interpolated.
//!
//! The region to extract is resolved from any sufficient combination of
//! offsets, a target shape and an output buffer:
//!
//! - only a target shape: the region is centered, with less crop or pad
//!   towards index 0;
//! - only offsets: the region is cropped symmetrically, `offset` voxels
//!   on both sides of every axis;
//! - both: the region starts at `offsets` and spans `target_shape`.
//!
//! An output buffer supplies the target shape when none is given.
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use volgeom::crop::CropOptions;
//!
//! let volume = Array3::<u8>::ones((10, 10, 10));
//! let padded = CropOptions::new()
//!     .target_shape(&[20, 20, 20])
//!     .apply(&volume)?;
//! assert_eq!(padded.shape(), &[20, 20, 20]);
//! assert_eq!(padded[[4, 4, 4]], 0);
//! assert_eq!(padded[[5, 5, 5]], 1);
//! # Ok::<(), volgeom::GeometryError>(())
//! ```
use crate::element::Voxel;
use crate::error::{GeometryError, Result};
use crate::pad::{pad, Padding};
use crate::shape::{
    build_indices_and_padding, centered_offsets, resolve_target_shape, symmetric_target_shape,
    CropPlan,
};
use ndarray::{Array, ArrayBase, ArrayView, Data, DataMut, Dimension, Slice};

/// Options and flags which can be used to configure how a volume is
/// cropped or padded.
#[derive(Debug, Clone, PartialEq)]
pub struct CropOptions<A> {
    offsets: Option<Vec<isize>>,
    target_shape: Option<Vec<isize>>,
    padding: Padding<A>,
}

impl<A: Voxel> Default for CropOptions<A> {
    fn default() -> Self {
        CropOptions {
            offsets: None,
            target_shape: None,
            padding: Padding::default(),
        }
    }
}

impl<A: Voxel> CropOptions<A> {
    /// Create a new set of options, with zero padding and neither offsets
    /// nor a target shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start of the region on each spatial axis. Negative offsets
    /// lead to padding.
    pub fn offsets(mut self, offsets: &[isize]) -> Self {
        self.offsets = Some(offsets.to_vec());
        self
    }

    /// Set the extent of the region on each spatial axis. An extent of
    /// [`KEEP_EXTENT`] keeps the input's extent on that axis.
    ///
    /// [`KEEP_EXTENT`]: ../shape/constant.KEEP_EXTENT.html
    pub fn target_shape(mut self, target_shape: &[isize]) -> Self {
        self.target_shape = Some(target_shape.to_vec());
        self
    }

    /// Set the padding strategy used when the region exceeds the input.
    pub fn padding(mut self, padding: Padding<A>) -> Self {
        self.padding = padding;
        self
    }

    /// Resolve the index and padding plan for an input of the given shape.
    pub fn plan(&self, input_shape: &[usize]) -> Result<CropPlan> {
        self.plan_with_output(input_shape, None)
    }

    fn plan_with_output(
        &self,
        input_shape: &[usize],
        out_shape: Option<&[usize]>,
    ) -> Result<CropPlan> {
        let target: Option<Vec<isize>> = match (&self.target_shape, out_shape) {
            (Some(t), _) => Some(t.clone()),
            (None, Some(out)) => {
                let rank = self.offsets.as_ref().map_or(out.len(), Vec::len);
                if rank > out.len() {
                    return Err(GeometryError::ShapeMismatch(format!(
                        "{} offsets given for an output of {} dimensions",
                        rank,
                        out.len()
                    )));
                }
                Some(out[out.len() - rank..].iter().map(|&d| d as isize).collect())
            }
            (None, None) => None,
        };

        let (offsets, target) = match (&self.offsets, target) {
            (None, None) => {
                return Err(GeometryError::InvalidArguments(
                    "either target_shape or offsets must be defined".to_string(),
                ))
            }
            (None, Some(target)) => {
                let target = resolve_target_shape(input_shape, &target)?;
                (centered_offsets(input_shape, &target)?, target)
            }
            (Some(offsets), None) => {
                (offsets.clone(), symmetric_target_shape(input_shape, offsets)?)
            }
            (Some(offsets), Some(target)) => {
                if offsets.len() != target.len() {
                    return Err(GeometryError::ShapeMismatch(format!(
                        "incompatible offset {:?} and target shape {:?} dimensionality",
                        offsets, target
                    )));
                }
                (offsets.clone(), resolve_target_shape(input_shape, &target)?)
            }
        };

        let plan = build_indices_and_padding(input_shape, &offsets, &target)?;
        debug!(
            "crop plan for {:?}: offsets {:?}, target {:?}, padding {:?}",
            input_shape,
            offsets,
            target,
            plan.padding()
        );
        Ok(plan)
    }

    /// Crop or pad `volume`, returning a newly allocated array.
    pub fn apply<S, D>(&self, volume: &ArrayBase<S, D>) -> Result<Array<A, D>>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        let plan = self.plan(volume.shape())?;
        apply_plan(volume, &plan, &self.padding)
    }

    /// Crop or pad `volume` into `out`. If no target shape was set, the
    /// trailing axes of `out` define it.
    ///
    /// # Errors
    ///
    /// - `GeometryError::ShapeMismatch` if the shape of `out` is not the
    ///   shape of the resolved region.
    pub fn apply_into<S, S2, D>(
        &self,
        volume: &ArrayBase<S, D>,
        out: &mut ArrayBase<S2, D>,
    ) -> Result<()>
    where
        S: Data<Elem = A>,
        S2: DataMut<Elem = A>,
        D: Dimension,
    {
        let plan = self.plan_with_output(volume.shape(), Some(out.shape()))?;
        let expected = plan.output_shape(volume.shape());
        if out.shape() != expected.as_slice() {
            return Err(GeometryError::ShapeMismatch(format!(
                "output has shape {:?}, expected {:?}",
                out.shape(),
                expected
            )));
        }
        let region = crop_view(volume, &plan);
        match plan.padding() {
            None => out.assign(&region),
            Some(pad_width) => out.assign(&pad(&region, &pad_width, &self.padding)?),
        }
        Ok(())
    }
}

/// Obtain a view of the crop ranges of `plan` in `volume`, without padding.
pub fn crop_view<'a, A, S, D>(volume: &'a ArrayBase<S, D>, plan: &CropPlan) -> ArrayView<'a, A, D>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let batch = plan.batch_dims();
    volume.slice_each_axis(|ax| {
        let i = ax.axis.index();
        if i < batch {
            Slice::from(..)
        } else {
            let r = &plan.axes()[i - batch].range;
            Slice::from(r.start as isize..r.end as isize)
        }
    })
}

/// Execute a resolved plan on `volume`.
pub fn apply_plan<A, S, D>(
    volume: &ArrayBase<S, D>,
    plan: &CropPlan,
    padding: &Padding<A>,
) -> Result<Array<A, D>>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let region = crop_view(volume, plan);
    match plan.padding() {
        None => Ok(region.to_owned()),
        Some(pad_width) => pad(&region, &pad_width, padding),
    }
}

/// Perform a crop transform of the trailing axes of `volume`.
///
/// This is a shorthand for configuring [`CropOptions`] with the given
/// arguments; see the [module-level documentation](index.html) for how
/// `offsets` and `target_shape` are combined.
///
/// [`CropOptions`]: ./struct.CropOptions.html
pub fn crop_transform<A, S, D>(
    volume: &ArrayBase<S, D>,
    offsets: Option<&[isize]>,
    target_shape: Option<&[isize]>,
    padding: Padding<A>,
) -> Result<Array<A, D>>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mut options = CropOptions::new().padding(padding);
    options.offsets = offsets.map(<[isize]>::to_vec);
    options.target_shape = target_shape.map(<[isize]>::to_vec);
    options.apply(volume)
}
