//! Shape algebra for crop and pad operations.
//!
//! The functions in this module are pure: they take shapes and offsets and
//! produce index ranges and pad amounts, without ever touching voxel data.
//! Spatial axes are always the trailing axes of a shape; any leading axes
//! (batch, channel) are carried through untouched.
//!
//! Offsets are signed. A negative offset on an axis means that the cropped
//! region starts before the volume's origin, and the missing voxels are
//! produced by padding.
use crate::error::{GeometryError, Result};
use std::ops::Range;

/// Sentinel for target shapes: keep the input extent on this axis.
pub const KEEP_EXTENT: isize = -1;

/// The crop range and pad amounts of a single spatial axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxisPlan {
    /// Range of input indices kept on this axis (possibly empty).
    pub range: Range<usize>,
    /// Number of voxels to insert before the kept range.
    pub pad_before: usize,
    /// Number of voxels to insert after the kept range.
    pub pad_after: usize,
}

impl AxisPlan {
    /// Whether this axis needs any padding.
    pub fn has_padding(&self) -> bool {
        self.pad_before != 0 || self.pad_after != 0
    }

    /// Extent of this axis after cropping and padding.
    pub fn output_len(&self) -> usize {
        self.pad_before + self.range.len() + self.pad_after
    }
}

/// Complete index and padding plan for a crop/pad operation over the
/// trailing axes of a volume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CropPlan {
    batch_dims: usize,
    axes: Vec<AxisPlan>,
}

impl CropPlan {
    /// Number of leading axes which are not affected by the plan.
    pub fn batch_dims(&self) -> usize {
        self.batch_dims
    }

    /// Per-axis plans for the spatial (trailing) axes.
    pub fn axes(&self) -> &[AxisPlan] {
        &self.axes
    }

    /// The crop ranges of the spatial axes.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.axes.iter().map(|a| a.range.clone()).collect()
    }

    /// Whether any spatial axis needs padding.
    pub fn needs_padding(&self) -> bool {
        self.axes.iter().any(AxisPlan::has_padding)
    }

    /// The `(before, after)` pad amounts of every spatial axis, or `None`
    /// if no axis needs padding at all.
    pub fn padding(&self) -> Option<Vec<(usize, usize)>> {
        if self.needs_padding() {
            Some(self.axes.iter().map(|a| (a.pad_before, a.pad_after)).collect())
        } else {
            None
        }
    }

    /// Full output shape (batch axes included) for the given input shape.
    pub fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        input_shape[..self.batch_dims]
            .iter()
            .cloned()
            .chain(self.axes.iter().map(AxisPlan::output_len))
            .collect()
    }
}

fn spatial<'a>(input_shape: &'a [usize], rank: usize) -> Result<&'a [usize]> {
    if rank > input_shape.len() {
        return Err(GeometryError::ShapeMismatch(format!(
            "{} spatial axes requested, but the volume has only {} dimensions",
            rank,
            input_shape.len()
        )));
    }
    Ok(&input_shape[input_shape.len() - rank..])
}

/// Compute the offsets which center a region of shape `target_shape` in the
/// trailing axes of `input_shape`.
///
/// On odd differences the lower index side gets the smaller half: a crop
/// of 11 voxels into 8 starts at 1, and a pad of 10 voxels into 13 starts
/// at -1.
pub fn centered_offsets(input_shape: &[usize], target_shape: &[usize]) -> Result<Vec<isize>> {
    let input = spatial(input_shape, target_shape.len())?;
    Ok(input
        .iter()
        .zip(target_shape)
        .map(|(&i, &t)| (i as isize - t as isize) / 2)
        .collect())
}

/// Resolve a target shape which may contain [`KEEP_EXTENT`] sentinels
/// against the trailing axes of `input_shape`.
///
/// [`KEEP_EXTENT`]: ./constant.KEEP_EXTENT.html
pub fn resolve_target_shape(input_shape: &[usize], target_shape: &[isize]) -> Result<Vec<usize>> {
    let input = spatial(input_shape, target_shape.len())?;
    input
        .iter()
        .zip(target_shape)
        .map(|(&i, &t)| match t {
            KEEP_EXTENT => Ok(i),
            t if t >= 0 => Ok(t as usize),
            t => Err(GeometryError::InvalidArguments(format!(
                "negative target extent {}",
                t
            ))),
        })
        .collect()
}

/// Derive the target shape of a symmetric crop: each spatial axis loses
/// `offset` voxels on both sides (or gains them, for negative offsets).
pub fn symmetric_target_shape(input_shape: &[usize], offsets: &[isize]) -> Result<Vec<usize>> {
    let input = spatial(input_shape, offsets.len())?;
    input
        .iter()
        .zip(offsets)
        .map(|(&i, &o)| {
            let t = i as isize - 2 * o;
            if t < 0 {
                Err(GeometryError::ShapeMismatch(format!(
                    "offset {} crops more than the extent {} of the axis",
                    o, i
                )))
            } else {
                Ok(t as usize)
            }
        })
        .collect()
}

/// Build the crop ranges and padding needed to extract a region of shape
/// `target_shape` starting at `offsets` from the trailing axes of a volume
/// with shape `input_shape`.
///
/// Ranges are clamped to the volume. Whatever the clamped range cannot
/// provide is covered by padding, so the output extent of every axis is
/// always exactly its target extent, even when the requested region lies
/// entirely outside of the volume.
///
/// # Errors
///
/// - `GeometryError::ShapeMismatch` if `offsets` and `target_shape` differ
///   in length, or if they are longer than the rank of `input_shape`.
pub fn build_indices_and_padding(
    input_shape: &[usize],
    offsets: &[isize],
    target_shape: &[usize],
) -> Result<CropPlan> {
    if offsets.len() != target_shape.len() {
        return Err(GeometryError::ShapeMismatch(format!(
            "offsets {:?} and target shape {:?} must be same length",
            offsets, target_shape
        )));
    }
    let input = spatial(input_shape, offsets.len())?;

    let axes = input
        .iter()
        .zip(offsets)
        .zip(target_shape)
        .map(|((&extent, &offset), &target)| {
            let extent = extent as isize;
            let target = target as isize;
            let start = offset.max(0).min(extent);
            let end = (offset + target).max(0).min(extent).max(start);
            let pad_before = (-offset).max(0).min(target);
            let pad_after = target - pad_before - (end - start);
            AxisPlan {
                range: start as usize..end as usize,
                pad_before: pad_before as usize,
                pad_after: pad_after as usize,
            }
        })
        .collect();

    Ok(CropPlan {
        batch_dims: input_shape.len() - offsets.len(),
        axes,
    })
}
