//! Bounding volume extraction around the non-zero content of a volume.
//!
//! Unlike the crop engine, nothing in this module copies voxel data: the
//! results are index ranges and offsets which the caller can use to slice
//! or crop a volume.
use crate::element::Voxel;
use crate::error::{GeometryError, Result};
use ndarray::{ArrayBase, ArrayView, Data, Dimension, Slice};
use std::ops::Range;

/// Tight, inclusive bounding box of the non-zero voxels in a volume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    min: Vec<usize>,
    max: Vec<usize>,
}

impl BoundingBox {
    /// Create a bounding box from its inclusive lower and upper corners.
    pub fn new(min: Vec<usize>, max: Vec<usize>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(GeometryError::ShapeMismatch(format!(
                "bounding box corners {:?} and {:?} differ in rank",
                min, max
            )));
        }
        if min.iter().zip(&max).any(|(a, b)| a > b) {
            return Err(GeometryError::InvalidArguments(format!(
                "lower corner {:?} exceeds upper corner {:?}",
                min, max
            )));
        }
        Ok(BoundingBox { min, max })
    }

    /// Create a bounding box from a flat sequence holding all lower bounds
    /// followed by all upper bounds, e.g. `[x0, y0, z0, x1, y1, z1]`.
    pub fn from_flat(bounds: &[usize]) -> Result<Self> {
        if bounds.len() % 2 != 0 {
            return Err(GeometryError::ShapeMismatch(format!(
                "odd number of bounds ({})",
                bounds.len()
            )));
        }
        let (min, max) = bounds.split_at(bounds.len() / 2);
        BoundingBox::new(min.to_vec(), max.to_vec())
    }

    /// Find the bounding box of the non-zero voxels of `volume`.
    ///
    /// # Errors
    ///
    /// - `GeometryError::EmptyRegion` if every voxel is zero.
    pub fn from_volume<A, S, D>(volume: &ArrayBase<S, D>) -> Result<Self>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let ndim = volume.ndim();
        let mut min = vec![usize::MAX; ndim];
        let mut max = vec![0; ndim];
        let mut found = false;
        for (idx, v) in volume.view().into_dyn().indexed_iter() {
            if v.is_foreground() {
                found = true;
                for axis in 0..ndim {
                    min[axis] = min[axis].min(idx[axis]);
                    max[axis] = max[axis].max(idx[axis]);
                }
            }
        }
        if !found {
            return Err(GeometryError::EmptyRegion);
        }
        Ok(BoundingBox { min, max })
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.min.len()
    }

    /// Inclusive lower corner.
    pub fn min(&self) -> &[usize] {
        &self.min
    }

    /// Inclusive upper corner.
    pub fn max(&self) -> &[usize] {
        &self.max
    }

    /// Center of the box, per axis.
    pub fn center(&self) -> Vec<f64> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(&a, &b)| (a + b) as f64 / 2.0)
            .collect()
    }
}

/// Index ranges of a region of interest, one per axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionOfInterest(Vec<Range<usize>>);

impl RegionOfInterest {
    /// The per-axis index ranges.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.0
    }

    /// Extent of the region on each axis.
    pub fn shape(&self) -> Vec<usize> {
        self.0.iter().map(Range::len).collect()
    }

    /// View the region of `volume`, without copying.
    pub fn view<'a, A, S, D>(&self, volume: &'a ArrayBase<S, D>) -> Result<ArrayView<'a, A, D>>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        if volume.ndim() != self.0.len()
            || volume.shape().iter().zip(&self.0).any(|(&d, r)| r.end > d)
        {
            return Err(GeometryError::ShapeMismatch(format!(
                "region {:?} does not fit a volume of shape {:?}",
                self.0,
                volume.shape()
            )));
        }
        Ok(volume.slice_each_axis(|ax| {
            let r = &self.0[ax.axis.index()];
            Slice::from(r.start as isize..r.end as isize)
        }))
    }
}

fn check_rank(shape: &[usize], target_size: &[usize]) -> Result<()> {
    if shape.len() != target_size.len() {
        return Err(GeometryError::ShapeMismatch(format!(
            "target size {:?} does not match volume rank {}",
            target_size,
            shape.len()
        )));
    }
    Ok(())
}

/// Compute a region of roughly `target_size` around the non-zero voxels of
/// `volume`.
///
/// On each axis the tight extent `[min, max]` is widened by the slack
/// `target - (max - min)`, the floor half of it below and the rest above,
/// and then clamped to the volume. The region never shrinks below the
/// tight extent, even if `target_size` is smaller.
pub fn bounding_volume<A, S, D>(
    volume: &ArrayBase<S, D>,
    target_size: &[usize],
) -> Result<RegionOfInterest>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_rank(volume.shape(), target_size)?;
    let bbox = BoundingBox::from_volume(volume)?;
    let ranges = bbox
        .min()
        .iter()
        .zip(bbox.max())
        .zip(target_size)
        .zip(volume.shape())
        .map(|(((&lo, &hi), &target), &extent)| {
            let (lo, hi) = (lo as isize, hi as isize);
            let slack = target as isize - (hi - lo);
            let before = slack.div_euclid(2);
            let after = slack - before;
            let start = (lo - before).min(lo).max(0);
            let end = (hi + after).max(hi + 1).min(extent as isize);
            start as usize..end as usize
        })
        .collect();
    Ok(RegionOfInterest(ranges))
}

/// Compute offsets which center a window of `target_size` on the non-zero
/// content of `volume`, clamped so that the window lies inside the volume.
///
/// # Errors
///
/// - `GeometryError::InsufficientSize` if the volume is smaller than
///   `target_size` on any axis.
/// - `GeometryError::EmptyRegion` if every voxel is zero.
pub fn bounding_volume_offset<A, S, D>(
    volume: &ArrayBase<S, D>,
    target_size: &[usize],
) -> Result<Vec<usize>>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_rank(volume.shape(), target_size)?;
    let bbox = BoundingBox::from_volume(volume)?;
    bounding_box_offset(&bbox, target_size, Some(volume.shape()))
}

/// Compute offsets which center a window of `target_size` on a precomputed
/// bounding box.
///
/// Centers are rounded half to even. Offsets are never negative, and if
/// `image_shape` is given they are also clamped to `image - target`.
///
/// # Errors
///
/// - `GeometryError::InsufficientSize` if `image_shape` is smaller than
///   `target_size` on any axis.
pub fn bounding_box_offset(
    bbox: &BoundingBox,
    target_size: &[usize],
    image_shape: Option<&[usize]>,
) -> Result<Vec<usize>> {
    if bbox.rank() != target_size.len() {
        return Err(GeometryError::ShapeMismatch(format!(
            "target size {:?} does not match bounding box rank {}",
            target_size,
            bbox.rank()
        )));
    }
    let offsets: Vec<usize> = bbox
        .center()
        .into_iter()
        .zip(target_size)
        .map(|(c, &t)| (c - t as f64 / 2.0).round_ties_even().max(0.0) as usize)
        .collect();

    match image_shape {
        None => Ok(offsets),
        Some(image) => {
            check_rank(image, target_size)?;
            if image.iter().zip(target_size).any(|(&i, &t)| i < t) {
                return Err(GeometryError::InsufficientSize(image.to_vec(), target_size.to_vec()));
            }
            Ok(offsets
                .into_iter()
                .zip(image.iter().zip(target_size))
                .map(|(o, (&i, &t))| o.min(i - t))
                .collect())
        }
    }
}
