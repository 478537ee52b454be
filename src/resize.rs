//! Mapping of volumes into and out of a canonical working shape.
//!
//! Each spatial axis is handled independently: a larger input is center
//! cropped and a smaller one is center padded with zeros, so the result
//! always has exactly the requested shape. The [`BorderIndices`] returned
//! alongside record where the original input lies in the resized volume,
//! which allows the resize to be undone.
//!
//! # Example
//!
//! ```
//! use ndarray::{s, Array3};
//! use volgeom::resize::resize_to_shape_with_border;
//!
//! let volume = Array3::<f32>::from_elem((10, 10, 10), 1.0);
//! let (resized, border) = resize_to_shape_with_border(&volume, &[20, 20, 20])?;
//! assert_eq!(resized.shape(), &[20, 20, 20]);
//! assert_eq!(border.as_slice(), &[(5, 15), (5, 15), (5, 15)]);
//! assert_eq!(border.extract(&resized)?, volume);
//! # Ok::<(), volgeom::GeometryError>(())
//! ```
//!
//! [`BorderIndices`]: ./struct.BorderIndices.html
use crate::crop::{apply_plan, CropOptions};
use crate::element::Voxel;
use crate::error::{GeometryError, Result};
use crate::pad::Padding;
use crate::shape::build_indices_and_padding;
use crate::util::floor_div;
use ndarray::{Array, ArrayBase, ArrayView, Data, Dimension, Slice};

/// Where the odd voxel goes when the size difference of an axis is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CenterBias {
    /// The low side is cropped by the floor half of the excess, and padded
    /// by the ceiling half of the deficit. This is the canonical behaviour.
    Floor,
    /// The offset is `input div 2 - base div 2`. This agrees with `Floor`
    /// unless the base extent is odd and the input extent even, in which
    /// case the region sits one voxel further towards the high side.
    Halved,
}

impl Default for CenterBias {
    fn default() -> Self {
        CenterBias::Floor
    }
}

impl CenterBias {
    fn offset(self, input: usize, base: usize) -> isize {
        match self {
            CenterBias::Floor => floor_div(input as isize - base as isize, 2),
            CenterBias::Halved => (input / 2) as isize - (base / 2) as isize,
        }
    }
}

/// Index ranges, one `(start, end)` pair per spatial axis, into a resized
/// volume which correspond to the region of the original input.
///
/// A negative start (or an end past the resized extent) means that the
/// axis was cropped, so part of the original lies outside of the resized
/// volume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorderIndices(Vec<(isize, isize)>);

impl BorderIndices {
    /// Create border indices from raw `(start, end)` pairs.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidArguments` if a pair ends before it starts.
    pub fn new(borders: Vec<(isize, isize)>) -> Result<Self> {
        if let Some(&(s, e)) = borders.iter().find(|&&(s, e)| e < s) {
            return Err(GeometryError::InvalidArguments(format!(
                "border ({}, {}) ends before it starts",
                s, e
            )));
        }
        Ok(BorderIndices(borders))
    }

    /// Border indices spanning a whole volume of the given spatial shape.
    pub fn full(shape: &[usize]) -> Self {
        BorderIndices(shape.iter().map(|&d| (0, d as isize)).collect())
    }

    /// The raw `(start, end)` pairs.
    pub fn as_slice(&self) -> &[(isize, isize)] {
        &self.0
    }

    /// Spatial shape of the original input.
    pub fn original_shape(&self) -> Vec<usize> {
        self.0.iter().map(|&(s, e)| (e - s) as usize).collect()
    }

    /// Whether the whole original region lies inside a resized volume of
    /// the given shape, i.e. no spatial axis was cropped.
    pub fn is_contained(&self, resized_shape: &[usize]) -> bool {
        resized_shape.len() >= self.0.len()
            && resized_shape[resized_shape.len() - self.0.len()..]
                .iter()
                .zip(&self.0)
                .all(|(&d, &(s, e))| s >= 0 && e <= d as isize)
    }

    /// Slice the original region out of a resized volume, without copying.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InsufficientSize` if an axis was cropped, so the
    ///   original region is not entirely available.
    pub fn extract<'a, A, S, D>(&self, resized: &'a ArrayBase<S, D>) -> Result<ArrayView<'a, A, D>>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        if !self.is_contained(resized.shape()) {
            return Err(GeometryError::InsufficientSize(
                resized.shape().to_vec(),
                self.original_shape(),
            ));
        }
        let batch = resized.ndim() - self.0.len();
        Ok(resized.slice_each_axis(|ax| {
            let i = ax.axis.index();
            if i < batch {
                Slice::from(..)
            } else {
                let (s, e) = self.0[i - batch];
                Slice::from(s..e)
            }
        }))
    }

    /// Undo a resize: map `resized` back onto the original shape. Regions
    /// which were cropped away are produced with `padding`.
    pub fn restore<A, S, D>(
        &self,
        resized: &ArrayBase<S, D>,
        padding: Padding<A>,
    ) -> Result<Array<A, D>>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let offsets: Vec<isize> = self.0.iter().map(|&(s, _)| s).collect();
        let target: Vec<isize> = self.0.iter().map(|&(s, e)| e - s).collect();
        CropOptions::new()
            .offsets(&offsets)
            .target_shape(&target)
            .padding(padding)
            .apply(resized)
    }
}

/// Options which configure how volumes are resized to a base shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResizeOptions {
    bias: CenterBias,
}

impl ResizeOptions {
    /// Create the default options (canonical `Floor` bias).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the centering bias for odd size differences.
    pub fn bias(mut self, bias: CenterBias) -> Self {
        self.bias = bias;
        self
    }

    /// Start of the base-shaped region on every spatial axis, relative to
    /// the input's origin.
    pub fn offsets(&self, input_shape: &[usize], base_shape: &[usize]) -> Result<Vec<isize>> {
        if base_shape.len() > input_shape.len() {
            return Err(GeometryError::ShapeMismatch(format!(
                "base shape {:?} has more dimensions than the volume {:?}",
                base_shape, input_shape
            )));
        }
        let input = &input_shape[input_shape.len() - base_shape.len()..];
        Ok(input
            .iter()
            .zip(base_shape)
            .map(|(&i, &b)| self.bias.offset(i, b))
            .collect())
    }

    /// Resize the trailing axes of `volume` to `base_shape`.
    pub fn resize<A, S, D>(
        &self,
        volume: &ArrayBase<S, D>,
        base_shape: &[usize],
    ) -> Result<Array<A, D>>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        self.resize_with_border(volume, base_shape).map(|(out, _)| out)
    }

    /// Resize the trailing axes of `volume` to `base_shape`, also returning
    /// the border indices of the original input in the result.
    pub fn resize_with_border<A, S, D>(
        &self,
        volume: &ArrayBase<S, D>,
        base_shape: &[usize],
    ) -> Result<(Array<A, D>, BorderIndices)>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let offsets = self.offsets(volume.shape(), base_shape)?;
        let input = &volume.shape()[volume.ndim() - base_shape.len()..];
        if input == base_shape {
            return Ok((volume.to_owned(), BorderIndices::full(base_shape)));
        }

        debug!(
            "resizing {:?} to {:?} with offsets {:?}",
            volume.shape(),
            base_shape,
            offsets
        );
        let plan = build_indices_and_padding(volume.shape(), &offsets, base_shape)?;
        let out = apply_plan(volume, &plan, &Padding::default())?;
        let border = BorderIndices(
            offsets
                .iter()
                .zip(input)
                .map(|(&o, &i)| (-o, -o + i as isize))
                .collect(),
        );
        Ok((out, border))
    }
}

/// Resize the trailing axes of `volume` to `base_shape`, center cropping
/// or zero padding each axis as needed.
pub fn resize_to_shape<A, S, D>(
    volume: &ArrayBase<S, D>,
    base_shape: &[usize],
) -> Result<Array<A, D>>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    ResizeOptions::new().resize(volume, base_shape)
}

/// Like [`resize_to_shape`], also returning the border indices which
/// recover the original input from the result.
///
/// [`resize_to_shape`]: ./fn.resize_to_shape.html
pub fn resize_to_shape_with_border<A, S, D>(
    volume: &ArrayBase<S, D>,
    base_shape: &[usize],
) -> Result<(Array<A, D>, BorderIndices)>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    ResizeOptions::new().resize_with_border(volume, base_shape)
}
