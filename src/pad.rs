//! Padding strategies and their application to arrays.
//!
//! Padding is applied to the trailing axes of an array; leading axes are
//! never padded. Values are only ever copied or filled in, never
//! interpolated.
use crate::element::Voxel;
use crate::error::{GeometryError, Result};
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};
use std::str::FromStr;

/// A boundary fill strategy, taking padded values from the array itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Replicate the edge voxel (`aaa|abc|ccc`).
    Edge,
    /// Mirror without repeating the edge voxel (`cb|abc|ba`).
    Reflect,
    /// Mirror including the edge voxel (`ba|abc|cb`).
    Symmetric,
    /// Wrap around to the opposite side (`bc|abc|ab`).
    Wrap,
}

impl BoundaryMode {
    /// Map a position relative to the start of a lane of length `len` onto
    /// the lane. `len` must be positive.
    fn source_index(self, pos: isize, len: usize) -> usize {
        let n = len as isize;
        let idx = match self {
            BoundaryMode::Edge => pos.max(0).min(n - 1),
            BoundaryMode::Wrap => pos.rem_euclid(n),
            BoundaryMode::Symmetric => {
                let m = pos.rem_euclid(2 * n);
                if m < n {
                    m
                } else {
                    2 * n - 1 - m
                }
            }
            BoundaryMode::Reflect if n == 1 => 0,
            BoundaryMode::Reflect => {
                let period = 2 * (n - 1);
                let m = pos.rem_euclid(period);
                if m < n {
                    m
                } else {
                    period - m
                }
            }
        };
        idx as usize
    }
}

impl FromStr for BoundaryMode {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "edge" => Ok(BoundaryMode::Edge),
            "reflect" => Ok(BoundaryMode::Reflect),
            "symmetric" => Ok(BoundaryMode::Symmetric),
            "wrap" => Ok(BoundaryMode::Wrap),
            other => Err(GeometryError::InvalidArguments(format!(
                "unknown padding mode `{}`",
                other
            ))),
        }
    }
}

/// How to produce voxels which lie outside of the cropped input.
///
/// Exactly one strategy is active per call. The default is a constant
/// fill with zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Padding<A> {
    /// Fill with the given value.
    Constant(A),
    /// Fill from the array's own boundary.
    Boundary(BoundaryMode),
}

impl<A: Voxel> Default for Padding<A> {
    fn default() -> Self {
        Padding::Constant(A::zero())
    }
}

impl<A> From<BoundaryMode> for Padding<A> {
    fn from(mode: BoundaryMode) -> Self {
        Padding::Boundary(mode)
    }
}

impl<A: Voxel> Padding<A> {
    /// Build a padding strategy from a mode name. `"constant"` selects a
    /// zero fill; the other accepted names are those of [`BoundaryMode`].
    ///
    /// [`BoundaryMode`]: ./enum.BoundaryMode.html
    pub fn from_mode(mode: &str) -> Result<Self> {
        if mode == "constant" {
            Ok(Padding::default())
        } else {
            mode.parse().map(Padding::Boundary)
        }
    }
}

/// Pad the trailing `pad_width.len()` axes of `input`, with `(before, after)`
/// voxel counts per axis.
///
/// # Errors
///
/// - `GeometryError::ShapeMismatch` if `pad_width` has more entries than
///   `input` has axes.
/// - `GeometryError::InvalidArguments` if a boundary mode is requested on an
///   axis of length zero which needs padding.
pub fn pad<A, S, D>(
    input: &ArrayBase<S, D>,
    pad_width: &[(usize, usize)],
    padding: &Padding<A>,
) -> Result<Array<A, D>>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = input.ndim();
    if pad_width.len() > ndim {
        return Err(GeometryError::ShapeMismatch(format!(
            "padding given for {} axes, but the array has only {} dimensions",
            pad_width.len(),
            ndim
        )));
    }
    let batch = ndim - pad_width.len();

    let mut shape = input.raw_dim();
    for (i, &(before, after)) in pad_width.iter().enumerate() {
        shape[batch + i] += before + after;
    }

    let fill = match padding {
        Padding::Constant(value) => value.clone(),
        Padding::Boundary(_) => A::zero(),
    };
    let mut out = Array::from_elem(shape, fill);

    out.slice_each_axis_mut(|ax| {
        let i = ax.axis.index();
        if i < batch {
            Slice::from(..)
        } else {
            let before = pad_width[i - batch].0;
            let len = input.len_of(ax.axis);
            Slice::from(before as isize..(before + len) as isize)
        }
    })
    .assign(input);

    if let Padding::Boundary(mode) = *padding {
        fill_boundary(&mut out, input.shape(), pad_width, mode)?;
    }
    Ok(out)
}

/// Fill the padded margins of `out` from its interior, one axis at a time.
/// When processing an axis, earlier axes are already complete and later
/// axes are restricted to their interior.
fn fill_boundary<A, D>(
    out: &mut Array<A, D>,
    input_shape: &[usize],
    pad_width: &[(usize, usize)],
    mode: BoundaryMode,
) -> Result<()>
where
    A: Voxel,
    D: Dimension,
{
    let batch = input_shape.len() - pad_width.len();
    let mut out = out.view_mut().into_dyn();

    for (k, &(before, after)) in pad_width.iter().enumerate() {
        if before == 0 && after == 0 {
            continue;
        }
        let axis = batch + k;
        let len = input_shape[axis];
        if len == 0 {
            return Err(GeometryError::InvalidArguments(format!(
                "cannot pad empty axis {} with mode {:?}",
                axis, mode
            )));
        }

        let mut region = out.slice_each_axis_mut(|ax| {
            let i = ax.axis.index();
            if i <= axis {
                Slice::from(..)
            } else {
                let (b, _) = pad_width[i - batch];
                Slice::from(b as isize..(b + input_shape[i]) as isize)
            }
        });

        let margins = (0..before).chain(before + len..before + len + after);
        for j in margins {
            let src = before + mode.source_index(j as isize - before as isize, len);
            let lane = region.index_axis(Axis(axis), src).to_owned();
            region.index_axis_mut(Axis(axis), j).assign(&lane);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use pretty_assertions::assert_eq;

    #[test]
    fn constant_fill() {
        let a = arr1(&[1u8, 2, 3]);
        let p = pad(&a, &[(2, 1)], &Padding::Constant(9)).unwrap();
        assert_eq!(p, arr1(&[9, 9, 1, 2, 3, 9]));
    }

    #[test]
    fn zero_fill_by_default() {
        let a = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let p = pad(&a, &[(1, 0)], &Padding::default()).unwrap();
        assert_eq!(p, arr2(&[[0.0, 1.0, 2.0], [0.0, 3.0, 4.0]]));
    }

    #[test]
    fn boundary_modes_1d() {
        let a = arr1(&[1i32, 2, 3]);
        let edge = pad(&a, &[(2, 2)], &BoundaryMode::Edge.into()).unwrap();
        assert_eq!(edge, arr1(&[1, 1, 1, 2, 3, 3, 3]));
        let reflect = pad(&a, &[(2, 2)], &BoundaryMode::Reflect.into()).unwrap();
        assert_eq!(reflect, arr1(&[3, 2, 1, 2, 3, 2, 1]));
        let symmetric = pad(&a, &[(2, 2)], &BoundaryMode::Symmetric.into()).unwrap();
        assert_eq!(symmetric, arr1(&[2, 1, 1, 2, 3, 3, 2]));
        let wrap = pad(&a, &[(2, 2)], &BoundaryMode::Wrap.into()).unwrap();
        assert_eq!(wrap, arr1(&[2, 3, 1, 2, 3, 1, 2]));
    }

    #[test]
    fn edge_2d_fills_corners() {
        let a = arr2(&[[1i32, 2], [3, 4]]);
        let p = pad(&a, &[(1, 1), (1, 1)], &BoundaryMode::Edge.into()).unwrap();
        assert_eq!(
            p,
            arr2(&[
                [1, 1, 2, 2],
                [1, 1, 2, 2],
                [3, 3, 4, 4],
                [3, 3, 4, 4],
            ])
        );
    }

    #[test]
    fn leading_axes_are_not_padded() {
        let a = arr2(&[[1u8, 2], [3, 4]]);
        let p = pad(&a, &[(0, 2)], &BoundaryMode::Wrap.into()).unwrap();
        assert_eq!(p, arr2(&[[1, 2, 1, 2], [3, 4, 3, 4]]));
    }

    #[test]
    fn boundary_on_empty_axis_fails() {
        let a = ndarray::Array1::<u8>::zeros(0);
        assert!(pad(&a, &[(1, 1)], &BoundaryMode::Edge.into()).is_err());
        let p = pad(&a, &[(1, 1)], &Padding::Constant(7)).unwrap();
        assert_eq!(p, arr1(&[7, 7]));
    }

    #[test]
    fn mode_names() {
        assert_eq!(Padding::<u8>::from_mode("constant").unwrap(), Padding::Constant(0));
        assert_eq!(
            Padding::<u8>::from_mode("reflect").unwrap(),
            Padding::Boundary(BoundaryMode::Reflect)
        );
        assert!(Padding::<u8>::from_mode("linear_ramp").is_err());
    }

    #[test]
    fn too_many_axes() {
        let a = arr1(&[1u8]);
        assert!(pad(&a, &[(1, 1), (1, 1)], &Padding::default()).is_err());
    }
}
