//! This module defines the voxel element API: the set of capabilities
//! every element type of a volume must offer so that it can be cropped,
//! padded and scanned for foreground.
use num_traits::Zero;
use std::fmt::Debug;

/// Trait type for the elements of a volume.
///
/// Cropping and padding never interpolate, so the only requirements are
/// copying values around, a zero value for default fill and comparison
/// against zero for foreground detection. All primitive numeric types,
/// as well as `half::f16`, implement it.
pub trait Voxel: Clone + Debug + PartialEq + Zero {
    /// Whether this voxel belongs to the foreground (is non-zero).
    fn is_foreground(&self) -> bool {
        !self.is_zero()
    }
}

impl<T> Voxel for T where T: Clone + Debug + PartialEq + Zero {}
