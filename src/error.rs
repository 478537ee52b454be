//! Error types shared by every geometry operation in this crate.
use std::io::Error as IOError;

quick_error! {
    /// Error type for all volume geometry operations.
    #[derive(Debug)]
    pub enum GeometryError {
        /// Ranks or lengths of offsets, target shapes or output buffers
        /// do not agree with each other or with the input volume.
        ShapeMismatch(msg: String) {
            display("Shape mismatch: {}", msg)
            from(err: ndarray::ShapeError) -> (err.to_string())
        }
        /// Not enough information was given to resolve a target shape.
        InvalidArguments(msg: String) {
            display("Invalid arguments: {}", msg)
        }
        /// The requested window does not fit in the available image extent.
        InsufficientSize(image: Vec<usize>, target: Vec<usize>) {
            display("Insufficient image size {:?} for target image size {:?}", image, target)
        }
        /// The volume does not contain a single non-zero voxel.
        EmptyRegion {
            display("Volume has no non-zero voxels")
        }
        /// Malformed line in a linear transform array file.
        Parse(line: usize, reason: String) {
            display("Parse error at line {}: {}", line, reason)
        }
        /// A required field is absent from a linear transform array file.
        MissingField(field: String) {
            display("Missing required field `{}`", field)
        }
        /// The transform type code is not usable for the requested operation.
        UnsupportedTransformType(code: i32) {
            display("Unsupported transform type {}", code)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Type alias for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, GeometryError>;
