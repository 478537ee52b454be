//! Reading of linear transform array (LTA) files.
//!
//! An LTA file describes an affine registration between a source and a
//! destination volume, as written by FreeSurfer tools. It is a line
//! oriented text format: `key = value` directives (with `#` comments),
//! one or more 4x4 matrix blocks of four lines with four numbers each, and
//! two sections, `src volume info` and `dst volume info`, describing the
//! geometry of both volumes.
//!
//! The reader is tolerant of field order and skips lines it does not
//! recognize, but it is strict about the shape of matrix blocks and about
//! the fields needed to assemble the volume matrices.
//!
//! # Example
//!
//! ```no_run
//! use volgeom::lta::{LinearTransformArray, TransformType};
//! # use volgeom::Result;
//!
//! # fn run() -> Result<()> {
//! let lta = LinearTransformArray::from_file("transforms/talairach.lta")?;
//! assert_eq!(lta.transform_type()?, TransformType::RasToRas);
//! println!("{}", lta.matrix());
//! # Ok(())
//! # }
//! ```
use crate::affine::{from_basis, from_scaled_basis, Affine4};
use crate::error::{GeometryError, Result};
use crate::util::{is_gz_file, split_directive, strip_comment};
use flate2::bufread::GzDecoder;
use nalgebra::Vector3;
use num_traits::FromPrimitive;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Kind of coordinate spaces an LTA maps between.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum TransformType {
    /// voxel indices to voxel indices.
    // LINEAR_VOX_TO_VOX          0
    VoxToVox = 0,
    /// scanner RAS to scanner RAS.
    // LINEAR_RAS_TO_RAS          1
    RasToRas = 1,
    /// physical voxel coordinates to physical voxel coordinates.
    // LINEAR_PHYSVOX_TO_PHYSVOX  2
    PhysvoxToPhysvox = 2,
}

/// Geometry of one of the volumes an LTA refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGeometry {
    /// Whether the geometry was flagged valid by the writer
    pub valid: bool,
    /// Path of the volume, as recorded by the writer
    pub filename: String,
    /// Volume dimensions
    pub volume: [usize; 3],
    /// Voxel size along each axis
    pub voxel_size: Vector3<f64>,
    /// RAS direction of the first voxel axis
    pub xras: Vector3<f64>,
    /// RAS direction of the second voxel axis
    pub yras: Vector3<f64>,
    /// RAS direction of the third voxel axis
    pub zras: Vector3<f64>,
    /// RAS coordinates of the volume center
    pub cras: Vector3<f64>,
}

impl VolumeGeometry {
    /// Volume matrix with the direction vectors as columns and the center
    /// as translation.
    pub fn matrix(&self) -> Affine4 {
        from_basis(&self.xras, &self.yras, &self.zras, &self.cras)
    }

    /// Like [`matrix`](#method.matrix), with the direction vectors scaled
    /// by the voxel size.
    pub fn scaled_matrix(&self) -> Affine4 {
        from_scaled_basis(&self.xras, &self.yras, &self.zras, &self.cras, &self.voxel_size)
    }
}

/// A parsed linear transform array.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTransformArray {
    /// Raw transform type code
    pub type_code: i32,
    /// Number of transforms declared by the file
    pub nxforms: usize,
    /// `mean` field, empty if absent
    pub mean: Vec<f64>,
    /// `sigma` field
    pub sigma: Option<f64>,
    /// The matrix blocks, in file order. Never empty.
    pub matrices: Vec<Affine4>,
    /// Source volume geometry
    pub src: VolumeGeometry,
    /// Destination volume geometry
    pub dst: VolumeGeometry,
}

impl LinearTransformArray {
    /// Read an LTA file. If the file name ends with ".gz", the file is
    /// decoded as a Gzip stream.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }

    /// Read an LTA from a stream of text.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self> {
        let mut bytes = Vec::new();
        let _ = source.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| GeometryError::Parse(0, format!("not valid UTF-8 text: {}", e)))?;
        text.parse()
    }

    /// Get the transform type as a validated enum.
    pub fn transform_type(&self) -> Result<TransformType> {
        FromPrimitive::from_i32(self.type_code)
            .ok_or_else(|| GeometryError::UnsupportedTransformType(self.type_code))
    }

    /// The effective transform matrix. When the file holds more than one
    /// matrix block, later blocks override earlier ones, so this is the
    /// last block.
    pub fn matrix(&self) -> &Affine4 {
        &self.matrices[self.matrices.len() - 1]
    }

    /// Source volume matrix (see [`VolumeGeometry::matrix`]).
    ///
    /// [`VolumeGeometry::matrix`]: ./struct.VolumeGeometry.html#method.matrix
    pub fn src_matrix(&self) -> Affine4 {
        self.src.matrix()
    }

    /// Destination volume matrix (see [`VolumeGeometry::matrix`]).
    ///
    /// [`VolumeGeometry::matrix`]: ./struct.VolumeGeometry.html#method.matrix
    pub fn dst_matrix(&self) -> Affine4 {
        self.dst.matrix()
    }
}

impl FromStr for LinearTransformArray {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser::default();
        for (i, line) in s.lines().enumerate() {
            parser.feed(i + 1, line)?;
        }
        parser.finish()
    }
}

/// Section of the file the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    TopLevel,
    Source,
    Destination,
}

impl Default for Section {
    fn default() -> Self {
        Section::TopLevel
    }
}

#[derive(Debug, Default)]
struct GeometryFields {
    valid: Option<bool>,
    filename: Option<String>,
    volume: Option<[usize; 3]>,
    voxel_size: Option<Vector3<f64>>,
    xras: Option<Vector3<f64>>,
    yras: Option<Vector3<f64>>,
    zras: Option<Vector3<f64>>,
    cras: Option<Vector3<f64>>,
}

impl GeometryFields {
    fn set(&mut self, line: usize, key: &str, value: &str) -> Result<()> {
        match key {
            "valid" => self.valid = Some(parse_number::<i32>(line, value)? != 0),
            "filename" => self.filename = Some(value.to_string()),
            "volume" => {
                let v = parse_triple::<usize>(line, value)?;
                self.volume = Some([v[0], v[1], v[2]]);
            }
            "voxelsize" => self.voxel_size = Some(parse_vector(line, value)?),
            "xras" => self.xras = Some(parse_vector(line, value)?),
            "yras" => self.yras = Some(parse_vector(line, value)?),
            "zras" => self.zras = Some(parse_vector(line, value)?),
            "cras" => self.cras = Some(parse_vector(line, value)?),
            _ => trace!("line {}: skipping volume info field `{}`", line, key),
        }
        Ok(())
    }

    fn build(self, prefix: &str) -> Result<VolumeGeometry> {
        let require = |v: Option<Vector3<f64>>, name: &str| {
            v.ok_or_else(|| GeometryError::MissingField(format!("{} {}", prefix, name)))
        };
        Ok(VolumeGeometry {
            valid: self.valid.unwrap_or(false),
            filename: self.filename.unwrap_or_default(),
            volume: self.volume.unwrap_or_default(),
            voxel_size: self.voxel_size.unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0)),
            xras: require(self.xras, "xras")?,
            yras: require(self.yras, "yras")?,
            zras: require(self.zras, "zras")?,
            cras: require(self.cras, "cras")?,
        })
    }
}

#[derive(Debug, Default)]
struct Parser {
    section: Section,
    type_code: Option<i32>,
    nxforms: Option<usize>,
    mean: Vec<f64>,
    sigma: Option<f64>,
    matrices: Vec<Affine4>,
    /// Rows of a matrix block being read, with the line the block started on.
    block: Option<(usize, Vec<[f64; 4]>)>,
    src: GeometryFields,
    dst: GeometryFields,
}

impl Parser {
    fn feed(&mut self, line: usize, raw: &str) -> Result<()> {
        let text = strip_comment(raw);

        if let Some((start, mut rows)) = self.block.take() {
            let row = matrix_row(text).ok_or_else(|| {
                GeometryError::Parse(
                    line,
                    format!(
                        "matrix block starting at line {} needs four rows of four numbers",
                        start
                    ),
                )
            })?;
            rows.push(row);
            if rows.len() == 4 {
                self.matrices.push(Affine4::from_fn(|r, c| rows[r][c]));
            } else {
                self.block = Some((start, rows));
            }
            return Ok(());
        }

        if text.is_empty() {
            return Ok(());
        }
        if text.starts_with("src volume info") {
            self.section = Section::Source;
            return Ok(());
        }
        if text.starts_with("dst volume info") {
            self.section = Section::Destination;
            return Ok(());
        }

        let (key, value) = split_directive(text);
        match self.section {
            Section::Source => self.src.set(line, key, value),
            Section::Destination => self.dst.set(line, key, value),
            Section::TopLevel => self.top_level(line, text, key, value),
        }
    }

    fn top_level(&mut self, line: usize, text: &str, key: &str, value: &str) -> Result<()> {
        match key {
            "type" => self.type_code = Some(parse_number(line, value)?),
            "nxforms" => self.nxforms = Some(parse_number(line, value)?),
            "mean" => self.mean = parse_numbers(line, value)?,
            "sigma" => self.sigma = Some(parse_number(line, value)?),
            _ => match matrix_row(text) {
                Some(row) => self.block = Some((line, vec![row])),
                None => trace!("line {}: skipping `{}`", line, text),
            },
        }
        Ok(())
    }

    fn finish(self) -> Result<LinearTransformArray> {
        if let Some((start, _)) = self.block {
            return Err(GeometryError::Parse(
                start,
                "matrix block ends prematurely".to_string(),
            ));
        }
        let type_code = self
            .type_code
            .ok_or_else(|| GeometryError::MissingField("type".to_string()))?;
        if self.matrices.is_empty() {
            return Err(GeometryError::MissingField("matrix".to_string()));
        }
        let nxforms = self.nxforms.unwrap_or_else(|| self.matrices.len());
        if nxforms != self.matrices.len() {
            warn!(
                "nxforms is {}, but {} matrix blocks were found",
                nxforms,
                self.matrices.len()
            );
        }

        Ok(LinearTransformArray {
            type_code,
            nxforms,
            mean: self.mean,
            sigma: self.sigma,
            matrices: self.matrices,
            src: self.src.build("src")?,
            dst: self.dst.build("dst")?,
        })
    }
}

/// Interpret a line as a matrix row: exactly four floating point numbers.
fn matrix_row(text: &str) -> Option<[f64; 4]> {
    let mut row = [0.0; 4];
    let mut tokens = text.split_whitespace();
    for v in row.iter_mut() {
        *v = tokens.next()?.parse().ok()?;
    }
    match tokens.next() {
        Some(_) => None,
        None => Some(row),
    }
}

fn parse_number<T: FromStr>(line: usize, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| GeometryError::Parse(line, format!("invalid number `{}`", value)))
}

fn parse_numbers<T: FromStr>(line: usize, value: &str) -> Result<Vec<T>> {
    value
        .split_whitespace()
        .map(|v| parse_number(line, v))
        .collect()
}

fn parse_triple<T: FromStr>(line: usize, value: &str) -> Result<Vec<T>> {
    let values = parse_numbers(line, value)?;
    if values.len() != 3 {
        return Err(GeometryError::Parse(
            line,
            format!("expected 3 values, found {}", values.len()),
        ));
    }
    Ok(values)
}

fn parse_vector(line: usize, value: &str) -> Result<Vector3<f64>> {
    Ok(Vector3::from_column_slice(&parse_triple(line, value)?))
}
