use ndarray::{Array, Array3};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
/// A volume where every voxel holds a unique value derived from its index.
pub fn ramp(shape: (usize, usize, usize)) -> Array3<i32> {
    Array::from_shape_fn(shape, |(i, j, k)| (i * 10_000 + j * 100 + k) as i32 + 1)
}

#[allow(dead_code)]
/// A Talairach registration as written by FreeSurfer.
pub const TALAIRACH_LTA: &str = "\
# transform file /data/bert/mri/transforms/talairach.auto.xfm
# created by bert on Tue Jan 12 10:02:41 2021

type      = 1 # LINEAR_RAS_TO_RAS
nxforms   = 1
mean      = 0.0000 0.0000 0.0000
sigma     = 1.0000
1 4 4
1.098000049591064e+00 1.630000025033951e-02 -4.390000179409981e-02 -8.300000429153442e-01
-1.809999905526638e-02 1.024000048637390e+00 2.759999930858612e-01 -2.194000053405762e+01
3.960000164806843e-02 -2.547999918460846e-01 1.159999966621399e+00 1.201000022888184e+01
0.000000000000000e+00 0.000000000000000e+00 0.000000000000000e+00 1.000000000000000e+00
src volume info
valid = 1  # volume info valid
filename = /data/bert/mri/orig.mgz
volume = 256 256 256
voxelsize = 1.000000000000000e+00 1.000000000000000e+00 1.000000000000000e+00
xras   = -1.000000000000000e+00 0.000000000000000e+00 0.000000000000000e+00
yras   = 0.000000000000000e+00 0.000000000000000e+00 -1.000000000000000e+00
zras   = 0.000000000000000e+00 1.000000000000000e+00 0.000000000000000e+00
cras   = 5.980010032653809e+00 1.802801895141602e+01 -3.600006103515625e+00
dst volume info
valid = 1  # volume info valid
filename = /opt/freesurfer/average/mni305.cor.mgz
volume = 256 256 256
voxelsize = 1.000000000000000e+00 1.000000000000000e+00 1.000000000000000e+00
xras   = -1.000000000000000e+00 0.000000000000000e+00 0.000000000000000e+00
yras   = 0.000000000000000e+00 0.000000000000000e+00 -1.000000000000000e+00
zras   = 0.000000000000000e+00 1.000000000000000e+00 0.000000000000000e+00
cras   = 0.000000000000000e+00 0.000000000000000e+00 0.000000000000000e+00
";

/// An identity registration between two axis aligned spaces.
#[allow(dead_code)]
pub const IDENTITY_LTA: &str = "\
type      = 1 # LINEAR_RAS_TO_RAS
nxforms   = 1
mean      = 0.0000 0.0000 0.0000
sigma     = 1.0000
1 4 4
1.0 0.0 0.0 0.0
0.0 1.0 0.0 0.0
0.0 0.0 1.0 0.0
0.0 0.0 0.0 1.0
src volume info
valid = 1  # volume info valid
filename = src.mgz
volume = 4 5 6
voxelsize = 1.0 1.0 1.0
xras   = 1.0 0.0 0.0
yras   = 0.0 1.0 0.0
zras   = 0.0 0.0 1.0
cras   = 0.0 0.0 0.0
dst volume info
valid = 1  # volume info valid
filename = dst.mgz
volume = 4 5 6
voxelsize = 1.0 1.0 1.0
xras   = 1.0 0.0 0.0
yras   = 0.0 1.0 0.0
zras   = 0.0 0.0 1.0
cras   = 0.0 0.0 0.0
";

/// Write `contents` to a file named `name` in `dir`, gzip compressed if the
/// name ends with ".gz".
#[allow(dead_code)]
pub fn write_lta(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    if name.ends_with(".gz") {
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(contents.as_bytes()).unwrap();
        let _ = encoder.finish().unwrap();
    } else {
        let mut file = file;
        file.write_all(contents.as_bytes()).unwrap();
    }
    path
}
