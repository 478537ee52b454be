//! An application for reading linear transform array (LTA) files.

use std::env;
use volgeom::LinearTransformArray;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to LTA file is required");
    let lta = LinearTransformArray::from_file(filename).expect("Failed to read LTA file");
    match lta.transform_type() {
        Ok(t) => println!("type: {:?}", t),
        Err(e) => println!("type: {} ({})", lta.type_code, e),
    }
    println!("nxforms: {}", lta.nxforms);
    for (i, m) in lta.matrices.iter().enumerate() {
        println!("matrix #{}:{}", i, m);
    }
    println!("src: {:#?}", &lta.src);
    println!("src matrix:{}", lta.src_matrix());
    println!("dst: {:#?}", &lta.dst);
    println!("dst matrix:{}", lta.dst_matrix());
}
