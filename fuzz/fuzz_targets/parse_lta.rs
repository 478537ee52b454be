#![no_main]
use libfuzzer_sys::fuzz_target;
use volgeom::LinearTransformArray;

fuzz_target!(|data: &[u8]| {
    if let Ok(lta) = LinearTransformArray::from_reader(data) {
        let _ = lta.transform_type();
        let _ = lta.matrix();
        let _ = lta.src_matrix();
        let _ = lta.dst.scaled_matrix();
    }
});
