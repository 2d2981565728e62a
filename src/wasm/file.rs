//! Byte conversions between JavaScript typed arrays and Rust buffers.

use js_sys::Uint8Array;

/// Copies a Uint8Array into a Vec<u8>.
pub fn uint8_array_to_vec(data: &Uint8Array) -> Vec<u8> {
    let mut buffer = vec![0u8; data.length() as usize];
    data.copy_to(&mut buffer);
    buffer
}

/// Copies bytes into a new Uint8Array.
pub fn vec_to_uint8_array(data: &[u8]) -> Uint8Array {
    let array = Uint8Array::new_with_length(data.len() as u32);
    array.copy_from(data);
    array
}
