//! Filename and picture-size helpers for saving pictures. Nothing here touches the filesystem.

use crate::{model::params::FractalParameters, render::pipeline::Picture};

/// Upper bound for [`default_picture_size`].
pub const SAVED_SIZE_LIMIT: usize = 1024;

/// Upper bound for [`preview_picture_size`].
pub const PREVIEW_SIZE_LIMIT: usize = 128;

/// Filename stem (no extension) describing a picture:
/// `"{summary}, picture= '{bw|gradient}', size={size}"`.
pub fn auto_filename(params: &FractalParameters, picture: Picture, size: usize) -> String {
    format!(
        "{}, picture= '{}', size={size}",
        params.summary(),
        picture.token()
    )
}

/// Largest power of `modulus` not above [`SAVED_SIZE_LIMIT`] (1024, 729, 1024, 625 for 2..=5).
///
/// Powers of the modulus keep every self-similar replica whole.
pub fn default_picture_size(modulus: u32) -> usize {
    largest_power_at_most(modulus, SAVED_SIZE_LIMIT)
}

/// Largest power of `modulus` not above [`PREVIEW_SIZE_LIMIT`].
pub fn preview_picture_size(modulus: u32) -> usize {
    largest_power_at_most(modulus, PREVIEW_SIZE_LIMIT)
}

/// One zoom level larger: `size * modulus`, saturating.
pub fn larger_picture_size(size: usize, modulus: u32) -> usize {
    size.saturating_mul(modulus as usize)
}

/// One zoom level smaller: `size / modulus`, never below 1.
pub fn smaller_picture_size(size: usize, modulus: u32) -> usize {
    if size > 1 && modulus > 0 {
        (size / modulus as usize).max(1)
    } else {
        1
    }
}

fn largest_power_at_most(modulus: u32, limit: usize) -> usize {
    let m = modulus as usize;
    if m < 2 {
        return 1;
    }
    let mut size = 1usize;
    while let Some(next) = size.checked_mul(m).filter(|&n| n <= limit) {
        size = next;
    }
    size
}

#[cfg(test)]
#[path = "../tests/unit/output/output.rs"]
mod tests;
