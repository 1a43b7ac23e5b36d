use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::{
    foundation::core::ResidueMatrix,
    foundation::error::{CosmatesqueError, CosmatesqueResult},
    render::frame::GrayFrame,
};

/// Threading controls for rasterization.
///
/// Every pixel depends only on the finished residue grid, so rows are shaded independently.
/// Parallel and sequential output are byte-identical.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Shade rows on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Render residues in `white` as `255` and every other residue as `0`.
pub fn render_black_white(residues: &ResidueMatrix, white: &BTreeSet<u32>) -> GrayFrame {
    let size = residues.size();
    let data = shade_sequential(size, black_white_row(residues, white));
    frame(size, data)
}

/// [`render_black_white`] with explicit threading.
pub fn render_black_white_with_threading(
    residues: &ResidueMatrix,
    white: &BTreeSet<u32>,
    threading: &RenderThreading,
) -> CosmatesqueResult<GrayFrame> {
    let size = residues.size();
    let data = shade(size, threading, black_white_row(residues, white))?;
    Ok(frame(size, data))
}

fn black_white_row<'a>(
    residues: &'a ResidueMatrix,
    white: &'a BTreeSet<u32>,
) -> impl Fn(usize, &mut [u8]) + Sync + 'a {
    move |y: usize, row: &mut [u8]| {
        for (px, r) in row.iter_mut().zip(residues.row(y)) {
            *px = if white.contains(r) { 255 } else { 0 };
        }
    }
}

/// Number of self-similar zoom levels layered by [`render_gradient`].
///
/// This is the smallest `d` with `modulus^d >= size`, but at least `1`: a single-pixel image
/// still gets one layer.
pub fn gradient_depth(size: usize, modulus: u32) -> CosmatesqueResult<u32> {
    if modulus < 2 {
        return Err(CosmatesqueError::parameter(format!(
            "modulus must be >= 2, got {modulus}"
        )));
    }
    if size == 0 {
        return Err(CosmatesqueError::size("size must be >= 1"));
    }
    let mut depth = 0u32;
    let mut covered = 1usize;
    while covered < size {
        covered = covered.saturating_mul(modulus as usize);
        depth += 1;
    }
    Ok(depth.max(1))
}

/// Render the black/white pattern layered over progressively zoomed-out copies of itself.
///
/// Copy `d` (for `d` in `0..depth`) samples the black/white mask at `(x / modulus^d,
/// y / modulus^d)`. A pixel's intensity is `floor(k * 255 / depth)`, where `k` counts the copies
/// that are white there. The level at which a single replica would fill the canvas is left out.
pub fn render_gradient(
    residues: &ResidueMatrix,
    white: &BTreeSet<u32>,
    modulus: u32,
) -> CosmatesqueResult<GrayFrame> {
    render_gradient_with_threading(residues, white, modulus, &RenderThreading::default())
}

/// [`render_gradient`] with explicit threading.
pub fn render_gradient_with_threading(
    residues: &ResidueMatrix,
    white: &BTreeSet<u32>,
    modulus: u32,
    threading: &RenderThreading,
) -> CosmatesqueResult<GrayFrame> {
    let size = residues.size();
    let depth = gradient_depth(size, modulus)?;

    let mask: Vec<bool> = residues
        .as_slice()
        .iter()
        .map(|r| white.contains(r))
        .collect();
    // modulus^d for every layer; the largest is below `size`, so none overflow.
    let scales: Vec<usize> = std::iter::successors(Some(1usize), |s| {
        s.checked_mul(modulus as usize)
    })
    .take(depth as usize)
    .collect();

    let data = shade(size, threading, |y, row| {
        for (x, px) in row.iter_mut().enumerate() {
            let layered = scales
                .iter()
                .filter(|&&s| mask[(y / s) * size + x / s])
                .count() as u32;
            *px = (layered * 255 / depth) as u8;
        }
    })?;
    Ok(frame(size, data))
}

fn frame(size: usize, data: Vec<u8>) -> GrayFrame {
    // size * size fits in usize, so size fits in u32.
    let side = size as u32;
    GrayFrame {
        width: side,
        height: side,
        data,
    }
}

fn shade_sequential(size: usize, shade_row: impl Fn(usize, &mut [u8])) -> Vec<u8> {
    let mut data = vec![0u8; size * size];
    for (y, row) in data.chunks_mut(size).enumerate() {
        shade_row(y, row);
    }
    data
}

fn shade(
    size: usize,
    threading: &RenderThreading,
    shade_row: impl Fn(usize, &mut [u8]) + Sync,
) -> CosmatesqueResult<Vec<u8>> {
    if !threading.parallel {
        return Ok(shade_sequential(size, shade_row));
    }

    let pool = build_thread_pool(threading.threads)?;
    let mut data = vec![0u8; size * size];
    pool.install(|| {
        data.par_chunks_mut(size)
            .enumerate()
            .for_each(|(y, row)| shade_row(y, row));
    });
    Ok(data)
}

fn build_thread_pool(threads: Option<usize>) -> CosmatesqueResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(CosmatesqueError::parameter(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
