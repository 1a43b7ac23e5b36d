use std::{fmt, str::FromStr};

use crate::{
    eval::cache::FieldCache,
    eval::field::RecurrenceField,
    foundation::core::ResidueMatrix,
    foundation::error::{CosmatesqueError, CosmatesqueResult},
    model::params::FractalParameters,
    render::frame::GrayFrame,
    render::raster::{
        RenderThreading, render_black_white_with_threading, render_gradient_with_threading,
    },
};

/// Which rendering of the residue grid to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Picture {
    /// Flat two-tone image.
    #[serde(rename = "bw")]
    BlackWhite,
    /// Self-similarity depth shown as gray levels.
    Gradient,
}

impl Picture {
    /// Short token used on the command line and in generated filenames.
    pub fn token(self) -> &'static str {
        match self {
            Picture::BlackWhite => "bw",
            Picture::Gradient => "gradient",
        }
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Picture {
    type Err = CosmatesqueError;

    fn from_str(s: &str) -> CosmatesqueResult<Self> {
        match s.trim() {
            "bw" => Ok(Picture::BlackWhite),
            "gradient" => Ok(Picture::Gradient),
            other => Err(CosmatesqueError::parameter(format!(
                "unknown picture '{other}' (expected 'bw' or 'gradient')"
            ))),
        }
    }
}

/// Evaluate + render a single picture.
///
/// This is the one-shot API for producing pixels from [`FractalParameters`]:
/// 1. [`RecurrenceField::compute`]
/// 2. [`render_black_white`](crate::render_black_white) or
///    [`render_gradient`](crate::render_gradient), depending on `picture`
#[tracing::instrument(skip(params, threading))]
pub fn render_picture(
    params: &FractalParameters,
    size: usize,
    picture: Picture,
    threading: &RenderThreading,
) -> CosmatesqueResult<GrayFrame> {
    let residues = RecurrenceField::compute(params, size)?;
    rasterize(params, &residues, picture, threading)
}

/// [`render_picture`] reusing the residue grid held in `cache` when it matches.
pub fn render_picture_cached(
    cache: &mut FieldCache,
    params: &FractalParameters,
    size: usize,
    picture: Picture,
    threading: &RenderThreading,
) -> CosmatesqueResult<GrayFrame> {
    let residues = cache.get_or_compute(params, size)?;
    rasterize(params, &residues, picture, threading)
}

fn rasterize(
    params: &FractalParameters,
    residues: &ResidueMatrix,
    picture: Picture,
    threading: &RenderThreading,
) -> CosmatesqueResult<GrayFrame> {
    let white = params.white_residues();
    match picture {
        Picture::BlackWhite => render_black_white_with_threading(residues, white, threading),
        Picture::Gradient => {
            render_gradient_with_threading(residues, white, params.modulus(), threading)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
