//! Cosmatesque turns a modular linear recurrence into self-similar raster images.
//!
//! A [`FractalParameters`] value holds a square coefficient matrix, a modulus and a set of
//! "white" residue classes. Evaluating it over an `N x N` grid fills every cell with a weighted
//! sum of earlier cells (modulo the modulus), seeded by a single `1` in the corner. Pascal's
//! triangle mod 2 is the simplest case and draws the Sierpinski triangle.
//!
//! # Pipeline overview
//!
//! 1. **Evaluate**: `FractalParameters + size -> ResidueMatrix` ([`evaluate`])
//! 2. **Render**: `ResidueMatrix -> GrayFrame`, either flat black/white
//!    ([`render_black_white`]) or layered by self-similarity depth ([`render_gradient`])
//! 3. **Persist** (caller side): encode the 8-bit luma frame, e.g. as PNG via
//!    [`GrayFrame::into_gray_image`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: equal inputs always produce byte-identical residues and pixels.
//! - **No IO in the core**: evaluation and rendering are pure; naming helpers live in [`output`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod eval;
mod foundation;
mod model;
mod render;

pub mod output;

pub use eval::cache::{CacheStats, FieldCache};
pub use eval::field::{RecurrenceField, evaluate};
pub use foundation::core::{CoefficientMatrix, ResidueMatrix};
pub use foundation::error::{CosmatesqueError, CosmatesqueResult};
pub use model::params::{DEFAULT_WHITE_RESIDUES, FractalParameters, MAX_MODULUS};
pub use model::presets::Preset;
pub use render::frame::GrayFrame;
pub use render::pipeline::{Picture, render_picture, render_picture_cached};
pub use render::raster::{
    RenderThreading, gradient_depth, render_black_white, render_black_white_with_threading,
    render_gradient, render_gradient_with_threading,
};
