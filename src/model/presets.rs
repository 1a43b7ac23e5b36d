use std::str::FromStr;

use crate::foundation::core::CoefficientMatrix;
use crate::foundation::error::{CosmatesqueError, CosmatesqueResult};
use crate::model::params::FractalParameters;

/// Named parameter sets with well-known pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Pascal's triangle mod 2.
    SierpinskiTriangle,
    /// Three-term recurrence mod 3 whose black cells form a carpet.
    SierpinskiCarpet,
    /// Fredkin's parity replicator: all eight look-back neighbours mod 2.
    FredkinsReplicator,
}

impl Preset {
    /// Every preset, in menu order.
    pub const ALL: [Preset; 3] = [
        Preset::SierpinskiTriangle,
        Preset::SierpinskiCarpet,
        Preset::FredkinsReplicator,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::SierpinskiTriangle => "Sierpinski triangle",
            Preset::SierpinskiCarpet => "Sierpinski carpet",
            Preset::FredkinsReplicator => "Fredkin's replicator",
        }
    }

    /// Command-line identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Preset::SierpinskiTriangle => "sierpinski-triangle",
            Preset::SierpinskiCarpet => "sierpinski-carpet",
            Preset::FredkinsReplicator => "fredkins-replicator",
        }
    }

    /// The preset's parameters. All presets paint residue 0 white.
    pub fn parameters(self) -> FractalParameters {
        let (rows, modulus) = match self {
            Preset::SierpinskiTriangle => ([[0, 0, 0], [0, 0, 1], [0, 1, 0]], 2),
            Preset::SierpinskiCarpet => ([[0, 0, 0], [0, 1, 1], [0, 1, 0]], 3),
            Preset::FredkinsReplicator => ([[1, 1, 1], [1, 0, 1], [1, 1, 0]], 2),
        };
        FractalParameters::from_parts(CoefficientMatrix::from_array(rows), modulus, [0])
    }
}

impl FromStr for Preset {
    type Err = CosmatesqueError;

    fn from_str(s: &str) -> CosmatesqueResult<Self> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s) || p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<_> = Preset::ALL.iter().map(|p| p.slug()).collect();
                CosmatesqueError::parameter(format!(
                    "unknown preset '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/presets.rs"]
mod tests;
