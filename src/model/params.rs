use std::collections::BTreeSet;
use std::fmt::Write as _;

use rand::Rng;

use crate::foundation::core::CoefficientMatrix;
use crate::foundation::error::{CosmatesqueError, CosmatesqueResult};

/// Upper bound for [`FractalParameters::with_random_modulus`]. Random white residue sets also
/// cover `0..MAX_MODULUS` so that a later modulus change finds residues staged.
pub const MAX_MODULUS: u32 = 5;

/// White residues restored by [`FractalParameters::with_default_white_residues`].
pub const DEFAULT_WHITE_RESIDUES: [u32; 4] = [1, 2, 3, 4];

/// Everything needed to evaluate one recurrence: coefficients, modulus and white residues.
///
/// Values are immutable; the `with_*` helpers return modified copies so a caller can keep its
/// own editing history between renders.
///
/// White residues `>= modulus` are legal. They never match a residue but stay staged so that a
/// later, larger modulus picks them up.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ParametersDef", into = "ParametersDef")]
pub struct FractalParameters {
    coefficients: CoefficientMatrix,
    modulus: u32,
    white_residues: BTreeSet<u32>,
}

/// Wire shape of a parameters document. Values are checked only when converted.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ParametersDef {
    coefficients: Vec<Vec<u32>>,
    modulus: u32,
    #[serde(default)]
    white_residues: BTreeSet<u32>,
}

impl TryFrom<ParametersDef> for FractalParameters {
    type Error = CosmatesqueError;

    fn try_from(def: ParametersDef) -> CosmatesqueResult<Self> {
        Self::new(
            CoefficientMatrix::new(def.coefficients)?,
            def.modulus,
            def.white_residues,
        )
    }
}

impl From<FractalParameters> for ParametersDef {
    fn from(p: FractalParameters) -> Self {
        Self {
            coefficients: p.coefficients.to_rows(),
            modulus: p.modulus,
            white_residues: p.white_residues,
        }
    }
}

impl Default for FractalParameters {
    /// White Sierpinski triangle on black: `[[0, 1], [1, 0]]`, modulus 2, white `{1}`.
    fn default() -> Self {
        Self::from_parts(CoefficientMatrix::from_array([[0, 1], [1, 0]]), 2, [1])
    }
}

impl FractalParameters {
    /// Create validated parameters. Fails when `modulus < 2`.
    pub fn new(
        coefficients: CoefficientMatrix,
        modulus: u32,
        white_residues: impl IntoIterator<Item = u32>,
    ) -> CosmatesqueResult<Self> {
        let p = Self {
            coefficients,
            modulus,
            white_residues: white_residues.into_iter().collect(),
        };
        p.validate()?;
        Ok(p)
    }

    pub(crate) fn from_parts(
        coefficients: CoefficientMatrix,
        modulus: u32,
        white_residues: impl IntoIterator<Item = u32>,
    ) -> Self {
        debug_assert!(modulus >= 2);
        Self {
            coefficients,
            modulus,
            white_residues: white_residues.into_iter().collect(),
        }
    }

    /// Parse parameters from a JSON reader.
    ///
    /// Malformed documents (syntax, unknown fields, wrong types) give
    /// [`CosmatesqueError::Serde`]; well-formed documents with invalid values give
    /// [`CosmatesqueError::Parameter`].
    pub fn from_reader<R: std::io::Read>(r: R) -> CosmatesqueResult<Self> {
        let def: ParametersDef = serde_json::from_reader(r)
            .map_err(|e| CosmatesqueError::serde(format!("parse parameters JSON: {e}")))?;
        Self::try_from(def)
    }

    /// Parse parameters from a JSON string.
    pub fn from_json_str(s: &str) -> CosmatesqueResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CosmatesqueResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants evaluation relies on.
    pub fn validate(&self) -> CosmatesqueResult<()> {
        if self.modulus < 2 {
            return Err(CosmatesqueError::parameter(format!(
                "modulus must be >= 2, got {}",
                self.modulus
            )));
        }
        Ok(())
    }

    /// Recurrence coefficients.
    pub fn coefficients(&self) -> &CoefficientMatrix {
        &self.coefficients
    }

    /// Side length of the coefficient matrix.
    pub fn reach(&self) -> usize {
        self.coefficients.reach()
    }

    /// Modulus all residues are reduced by.
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// All white residues, including staged ones `>= modulus`.
    pub fn white_residues(&self) -> &BTreeSet<u32> {
        &self.white_residues
    }

    /// White residues that can actually occur (`< modulus`), ascending.
    pub fn visible_white_residues(&self) -> impl Iterator<Item = u32> + '_ {
        self.white_residues.range(..self.modulus).copied()
    }

    /// Copy with a different modulus.
    pub fn with_modulus(&self, modulus: u32) -> CosmatesqueResult<Self> {
        Self::new(
            self.coefficients.clone(),
            modulus,
            self.white_residues.iter().copied(),
        )
    }

    /// Copy with a different coefficient matrix.
    pub fn with_coefficients(&self, coefficients: CoefficientMatrix) -> Self {
        Self {
            coefficients,
            ..self.clone()
        }
    }

    /// Copy with a different white residue set.
    pub fn with_white_residues(&self, white: impl IntoIterator<Item = u32>) -> Self {
        Self {
            white_residues: white.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Copy with every coefficient reduced modulo the modulus.
    pub fn with_reduced_coefficients(&self) -> CosmatesqueResult<Self> {
        Ok(self.with_coefficients(self.coefficients.reduced(self.modulus)?))
    }

    /// Copy with every visible residue's colour flipped.
    ///
    /// Only residues below the modulus are toggled; staged residues `>= modulus` are kept as
    /// they are. Toggling every residue below [`MAX_MODULUS`] would render the same picture but
    /// scramble the staged set, so that is not done.
    pub fn with_inverted_white_residues(&self) -> Self {
        let staged = self.white_residues.range(self.modulus..).copied();
        let flipped = (0..self.modulus).filter(|r| !self.white_residues.contains(r));
        self.with_white_residues(flipped.chain(staged).collect::<Vec<_>>())
    }

    /// Copy with white residues `{1, 2, 3, 4}`: only `0` is black for moduli up to 5.
    pub fn with_default_white_residues(&self) -> Self {
        self.with_white_residues(DEFAULT_WHITE_RESIDUES)
    }

    /// Copy with a modulus drawn uniformly from `2..=MAX_MODULUS`.
    pub fn with_random_modulus<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            modulus: rng.gen_range(2..=MAX_MODULUS),
            ..self.clone()
        }
    }

    /// Copy with coefficients drawn uniformly from `0..modulus`, keeping the reach.
    ///
    /// With `symmetric`, the matrix is mirrored across its main diagonal. The self cell is
    /// always `0`.
    pub fn with_random_coefficients<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        symmetric: bool,
    ) -> Self {
        let reach = self.reach();
        let mut rows = vec![vec![0u32; reach]; reach];
        for x in 0..reach {
            for y in 0..reach {
                rows[y][x] = if symmetric && x > y {
                    rows[x][y]
                } else {
                    rng.gen_range(0..self.modulus)
                };
            }
        }
        rows[reach - 1][reach - 1] = 0;
        self.with_coefficients(CoefficientMatrix::from_square_rows(rows))
    }

    /// Copy with a random white residue set.
    ///
    /// Each residue below `max(modulus, MAX_MODULUS)` is white with probability 1/2. Draws are
    /// repeated until the visible set differs from the current one and both colours appear.
    pub fn with_random_white_residues<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let span = self.modulus.max(MAX_MODULUS);
        let old: BTreeSet<u32> = self.visible_white_residues().collect();
        loop {
            let white: BTreeSet<u32> = (0..span).filter(|_| rng.gen_bool(0.5)).collect();
            let visible = white.range(..self.modulus).count();
            let both_colours = visible > 0 && visible < self.modulus as usize;
            if both_colours && white.range(..self.modulus).ne(old.iter()) {
                tracing::debug!(?white, "drew white residues");
                return self.with_white_residues(white);
            }
        }
    }

    /// Human-readable label, also used as a filename stem.
    ///
    /// Lists the coefficients without the trailing self cell, the modulus, and the visible white
    /// residues: `[[0, 1], [1]], modulus=2, white_residues=[1]`.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push('[');
        for (i, row) in self.coefficients.cursor_rows().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_list(&mut out, row.iter().copied());
        }
        out.push(']');
        let _ = write!(out, ", modulus={}, white_residues=", self.modulus);
        push_list(&mut out, self.visible_white_residues());
        out
    }
}

fn push_list(out: &mut String, items: impl Iterator<Item = u32>) {
    out.push('[');
    for (i, v) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{v}");
    }
    out.push(']');
}

#[cfg(test)]
#[path = "../../tests/unit/model/params.rs"]
mod tests;
