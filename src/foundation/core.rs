use std::{fmt, str::FromStr};

use crate::foundation::error::{CosmatesqueError, CosmatesqueResult};

/// Validated square matrix of recurrence coefficients.
///
/// Entry `(row, col)` weighs the grid cell `offset - row` rows above and `offset - col` columns
/// left of the cell being computed, so the bottom-right entry is the cell itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct CoefficientMatrix {
    reach: usize,
    values: Vec<u32>, // row-major, reach * reach
}

impl CoefficientMatrix {
    /// Build a matrix from `reach` rows of `reach` entries each.
    pub fn new(rows: Vec<Vec<u32>>) -> CosmatesqueResult<Self> {
        let reach = rows.len();
        if reach == 0 {
            return Err(CosmatesqueError::parameter(
                "coefficient matrix must have at least one row",
            ));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != reach) {
            return Err(CosmatesqueError::parameter(format!(
                "coefficient matrix must be square: row {i} has {} entries, expected {reach}",
                row.len()
            )));
        }
        Ok(Self {
            reach,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a matrix from a fixed-size array, square by construction.
    pub fn from_array<const R: usize>(rows: [[u32; R]; R]) -> Self {
        const { assert!(R > 0, "coefficient matrix must have at least one row") };
        Self {
            reach: R,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub(crate) fn from_square_rows(rows: Vec<Vec<u32>>) -> Self {
        let reach = rows.len();
        debug_assert!(reach > 0 && rows.iter().all(|r| r.len() == reach));
        Self {
            reach,
            values: rows.into_iter().flatten().collect(),
        }
    }

    /// Build a matrix from square-minus-a-corner rows, the shape [`Self::cursor_rows`] returns.
    ///
    /// The omitted bottom-right (self) coefficient is filled with `0`.
    pub fn from_cursor_rows(mut rows: Vec<Vec<u32>>) -> CosmatesqueResult<Self> {
        let reach = rows.len();
        match rows.last_mut() {
            Some(last) if last.len() + 1 == reach => last.push(0),
            Some(last) => {
                return Err(CosmatesqueError::parameter(format!(
                    "last coefficient row must omit the self cell: expected {} entries, found {}",
                    reach - 1,
                    last.len()
                )));
            }
            None => {
                return Err(CosmatesqueError::parameter(
                    "coefficient matrix must have at least one row",
                ));
            }
        }
        Self::new(rows)
    }

    /// Side length of the matrix.
    pub fn reach(&self) -> usize {
        self.reach
    }

    /// Maximum look-back distance in either axis (`reach - 1`).
    pub fn offset(&self) -> usize {
        self.reach - 1
    }

    /// Coefficient at `(row, col)`.
    ///
    /// # Panics
    /// Panics when either index is `>= reach`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.reach && col < self.reach, "coefficient index out of range");
        self.values[row * self.reach + col]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.values.chunks_exact(self.reach)
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Rows with the trailing self coefficient removed from the last row.
    pub fn cursor_rows(&self) -> Vec<Vec<u32>> {
        let mut rows = self.to_rows();
        if let Some(last) = rows.last_mut() {
            last.pop();
        }
        rows
    }

    /// The bottom-right coefficient, which weighs the cell being computed.
    pub fn self_coefficient(&self) -> u32 {
        self.values[self.values.len() - 1]
    }

    /// Copy with every coefficient reduced modulo `modulus`.
    pub fn reduced(&self, modulus: u32) -> CosmatesqueResult<Self> {
        if modulus < 2 {
            return Err(CosmatesqueError::parameter(format!(
                "modulus must be >= 2, got {modulus}"
            )));
        }
        Ok(Self {
            reach: self.reach,
            values: self.values.iter().map(|c| c % modulus).collect(),
        })
    }
}

impl TryFrom<Vec<Vec<u32>>> for CoefficientMatrix {
    type Error = CosmatesqueError;

    fn try_from(rows: Vec<Vec<u32>>) -> CosmatesqueResult<Self> {
        Self::new(rows)
    }
}

impl From<CoefficientMatrix> for Vec<Vec<u32>> {
    fn from(m: CoefficientMatrix) -> Self {
        m.to_rows()
    }
}

/// Text form: rows separated by `;`, entries by `,` (`0,1;1,0`).
///
/// A JSON-style nested list (`[[0, 1], [1, 0]]`) is accepted as well. Either form may omit the
/// self coefficient from the last row.
impl FromStr for CoefficientMatrix {
    type Err = CosmatesqueError;

    fn from_str(s: &str) -> CosmatesqueResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CosmatesqueError::parameter("coefficient text is empty"));
        }
        let rows: Vec<Vec<u32>> = if s.starts_with('[') {
            serde_json::from_str(s).map_err(|e| {
                CosmatesqueError::parameter(format!("invalid coefficient list '{s}': {e}"))
            })?
        } else {
            s.split(';').map(parse_row).collect::<CosmatesqueResult<_>>()?
        };

        let reach = rows.len();
        let body_square = rows[..reach.saturating_sub(1)]
            .iter()
            .all(|r| r.len() == reach);
        match rows.last() {
            Some(last) if body_square && last.len() + 1 == reach => Self::from_cursor_rows(rows),
            _ => Self::new(rows),
        }
    }
}

fn parse_row(row: &str) -> CosmatesqueResult<Vec<u32>> {
    let row = row.trim();
    if row.is_empty() {
        return Ok(Vec::new());
    }
    row.split(',')
        .map(|v| {
            v.trim().parse::<u32>().map_err(|e| {
                CosmatesqueError::parameter(format!("invalid coefficient '{}': {e}", v.trim()))
            })
        })
        .collect()
}

impl fmt::Display for CoefficientMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            for (j, c) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// `size x size` grid of residues in `[0, modulus)`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResidueMatrix {
    size: usize,
    modulus: u32,
    data: Vec<u32>,
}

impl ResidueMatrix {
    pub(crate) fn zeroed(size: usize, modulus: u32) -> Self {
        Self {
            size,
            modulus,
            data: vec![0; size * size],
        }
    }

    /// Wrap externally produced residues, validating shape and range.
    pub fn from_rows(rows: Vec<Vec<u32>>, modulus: u32) -> CosmatesqueResult<Self> {
        if modulus < 2 {
            return Err(CosmatesqueError::parameter(format!(
                "modulus must be >= 2, got {modulus}"
            )));
        }
        let size = rows.len();
        if size == 0 {
            return Err(CosmatesqueError::size("residue matrix must not be empty"));
        }
        if rows.iter().any(|r| r.len() != size) {
            return Err(CosmatesqueError::size("residue matrix must be square"));
        }
        if let Some(v) = rows.iter().flatten().find(|&&v| v >= modulus) {
            return Err(CosmatesqueError::parameter(format!(
                "residue {v} is out of range for modulus {modulus}"
            )));
        }
        Ok(Self {
            size,
            modulus,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Modulus every residue was reduced by.
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Residue at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.size + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, v: u32) {
        self.data[y * self.size + x] = v;
    }

    /// Row `y`, left to right.
    pub fn row(&self, y: usize) -> &[u32] {
        &self.data[y * self.size..(y + 1) * self.size]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks_exact(self.size)
    }

    /// All residues, row-major.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
