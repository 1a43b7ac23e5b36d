use crate::{
    foundation::core::ResidueMatrix,
    foundation::error::{CosmatesqueError, CosmatesqueResult},
    model::params::FractalParameters,
};

/// Stateless evaluator of the modular linear recurrence over a square grid.
///
/// Cells are visited column by column (`x` outer, `y` inner). Each cell other than the origin
/// becomes
///
/// ```text
/// residues[y][x] = sum(coefficients[yi][xi] * residues[y - offset + yi][x - offset + xi]) mod m
/// ```
///
/// over the part of the `reach x reach` window that lies inside the grid. The origin is seeded
/// with `1` and every other cell starts at `0`.
///
/// The bottom-right coefficient addresses the cell being written. It reads the cell before the
/// write, which is always `0`, so that coefficient never changes the result.
pub struct RecurrenceField;

impl RecurrenceField {
    /// Evaluate `params` over a `size x size` grid.
    ///
    /// Fails with [`CosmatesqueError::Size`] when `size == 0` and with
    /// [`CosmatesqueError::Parameter`] when `params` is invalid.
    #[tracing::instrument(skip(params), fields(reach = params.reach(), modulus = params.modulus()))]
    pub fn compute(params: &FractalParameters, size: usize) -> CosmatesqueResult<ResidueMatrix> {
        params.validate()?;
        check_size(size)?;

        let coefficients = params.coefficients();
        let modulus = u64::from(params.modulus());
        if u64::from(coefficients.self_coefficient()) % modulus != 0 {
            tracing::debug!(
                self_coefficient = coefficients.self_coefficient(),
                "self coefficient reads the unwritten cell and has no effect"
            );
        }

        let reach = coefficients.reach();
        let offset = coefficients.offset();
        // Reducing each coefficient first keeps every product below 2^64.
        let weights: Vec<u64> = coefficients
            .rows()
            .flatten()
            .map(|&c| u64::from(c) % modulus)
            .collect();

        let mut residues = ResidueMatrix::zeroed(size, params.modulus());
        residues.set(0, 0, 1);

        for x in 0..size {
            for y in 0..size {
                if x + y == 0 {
                    continue;
                }
                let mut sum = 0u64;
                for yi in offset.saturating_sub(y)..reach {
                    let ry = y + yi - offset;
                    for xi in offset.saturating_sub(x)..reach {
                        let w = weights[yi * reach + xi];
                        if w == 0 {
                            continue;
                        }
                        let rx = x + xi - offset;
                        sum = (sum + w * u64::from(residues.get(rx, ry))) % modulus;
                    }
                }
                residues.set(x, y, sum as u32);
            }
        }

        Ok(residues)
    }
}

/// Evaluate `params` over a `size x size` grid. See [`RecurrenceField::compute`].
pub fn evaluate(params: &FractalParameters, size: usize) -> CosmatesqueResult<ResidueMatrix> {
    RecurrenceField::compute(params, size)
}

pub(crate) fn check_size(size: usize) -> CosmatesqueResult<()> {
    if size == 0 {
        return Err(CosmatesqueError::size("size must be >= 1"));
    }
    if size.checked_mul(size).is_none() {
        return Err(CosmatesqueError::size(format!(
            "size {size} is too large to address"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/field.rs"]
mod tests;
