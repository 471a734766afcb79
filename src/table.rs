//! Dense sample tables: an evenly spaced grid of x-values with PDF and CDF
//! arrays evaluated from one parameter record.
//!
//! A table is built once per stimulus parameterization and never mutated;
//! queries borrow it read-only. Per-point evaluation failures never abort a
//! build — they are patched with a conservative fallback and recorded as
//! [`Degeneracy`] diagnostics.

use crate::distribution::ContinuousDistribution;
use crate::error::{Error, Result};
use crate::query::Curve;

/// Decimal digits the grid is rounded to, as a scale factor. Removes the
/// floating-point drift of repeated `start + i*step` so identical inputs
/// rebuild bit-identical grids.
const GRID_SCALE: f64 = 1e10;

/// Steps below the grid-rounding resolution would collapse adjacent samples.
const MIN_STEP: f64 = 1e-9;

/// An x-range for table construction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRange {
    /// Lower edge.
    pub min: f64,
    /// Upper edge.
    pub max: f64,
}

impl GridRange {
    /// Creates a range; edges are snapped outward to step multiples at
    /// build time.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for GridRange {
    /// The study's standard display window, `[-5, 5]`.
    fn default() -> Self {
        Self { min: -5.0, max: 5.0 }
    }
}

/// Record of a per-point fallback substitution during a build.
///
/// The point at `index` could not be evaluated (an error, or a non-finite
/// result) and was replaced: `0.0` on the density curve, the previous value
/// on the cumulative curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Degeneracy {
    /// Index of the patched sample.
    pub index: usize,
    /// The x-value at that index.
    pub x: f64,
    /// Which curve the substitution happened on.
    pub curve: Curve,
}

/// An immutable triple of equal-length sample arrays over an evenly spaced,
/// strictly increasing grid.
///
/// # Example
///
/// ```
/// use skewcurve::{GridRange, SampleTable, SkewTParams};
///
/// let params = SkewTParams::new(0.0, 1.0, 5.0, 0.0).unwrap();
/// let table = SampleTable::build(&params, GridRange::default(), 0.1).unwrap();
/// assert_eq!(table.len(), 101);
/// assert_eq!(table.x_vals()[0], -5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleTable {
    x_vals: Vec<f64>,
    pdf_vals: Vec<f64>,
    cdf_vals: Vec<f64>,
    step: f64,
    degeneracies: Vec<Degeneracy>,
}

impl SampleTable {
    /// Builds a table for `dist` over `range` with spacing `step`.
    ///
    /// The grid runs from `floor(range.min/step)·step` through
    /// `ceil(range.max/step)·step` inclusive, each value rounded to 10
    /// decimal digits. Identical `(params, range, step)` inputs always
    /// produce bit-identical tables.
    ///
    /// Stored CDF values are clamped to `[0, 1]` and to be non-decreasing,
    /// so the monotonicity law holds exactly on the table.
    ///
    /// # Errors
    ///
    /// Returns the parameter error from `dist` validation,
    /// [`Error::InvalidRange`] for an empty or non-finite range, or
    /// [`Error::InvalidStep`] for a step that is not finite, not positive,
    /// or below the grid-rounding resolution. Per-point evaluation failures
    /// are not errors; see [`degeneracies`](Self::degeneracies).
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn build<D: ContinuousDistribution>(
        dist: &D,
        range: GridRange,
        step: f64,
    ) -> Result<Self> {
        dist.validate()?;
        if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
            return Err(Error::InvalidRange { min: range.min, max: range.max });
        }
        if !step.is_finite() || step < MIN_STEP {
            return Err(Error::InvalidStep(step));
        }

        let start = (range.min / step).floor() * step;
        let end = (range.max / step).ceil() * step;
        let count = ((end - start) / step).round() as usize + 1;

        let mut x_vals = Vec::with_capacity(count);
        let mut pdf_vals = Vec::with_capacity(count);
        let mut cdf_vals = Vec::with_capacity(count);
        let mut degeneracies = Vec::new();
        let mut prev_cdf = 0.0_f64;

        for index in 0..count {
            let x = round_grid(start + index as f64 * step);
            x_vals.push(x);

            let pdf = match dist.pdf(x) {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    trace_debug!(index, x, "density evaluation failed, substituted 0");
                    degeneracies.push(Degeneracy { index, x, curve: Curve::Density });
                    0.0
                }
            };
            pdf_vals.push(pdf);

            let cdf = match dist.cdf(x) {
                Ok(v) if v.is_finite() => v.clamp(0.0, 1.0).max(prev_cdf),
                _ => {
                    trace_debug!(index, x, "cumulative evaluation failed, held previous value");
                    degeneracies.push(Degeneracy { index, x, curve: Curve::Cumulative });
                    prev_cdf
                }
            };
            cdf_vals.push(cdf);
            prev_cdf = cdf;
        }

        trace_info!(samples = count, patched = degeneracies.len(), "sample table built");
        Ok(Self { x_vals, pdf_vals, cdf_vals, step, degeneracies })
    }

    /// The grid x-values, strictly increasing and evenly spaced.
    #[must_use]
    pub fn x_vals(&self) -> &[f64] {
        &self.x_vals
    }

    /// Density values, aligned with [`x_vals`](Self::x_vals).
    #[must_use]
    pub fn pdf_vals(&self) -> &[f64] {
        &self.pdf_vals
    }

    /// Cumulative values, aligned with [`x_vals`](Self::x_vals);
    /// non-decreasing and within `[0, 1]`.
    #[must_use]
    pub fn cdf_vals(&self) -> &[f64] {
        &self.cdf_vals
    }

    /// The grid spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x_vals.len()
    }

    /// Whether the table holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_vals.is_empty()
    }

    /// Assembles a table from raw arrays, bypassing the builder.
    #[cfg(test)]
    pub(crate) fn from_parts(
        x_vals: Vec<f64>,
        pdf_vals: Vec<f64>,
        cdf_vals: Vec<f64>,
        step: f64,
    ) -> Self {
        Self { x_vals, pdf_vals, cdf_vals, step, degeneracies: Vec::new() }
    }

    /// Per-point fallback substitutions recorded during the build.
    ///
    /// Empty for well-conditioned parameters. A non-empty list means the
    /// table is still fully populated and usable, with a few conservative
    /// artifacts at the listed indices.
    #[must_use]
    pub fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
}

/// Round a grid value to 10 decimal digits.
#[inline]
fn round_grid(v: f64) -> f64 {
    (v * GRID_SCALE).round() / GRID_SCALE
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::distribution::{Distribution, SkewTParams};
    use crate::error::Error;

    fn student_t5() -> Distribution {
        Distribution::SkewT(SkewTParams::new(0.0, 1.0, 5.0, 0.0).unwrap())
    }

    #[test]
    fn grid_snaps_to_step_multiples() {
        let table = SampleTable::build(&student_t5(), GridRange::new(-0.95, 1.02), 0.25).unwrap();
        assert_eq!(table.x_vals()[0], -1.0);
        assert_eq!(*table.x_vals().last().unwrap(), 1.25);
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn grid_values_have_no_drift() {
        let table = SampleTable::build(&student_t5(), GridRange::default(), 0.1).unwrap();
        assert_eq!(table.len(), 101);
        // -5 + 37*0.1 accumulates binary drift without the rounding pass.
        assert_eq!(table.x_vals()[37], -1.3);
        assert_eq!(table.x_vals()[50], 0.0);
        assert_eq!(table.x_vals()[100], 5.0);
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let a = SampleTable::build(&student_t5(), GridRange::default(), 0.1).unwrap();
        let b = SampleTable::build(&student_t5(), GridRange::default(), 0.1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cdf_is_monotone_and_bounded() {
        let dist = Distribution::SkewT(SkewTParams::new(0.5, 1.2, 4.0, 2.0).unwrap());
        let table = SampleTable::build(&dist, GridRange::default(), 0.1).unwrap();
        for pair in table.cdf_vals().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(table.cdf_vals().iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn well_conditioned_build_has_no_degeneracies() {
        let table = SampleTable::build(&student_t5(), GridRange::default(), 0.1).unwrap();
        assert!(table.degeneracies().is_empty());
    }

    #[test]
    fn per_point_failures_are_patched_not_fatal() {
        // A distribution that fails on part of its support: the build must
        // complete with fallbacks recorded, not abort.
        struct Flaky;
        impl ContinuousDistribution for Flaky {
            fn validate(&self) -> crate::Result<()> {
                Ok(())
            }
            fn pdf(&self, x: f64) -> crate::Result<f64> {
                if x > 0.0 {
                    Ok(f64::NAN)
                } else {
                    Ok(0.1)
                }
            }
            fn cdf(&self, x: f64) -> crate::Result<f64> {
                if x > 0.0 {
                    Err(Error::ConvergenceFailure { function: "inc_beta" })
                } else {
                    Ok(0.2)
                }
            }
        }

        let table = SampleTable::build(&Flaky, GridRange::new(-1.0, 1.0), 0.5).unwrap();
        assert_eq!(table.len(), 5);
        // x > 0 densities patched to 0, cumulatives held at the last good value.
        assert_eq!(table.pdf_vals(), [0.1, 0.1, 0.1, 0.0, 0.0].as_slice());
        assert_eq!(table.cdf_vals(), [0.2, 0.2, 0.2, 0.2, 0.2].as_slice());
        assert_eq!(table.degeneracies().len(), 4);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let dist = student_t5();
        assert!(matches!(
            SampleTable::build(&dist, GridRange::new(2.0, -2.0), 0.1),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            SampleTable::build(&dist, GridRange::default(), 0.0),
            Err(Error::InvalidStep(_))
        ));
        assert!(matches!(
            SampleTable::build(&dist, GridRange::default(), f64::NAN),
            Err(Error::InvalidStep(_))
        ));

        let bad = Distribution::SkewT(SkewTParams { xi: 0.0, omega: -1.0, nu: 5.0, alpha: 0.0 });
        assert!(SampleTable::build(&bad, GridRange::default(), 0.1).is_err());
    }
}
