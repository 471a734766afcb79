//! Point-location queries against a sample table.
//!
//! All operations are pure reads over an immutable [`SampleTable`]; the
//! mutable interaction state (cursor position, selected point) belongs to
//! the UI collaborator. Pixel-space arguments are converted through an
//! explicit [`PixelMapping`] supplied by the caller.

use crate::error::{Error, Result};
use crate::table::SampleTable;

/// Pixel threshold for commit/click hit-testing.
pub const COMMIT_THRESHOLD_PX: f64 = 5.0;

/// Pixel threshold for hover-proximity hit-testing.
///
/// Deliberately distinct from [`COMMIT_THRESHOLD_PX`]; the two interactions
/// use different tolerances and [`CurveQuery::hit_test`] takes the threshold
/// as a parameter rather than folding them into one constant.
pub const HOVER_THRESHOLD_PX: f64 = 10.0;

/// Which curve of the table a query reads, matching the caller's display
/// mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// The probability density curve.
    Density,
    /// The cumulative distribution curve.
    Cumulative,
}

/// A resolved location on a curve, in data space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPoint {
    /// The x-value of the resolved sample.
    pub x: f64,
    /// The y-value on the selected curve.
    pub y: f64,
}

/// An interpolated point carrying both curve values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// The query x (clamped to the table range).
    pub x: f64,
    /// Interpolated density.
    pub pdf: f64,
    /// Interpolated cumulative probability.
    pub cdf: f64,
}

/// Local linear approximation of the cumulative curve at a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TangentLine {
    /// The sample the tangent is anchored at, on the cumulative curve.
    pub point: QueryPoint,
    /// Central-difference slope at that sample.
    pub slope: f64,
}

/// A point in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

/// Affine transform between data space and pixel space.
///
/// `y_scale` is typically negative because screen y grows downward while
/// curve values grow upward.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelMapping {
    /// Pixel x of data x = 0.
    pub x_offset: f64,
    /// Pixels per data unit along x; must be nonzero.
    pub x_scale: f64,
    /// Pixel y of curve value 0.
    pub y_offset: f64,
    /// Pixels per curve unit along y.
    pub y_scale: f64,
}

impl PixelMapping {
    /// Maps a pixel x back to data space.
    #[must_use]
    pub fn data_x(&self, px: f64) -> f64 {
        (px - self.x_offset) / self.x_scale
    }

    /// Maps a data x to pixel space.
    #[must_use]
    pub fn pixel_x(&self, x: f64) -> f64 {
        self.x_offset + x * self.x_scale
    }

    /// Maps a curve value to pixel space.
    #[must_use]
    pub fn pixel_y(&self, y: f64) -> f64 {
        self.y_offset + y * self.y_scale
    }
}

/// Read-only query engine over a borrowed sample table.
///
/// # Example
///
/// ```
/// use skewcurve::{Curve, CurveQuery, GridRange, SampleTable, SkewTParams};
///
/// let params = SkewTParams::new(0.0, 1.0, 5.0, 0.0).unwrap();
/// let table = SampleTable::build(&params, GridRange::default(), 0.1).unwrap();
/// let query = CurveQuery::new(&table).unwrap();
///
/// // Snap to the closest grid sample.
/// let point = query.nearest(0.04, Curve::Density);
/// assert_eq!(point.x, 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CurveQuery<'a> {
    table: &'a SampleTable,
}

impl<'a> CurveQuery<'a> {
    /// Wraps a table for querying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewSamples`] for tables with fewer than two
    /// samples, where bracketing is undefined.
    pub fn new(table: &'a SampleTable) -> Result<Self> {
        if table.len() < 2 {
            return Err(Error::TooFewSamples(table.len()));
        }
        Ok(Self { table })
    }

    /// Index of the grid sample closest to `x`.
    ///
    /// Ties at the exact midpoint of an interval resolve to the lower
    /// index; out-of-range queries clamp to the edge sample.
    #[must_use]
    pub fn nearest_index(&self, x: f64) -> usize {
        let xs = self.table.x_vals();
        let (lo, hi) = self.bracket(x);
        if lo == hi || x - xs[lo] <= xs[hi] - x {
            lo
        } else {
            hi
        }
    }

    /// Snaps `x` to the closest sample on the selected curve.
    #[must_use]
    pub fn nearest(&self, x: f64, curve: Curve) -> QueryPoint {
        let i = self.nearest_index(x);
        QueryPoint { x: self.table.x_vals()[i], y: self.y_at(curve, i) }
    }

    /// Linear interpolation of both curves at `x`.
    ///
    /// Exact at grid samples; out-of-range queries clamp to the edge
    /// sample.
    #[must_use]
    #[allow(clippy::float_cmp)] // grid hits must return the stored sample exactly
    pub fn interpolate(&self, x: f64) -> CurvePoint {
        let xs = self.table.x_vals();
        let (lo, hi) = self.bracket(x);
        if lo == hi || x == xs[hi] {
            let i = if lo == hi { lo } else { hi };
            return CurvePoint {
                x: xs[i],
                pdf: self.table.pdf_vals()[i],
                cdf: self.table.cdf_vals()[i],
            };
        }
        let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
        let pdfs = self.table.pdf_vals();
        let cdfs = self.table.cdf_vals();
        CurvePoint {
            x,
            pdf: pdfs[lo] + t * (pdfs[hi] - pdfs[lo]),
            cdf: cdfs[lo] + t * (cdfs[hi] - cdfs[lo]),
        }
    }

    /// Pixel-distance hit test against the selected curve.
    ///
    /// Maps the pixel x to data space, snaps to the nearest sample, maps
    /// that sample's curve value back to pixel space, and reports a hit iff
    /// the vertical pixel distance is within `threshold_px`.
    #[must_use]
    pub fn hit_test(
        &self,
        pixel: PixelPoint,
        mapping: &PixelMapping,
        curve: Curve,
        threshold_px: f64,
    ) -> bool {
        let x = mapping.data_x(pixel.x);
        let i = self.nearest_index(x);
        let curve_py = mapping.pixel_y(self.y_at(curve, i));
        (pixel.y - curve_py).abs() <= threshold_px
    }

    /// Tangent of the cumulative curve at the sample nearest to `x`.
    ///
    /// The slope is the central difference
    /// `(cdf[i+1] − cdf[i−1]) / (x[i+1] − x[i−1])`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Boundary`] when the nearest sample is the first or
    /// last grid point, where no symmetric neighbor exists.
    pub fn tangent(&self, x: f64) -> Result<TangentLine> {
        let i = self.nearest_index(x);
        let len = self.table.len();
        if i == 0 || i + 1 == len {
            return Err(Error::Boundary { index: i, len });
        }
        let xs = self.table.x_vals();
        let cdfs = self.table.cdf_vals();
        let slope = (cdfs[i + 1] - cdfs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        Ok(TangentLine { point: QueryPoint { x: xs[i], y: cdfs[i] }, slope })
    }

    /// Bracketing sample indices for `x`; equal indices mean the query
    /// clamped to an edge.
    fn bracket(&self, x: f64) -> (usize, usize) {
        let xs = self.table.x_vals();
        let hi = xs.partition_point(|&v| v < x);
        if hi == 0 {
            (0, 0)
        } else if hi == xs.len() {
            (xs.len() - 1, xs.len() - 1)
        } else {
            (hi - 1, hi)
        }
    }

    fn y_at(&self, curve: Curve, i: usize) -> f64 {
        match curve {
            Curve::Density => self.table.pdf_vals()[i],
            Curve::Cumulative => self.table.cdf_vals()[i],
        }
    }
}
