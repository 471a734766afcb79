#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Distribution computation and curve-query engine for perceptual-study
//! stimuli. It evaluates the skew-t and skew generalized-t families, builds
//! dense sample tables from them, and answers the point-location queries
//! (nearest sample, interpolation, hit-testing, tangent slope) that score
//! user interactions against the true curve.
//!
//! # Getting Started
//!
//! ```
//! use skewcurve::{Curve, CurveQuery, GridRange, SampleTable, SkewTParams};
//!
//! // One stimulus parameterization -> one immutable table.
//! let params = SkewTParams::new(0.0, 1.0, 5.0, 2.0).unwrap();
//! let table = SampleTable::build(&params, GridRange::default(), 0.1).unwrap();
//!
//! // Repeated interactive queries borrow the table read-only.
//! let query = CurveQuery::new(&table).unwrap();
//! let point = query.nearest(1.23, Curve::Cumulative);
//! assert!((0.0..=1.0).contains(&point.y));
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`SkewTParams`] / [`SkewGtParams`] | Validated parameter records for the two distribution families. |
//! | [`Distribution`] | Tagged enum carrying either family through the table builder. |
//! | [`SampleTable`] | Immutable grid of x-values with PDF/CDF arrays; rebuilt whenever parameters change. |
//! | [`CurveQuery`] | Read-only point-location queries: nearest, interpolate, hit-test, tangent. |
//! | [`StimulusSampler`] | Seeded random parameter source with edge-density rejection, layered on top of the engine. |
//! | [`special`] | Log-gamma, beta, and regularized incomplete beta primitives. |
//!
//! # Error Policy
//!
//! Invalid parameters abort the affected call with a specific [`Error`]
//! variant — a failed build never yields a partially valid table. Per-point
//! evaluation failures *inside* a build are patched with conservative
//! fallbacks and surfaced as [`Degeneracy`] diagnostics instead, so a
//! stimulus stays usable with at most a few near-zero artifacts.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on parameter records, tables, and query results | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for per-point fallbacks and stimulus rejections | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod distribution;
mod error;
mod query;
pub mod special;
mod stimulus;
mod table;

pub use distribution::{ContinuousDistribution, Distribution, SkewGtParams, SkewTParams};
pub use error::{Error, Result};
pub use query::{
    Curve, CurvePoint, CurveQuery, PixelMapping, PixelPoint, QueryPoint, TangentLine,
    COMMIT_THRESHOLD_PX, HOVER_THRESHOLD_PX,
};
pub use stimulus::StimulusSampler;
pub use table::{Degeneracy, GridRange, SampleTable};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use skewcurve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distribution::{
        ContinuousDistribution, Distribution, SkewGtParams, SkewTParams,
    };
    pub use crate::error::{Error, Result};
    pub use crate::query::{
        Curve, CurvePoint, CurveQuery, PixelMapping, PixelPoint, QueryPoint, TangentLine,
        COMMIT_THRESHOLD_PX, HOVER_THRESHOLD_PX,
    };
    pub use crate::stimulus::StimulusSampler;
    pub use crate::table::{Degeneracy, GridRange, SampleTable};
}
