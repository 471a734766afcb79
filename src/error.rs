#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a distribution parameter is NaN or infinite.
    #[error("invalid parameter '{name}': {value} is not finite")]
    NonFiniteParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a parameter that must be strictly positive is not.
    #[error("invalid parameter '{name}': {value} must be > 0")]
    NonPositiveParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when the skewness parameter lambda is outside `[-1, 1]`.
    #[error("invalid skewness: lambda ({0}) must be in [-1, 1]")]
    SkewOutOfRange(f64),

    /// Returned when `p * q <= 2`, where the variance-normalizing factor of
    /// the skew generalized-t family is undefined.
    #[error("tail parameters too heavy: p ({p}) * q ({q}) must exceed 2")]
    TailTooHeavy {
        /// The kurtosis/shape parameter.
        p: f64,
        /// The tail-weight parameter.
        q: f64,
    },

    /// Returned when a grid range is empty, inverted, or non-finite.
    #[error("invalid range: [{min}, {max}] must be finite with min < max")]
    InvalidRange {
        /// The lower edge of the range.
        min: f64,
        /// The upper edge of the range.
        max: f64,
    },

    /// Returned when a grid step is not a finite positive number.
    #[error("invalid step: {0} must be finite and positive")]
    InvalidStep(f64),

    /// Returned when a special-function argument is outside its domain.
    #[error("domain error: {function}({value}) is undefined")]
    Domain {
        /// The special function that rejected the argument.
        function: &'static str,
        /// The out-of-domain argument.
        value: f64,
    },

    /// Returned when a continued-fraction expansion fails to converge
    /// within the iteration limit.
    #[error("{function} did not converge within the iteration limit")]
    ConvergenceFailure {
        /// The special function whose expansion stalled.
        function: &'static str,
    },

    /// Returned when a query operation is undefined at a table edge,
    /// e.g. a tangent at the first or last sample.
    #[error("boundary: index {index} of {len} has no symmetric neighbors")]
    Boundary {
        /// The sample index the query resolved to.
        index: usize,
        /// The number of samples in the table.
        len: usize,
    },

    /// Returned when a table has too few samples to answer queries.
    #[error("table has {0} samples, need at least 2")]
    TooFewSamples(usize),

    /// Returned when rejection sampling gives up after the attempt limit.
    #[error("no acceptable parameters after {attempts} attempts")]
    SamplingExhausted {
        /// The number of candidates drawn before giving up.
        attempts: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
