//! Error types for the servo nomenclature library.

use crate::catalogue::Platform;

/// Errors that can occur while loading catalogues, decoding part numbers or
/// driving a selection session.
///
/// Encoding and describing never fail; unresolved segment codes degrade to a
/// descriptive fallback string instead of an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A platform catalogue could not be fetched or parsed.
    #[error("Catalogue for {platform} is unavailable: {message}")]
    DataUnavailable {
        /// Platform whose catalogue failed to load
        platform: Platform,
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The decode input does not start with any known series code.
    #[error(
        "Unrecognized motor series in '{input}'. Enter a valid {} code",
        .expected.join(" or ")
    )]
    UnrecognizedSeries {
        /// Normalized input that failed to match
        input: String,
        /// Valid series codes, one entry per platform, e.g. `Sigma-X (SGMXA, SGMXJ)`
        expected: Vec<String>,
    },

    /// The decode input was blank.
    #[error("Enter a motor part number to decode")]
    EmptyInput,

    /// The series is not part of the active platform's catalogue.
    #[error("Series '{series}' is not part of the {platform} catalogue")]
    UnknownSeries {
        /// Platform that was searched
        platform: Platform,
        /// Requested series name
        series: String,
    },

    /// The template is not declared by the series.
    #[error("Series '{series}' has no '{template}' template")]
    UnknownTemplate {
        /// Series that was searched
        series: String,
        /// Requested template name
        template: String,
    },

    /// A template was chosen before any series.
    #[error("Select a motor series first")]
    NoSeriesSelected,

    /// Platform identifier could not be parsed.
    #[error("Unknown platform '{0}' (expected 'sigma-x' or 'sigma-7')")]
    UnknownPlatform(String),

    /// Template key is not one of the known template names.
    #[error("Unknown template name '{0}'")]
    UnknownTemplateName(String),
}

/// Convenience `Result` type alias for nomenclature operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether the session can continue after this error.
    ///
    /// A catalogue that failed to load blocks the session until loading is
    /// retried; every other error is reported inline and leaves the session
    /// untouched.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::DataUnavailable { .. } => false,
            Error::UnrecognizedSeries { .. } => true,
            Error::EmptyInput => true,
            Error::UnknownSeries { .. } => true,
            Error::UnknownTemplate { .. } => true,
            Error::NoSeriesSelected => true,
            Error::UnknownPlatform(_) => true,
            Error::UnknownTemplateName(_) => true,
        }
    }

    /// Creates a new data-unavailable error with a message.
    pub fn data_unavailable<S: Into<String>>(platform: Platform, message: S) -> Self {
        Error::DataUnavailable {
            platform,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data-unavailable error with a message and source error.
    pub fn data_unavailable_with_source<S, E>(platform: Platform, message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::DataUnavailable {
            platform,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
