use rastertiles_datatypes::spatial_reference::SpatialReference;
use snafu::Snafu;
use strum::IntoStaticStr;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu, IntoStaticStr)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataTypeError: {}", source))]
    DataType {
        source: rastertiles_datatypes::error::Error,
    },

    #[snafu(display("OperatorError: {}", source))]
    Operator {
        source: rastertiles_operators::error::Error,
    },

    #[snafu(display("PostgresError: {}", source))]
    TokioPostgres {
        source: tokio_postgres::Error,
    },

    #[snafu(display("IoError: {}", source))]
    Io {
        source: std::io::Error,
    },

    #[snafu(display("ConfigError: {}", source))]
    Config {
        source: config::ConfigError,
    },

    MissingWorkingDirectory {
        source: std::io::Error,
    },

    MissingSettingsDirectory,

    ConnectionLockFailed,

    #[snafu(display("\"{}\" is not a valid database port", port))]
    InvalidDatabasePort {
        port: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("Cannot parse the geometry \"{}\": {}", wkt, reason))]
    Wkt {
        wkt: String,
        reason: String,
    },

    #[snafu(display("Expected a (multi) polygon geometry, got \"{}\"", wkt))]
    UnexpectedGeometryType {
        wkt: String,
    },

    #[snafu(display(
        "SpatialReferenceMismatch: Found {}, expected: {}",
        found,
        expected
    ))]
    SpatialReferenceMismatch {
        found: SpatialReference,
        expected: SpatialReference,
    },

    #[snafu(display("Invalid log spec \"{}\": {}", log_spec, source))]
    InvalidLogSpec {
        log_spec: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("Logging is already initialized: {}", source))]
    LoggingAlreadyInitialized {
        source: tracing_subscriber::util::TryInitError,
    },
}

impl From<rastertiles_datatypes::error::Error> for Error {
    fn from(e: rastertiles_datatypes::error::Error) -> Self {
        Self::DataType { source: e }
    }
}

impl From<rastertiles_operators::error::Error> for Error {
    fn from(e: rastertiles_operators::error::Error) -> Self {
        Self::Operator { source: e }
    }
}

impl From<tokio_postgres::Error> for Error {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::TokioPostgres { source: e }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config { source: e }
    }
}
