use thiserror::Error;

#[derive(Error, Debug)]
pub enum FhirTypesError {
    #[error("Malformed schema {descriptor}: profile base chain is cyclic ({})", .cycle.join(" -> "))]
    MalformedSchema {
        descriptor: String,
        cycle: Vec<String>,
    },

    #[error("Ambiguous profile base for {descriptor}: {first} and {second}")]
    AmbiguousProfileBase {
        descriptor: String,
        first: String,
        second: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Initialization order error: {message}")]
    InitializationOrder { message: String },

    #[error("Initialization error: {message}")]
    Initialization { message: String },

    #[error("Registry error: {message}")]
    Registry { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, FhirTypesError>;

impl FhirTypesError {
    pub fn malformed_schema(descriptor: impl Into<String>, cycle: Vec<String>) -> Self {
        Self::MalformedSchema {
            descriptor: descriptor.into(),
            cycle,
        }
    }

    pub fn ambiguous_profile_base(
        descriptor: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::AmbiguousProfileBase {
            descriptor: descriptor.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn initialization_order(message: impl Into<String>) -> Self {
        Self::InitializationOrder {
            message: message.into(),
        }
    }

    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// True for errors caused by the schema itself rather than by how the
    /// classifier was set up.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedSchema { .. } | Self::AmbiguousProfileBase { .. }
        )
    }
}
