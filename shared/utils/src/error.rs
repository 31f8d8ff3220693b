use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BomError {
    #[error("API request error: {message}")]
    Transport { message: String },

    #[error("convert error: {message}")]
    Decode { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Input descriptor error: {message}")]
    InputDescriptor { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BomError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn input_descriptor(message: impl Into<String>) -> Self {
        Self::InputDescriptor {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::InputDescriptor { .. } => "INPUT_DESCRIPTOR_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Prefixes a decode or transport message with the entity it concerns.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            BomError::Transport { message } => {
                BomError::transport(format!("{}: {}", context, message))
            }
            BomError::Decode { message } => BomError::decode(format!("{}: {}", context, message)),
            other => other,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

pub type BomResult<T> = Result<T, BomError>;

// Conversion from common error types
impl From<reqwest::Error> for BomError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error.to_string())
    }
}

impl From<serde_json::Error> for BomError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}

impl From<config::ConfigError> for BomError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

impl From<validator::ValidationErrors> for BomError {
    fn from(error: validator::ValidationErrors) -> Self {
        Self::configuration(error.to_string())
    }
}
