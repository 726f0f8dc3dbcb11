use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EffectError {
    #[error("no element matches `{selector}`")]
    MissingElement { selector: String },

    #[error("{context}: {message}")]
    Js { context: &'static str, message: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EffectError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    pub fn js(context: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            context,
            message: message.into(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::MissingElement { .. } => "missing_element",
            Self::Js { .. } => "js_error",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

pub type Result<T> = std::result::Result<T, EffectError>;
