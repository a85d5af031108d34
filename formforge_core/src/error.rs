use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormforgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lex error in {unit} at offset {offset}: {message}")]
    Lex {
        unit: String,
        offset: usize,
        message: String,
    },

    #[error("Parse error in {unit}: {message}")]
    Parse { unit: String, message: String },

    #[error("Type not found in environment: {type_name}")]
    MissingType { type_name: String },

    #[error("Required API {api} is not supported by level {level}")]
    MissingApi { api: String, level: String },

    #[error("Invalid API version literal: {0}")]
    InvalidVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Nls file error in {file}: {message}")]
    Nls { file: PathBuf, message: String },

    #[error("Generation error for {type_name}: {message}")]
    Generate { type_name: String, message: String },

    #[error("Wellform error: {0}")]
    Wellform(String),

    #[error("Not a DTO model type: {type_name}")]
    NotAModelType { type_name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

pub type Result<T> = std::result::Result<T, FormforgeError>;

impl FormforgeError {
    pub fn lex(unit: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        FormforgeError::Lex {
            unit: unit.into(),
            offset,
            message: message.into(),
        }
    }

    pub fn parse(unit: impl Into<String>, message: impl Into<String>) -> Self {
        FormforgeError::Parse {
            unit: unit.into(),
            message: message.into(),
        }
    }

    pub fn missing_type(type_name: impl Into<String>) -> Self {
        FormforgeError::MissingType {
            type_name: type_name.into(),
        }
    }

    pub fn missing_api(api: impl Into<String>, level: impl Into<String>) -> Self {
        FormforgeError::MissingApi {
            api: api.into(),
            level: level.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        FormforgeError::Config(message.into())
    }

    pub fn nls(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FormforgeError::Nls {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn generate(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        FormforgeError::Generate {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn wellform(message: impl Into<String>) -> Self {
        FormforgeError::Wellform(message.into())
    }

    pub fn not_a_model_type(type_name: impl Into<String>) -> Self {
        FormforgeError::NotAModelType {
            type_name: type_name.into(),
        }
    }
}
