//! Error types for the engraving core
//!
//! Only bootstrap-level failures surface as errors. Per-entry problems
//! (a bad codepoint, a font that fails to load) are logged and absorbed by
//! the component that met them.

use crate::renderers::RenderingCapability;
use crate::symbols::SymbolEncoding;
use thiserror::Error;

/// Failure to read a glyph-name dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not open glyph names file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in glyph names file: {0}")]
    Parse(String),

    #[error("glyph names file {0} is empty")]
    Empty(String),

    #[error("glyph names document is not a JSON object")]
    NotAnObject,
}

/// Failure reported by a font loader for one asset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FontLoadError {
    #[error("font resource not found: {0}")]
    NotFound(String),

    #[error("failed to read font {locator}: {message}")]
    Io { locator: String, message: String },

    #[error("unsupported font resource: {0}")]
    Unsupported(String),

    #[error("malformed font {locator}: {message}")]
    Malformed { locator: String, message: String },
}

/// A font namespace name that is neither text nor music symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown font namespace: {0}")]
pub struct UnknownFontNamespace(pub String);

/// Rendering backend registry failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("no rendering implementation bound for {0}")]
    CapabilityUnbound(RenderingCapability),

    #[error("registry is sealed, refusing to rebind {0}")]
    RegistrySealed(RenderingCapability),
}

/// Failure to read the engraving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Conditions that abort bootstrap
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load {encoding} symbol table: {source}")]
    Dataset {
        encoding: SymbolEncoding,
        #[source]
        source: DatasetError,
    },

    #[error("no rendering implementation registered for {0}")]
    MissingRenderer(RenderingCapability),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engraving is already initialized")]
    AlreadyInitialized,
}
