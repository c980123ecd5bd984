//! Error types for fes20
//!
//! This module defines all error types used throughout the library.
//! Configuration errors (unknown classifier or feature ids, a frozen registry)
//! signal drift between the registry and the model classes and are never
//! expected at runtime in a correct build. Data errors (malformed literals,
//! failed facets) are recoverable and carry the offending value.

use std::fmt;
use thiserror::Error;

use crate::registry::{ClassifierId, FeatureId};

/// Result type alias using fes20 Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fes20 operations
#[derive(Error, Debug)]
pub enum Error {
    /// Registry build or mutation error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Classifier id or name that is not part of the package, or not instantiable
    #[error("{0}")]
    UnknownClassifier(String),

    /// Feature id not owned by the class or any of its supertypes
    #[error("unknown feature {feature} for class '{class}' (classifier {classifier})")]
    UnknownFeature {
        /// Class name
        class: String,
        /// Classifier id of the class
        classifier: ClassifierId,
        /// Offending feature id
        feature: FeatureId,
    },

    /// Attempt to write a derived, read-only feature
    #[error("feature '{feature}' of class '{class}' is not changeable")]
    NotChangeable {
        /// Class name
        class: String,
        /// Feature name
        feature: String,
    },

    /// Value of the wrong kind for a feature or datatype
    #[error("type error: {0}")]
    Type(String),

    /// Value error (invalid literal for a datatype)
    #[error("value error: {0}")]
    Value(String),

    /// Facet or multiplicity violation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Encoding error (model to XML)
    #[error("encoding error: {0}")]
    Encode(String),

    /// Decoding error (XML to model)
    #[error("decoding error: {0}")]
    Decode(String),

    /// XML well-formedness error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Unknown feature id for a class
    pub fn unknown_feature(class: impl Into<String>, classifier: ClassifierId, feature: FeatureId) -> Self {
        Error::UnknownFeature {
            class: class.into(),
            classifier,
            feature,
        }
    }

    /// Write attempt on a read-only feature
    pub fn not_changeable(class: impl Into<String>, feature: impl Into<String>) -> Self {
        Error::NotChangeable {
            class: class.into(),
            feature: feature.into(),
        }
    }

    /// True for errors that indicate registry/model drift rather than bad data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::UnknownClassifier(_) | Error::UnknownFeature { .. }
        )
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Validation error with context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the object or value that failed validation
    pub path: Option<String>,
    /// Class, feature or datatype that caused the error
    pub component: Option<String>,
    /// Underlying reason, usually the last failure of a union member
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            component: None,
            reason: None,
        }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        if let Some(ref component) = self.component {
            write!(f, "\n\nComponent: {}", component)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}
