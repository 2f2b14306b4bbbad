//! Error types for design synchronization

use thiserror::Error;

use crate::error::ParseError;

use super::listener::ListenerError;
use super::registry::ClassError;

/// Errors raised while reading or writing a design
///
/// All of them abort the current read or write.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The template markup itself could not be parsed
    #[error("template parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// A package-mapping meta tag whose content is not `prefix:package`
    #[error("the meta tag '{markup}' cannot be parsed")]
    MalformedPackageMapping { markup: String },

    /// A tag name with no prefix separator
    #[error("the tag name '{tag}' is invalid: missing prefix")]
    MissingPrefix { tag: String },

    /// A tag whose prefix is not mapped to any package
    #[error("unknown tag: {tag}")]
    UnknownTag { tag: String },

    /// A tag name ending in a hyphen, in strict mode
    #[error("the tag name '{tag}' should not end with '-'")]
    MalformedTag { tag: String },

    /// A global id claimed by a second component
    #[error("the following global id is not unique: {id}")]
    DuplicateId { id: String },

    /// The tag could not be turned into a component instance
    #[error("no component class could be found for {tag}")]
    NoComponentClass {
        tag: String,
        #[source]
        source: ClassError,
    },

    /// An attribute value the component cannot accept
    #[error("invalid value '{value}' for attribute '{attribute}' of <{tag}>: {reason}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        value: String,
        reason: String,
    },

    /// The body holds more than one root component
    #[error("a design may contain at most one root component, found {count}")]
    MultipleRoots { count: usize },

    /// A component creation listener failed
    #[error("component creation listener failed: {0}")]
    Listener(#[source] ListenerError),
}

impl From<Vec<ParseError>> for DesignError {
    fn from(errors: Vec<ParseError>) -> Self {
        DesignError::Parse(errors)
    }
}

impl DesignError {
    /// Create an invalid attribute error
    pub fn invalid_attribute(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
