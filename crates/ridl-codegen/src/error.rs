//! Error types for constant evaluation and emission.
//!
//! Every variant aborts the current evaluation immediately; nothing emitted
//! before the failure is valid. Whether compilation continues with other
//! declarations is the calling driver's decision.

use ridl_schema::Loc;
use thiserror::Error;

/// Errors raised while evaluating a constant against its declared type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmitError {
    /// The literal's kind does not match the declared type's accepted shapes
    #[error("invalid {expected} constant {literal} at {loc}")]
    InvalidLiteral {
        /// Keyword of the declared type (`bool`, `i32`, `list`, ...)
        expected: String,
        /// The offending literal, rendered as written
        literal: String,
        /// Location of the literal
        loc: Loc,
    },

    /// An identifier matched neither an enum member nor a compatible constant
    #[error("unresolved reference '{name}' of type {expected} at {loc}")]
    UnresolvedReference {
        /// The identifier as written, qualifier included
        name: String,
        /// The declared type the reference must satisfy
        expected: String,
        /// Location of the identifier
        loc: Loc,
    },

    /// An id or name does not denote any member of the target enum
    #[error("no member of enum {enum_name} with value {value} at {loc}")]
    UnresolvedEnumMember {
        /// Name of the target enum
        enum_name: String,
        /// The offending id or name, rendered as written
        value: String,
        /// Location of the literal
        loc: Loc,
    },

    /// A construct this emitter knowingly does not implement
    #[error("{construct} are not supported (at {loc})")]
    Unsupported {
        /// What was attempted (`binary literals`, `struct-valued constants`)
        construct: String,
        /// Location of the offending value
        loc: Loc,
    },

    /// A defect in upstream validation or schema construction, not bad input
    #[error("internal invariant violated: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

impl EmitError {
    /// The source location this error points at, when one exists.
    ///
    /// `Internal` violations are caller bugs and carry no user location.
    pub fn loc(&self) -> Option<&Loc> {
        match self {
            EmitError::InvalidLiteral { loc, .. } => Some(loc),
            EmitError::UnresolvedReference { loc, .. } => Some(loc),
            EmitError::UnresolvedEnumMember { loc, .. } => Some(loc),
            EmitError::Unsupported { loc, .. } => Some(loc),
            EmitError::Internal { .. } => None,
        }
    }
}
