//! Parsed constant-value literals.
//!
//! A [`ConstValue`] is the unevaluated right-hand side of a `const`
//! declaration or a field default, exactly as the parser produced it.
//! Evaluation against a declared type happens later, in the codegen crate;
//! nothing here knows what the literal is supposed to mean.

use std::fmt;

use crate::loc::Loc;

/// The shape of a constant literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValueKind {
    /// Integer literal: `42`
    Int(i64),
    /// Floating-point literal: `3.14`
    Double(f64),
    /// String literal: `"hello"`
    Str(String),
    /// Bare identifier: `true`, `Color.GREEN`, `other.MAX_SIZE`
    Ident(String),
    /// List literal: `[1, 2, 3]` (also used for set values)
    List(Vec<ConstValue>),
    /// Map literal: `{"a": 1}`, entries in source order
    Map(Vec<(ConstValue, ConstValue)>),
}

/// A parsed constant value with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstValue {
    /// What kind of literal this is, and its payload
    pub kind: ConstValueKind,
    /// Where the literal appears in source
    pub loc: Loc,
}

impl ConstValue {
    /// Create a new constant value
    pub fn new(kind: ConstValueKind, loc: Loc) -> Self {
        Self { kind, loc }
    }

    /// Check if this is an integer literal
    pub fn is_int(&self) -> bool {
        matches!(self.kind, ConstValueKind::Int(_))
    }

    /// Check if this is a floating-point literal
    pub fn is_double(&self) -> bool {
        matches!(self.kind, ConstValueKind::Double(_))
    }

    /// Check if this is a string literal
    pub fn is_str(&self) -> bool {
        matches!(self.kind, ConstValueKind::Str(_))
    }

    /// Check if this is a bare identifier
    pub fn is_ident(&self) -> bool {
        matches!(self.kind, ConstValueKind::Ident(_))
    }

    /// Check if this is a list literal
    pub fn is_list(&self) -> bool {
        matches!(self.kind, ConstValueKind::List(_))
    }

    /// Check if this is a map literal
    pub fn is_map(&self) -> bool {
        matches!(self.kind, ConstValueKind::Map(_))
    }

    /// Get the integer payload, if any
    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            ConstValueKind::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Get this literal as a double, widening an integer payload
    pub fn as_double(&self) -> Option<f64> {
        match self.kind {
            ConstValueKind::Int(v) => Some(v as f64),
            ConstValueKind::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Get the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ConstValueKind::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the identifier text, if any
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ConstValueKind::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list elements, if any
    pub fn as_list(&self) -> Option<&[ConstValue]> {
        match &self.kind {
            ConstValueKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the map entries, if any
    pub fn as_map(&self) -> Option<&[(ConstValue, ConstValue)]> {
        match &self.kind {
            ConstValueKind::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Display for ConstValueKind {
    /// Renders the literal roughly as it was written, for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValueKind::Int(v) => write!(f, "{}", v),
            ConstValueKind::Double(v) => write!(f, "{}", v),
            ConstValueKind::Str(s) => write!(f, "\"{}\"", s),
            ConstValueKind::Ident(s) => f.write_str(s),
            ConstValueKind::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.kind)?;
                }
                write!(f, "]")
            }
            ConstValueKind::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.kind, v.kind)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
