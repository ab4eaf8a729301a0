//! Ridl schema model.
//!
//! This crate provides the data model shared by every stage of the Ridl
//! IDL compiler:
//! - **Types**: the closed type system (`ty` module)
//! - **Literals**: parsed constant values (`value` module)
//! - **Programs**: one compiled unit's declarations (`program` module)
//! - **Schema**: the flattened cross-unit aggregate (`schema` module)
//!
//! Parsing IDL source into these structures is owned by the front end;
//! consuming them to generate code is owned by `ridl-codegen`.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod loc;
pub mod program;
pub mod schema;
pub mod ty;
pub mod value;

// Re-exports for convenience
pub use loc::{Loc, Span};
pub use program::{Constant, EnumDecl, Field, NamespaceScope, Program, Service, StructDecl, Typedef};
pub use schema::{Schema, SchemaError};
pub use ty::{BuiltinType, EnumMember, EnumType, StructKind, StructType, Type};
pub use value::{ConstValue, ConstValueKind};
