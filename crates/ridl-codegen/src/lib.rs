//! Ridl code emission.
//!
//! This crate owns the constant-resolution and code-emission core of the
//! Ridl compiler:
//! - **Code model**: target expressions and initializer statements
//!   (`code` module)
//! - **Constants**: the type-directed constant evaluator/emitter
//!   (`constants` module)
//! - **Names**: collision-free temporary allocation (`names` module)
//! - **Resolver**: the injected type-mapping seam (`resolver` module)
//! - **Diagnostics**: terminal and JSON rendering of emit errors
//!   (`diagnostic` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use ridl_codegen::{ConstantBuilder, Initializer, Scope};
//! use ridl_schema::NamespaceScope;
//!
//! let builder = ConstantBuilder::new(&resolver, &schema, NamespaceScope::Java);
//! let mut block = Initializer::new();
//! let mut scope = Scope::new();
//! builder.generate_field_initializer(
//!     &mut block, &mut scope, "DEFAULT_TAGS", &constant.ty, &constant.value, false,
//! )?;
//! for statement in block.statements() {
//!     println!("{statement}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod code;
pub mod constants;
pub mod diagnostic;
pub mod error;
pub mod names;
pub mod resolver;

// Re-exports for convenience
pub use code::{CollectionKind, Expr, Initializer, Statement, TargetType};
pub use constants::ConstantBuilder;
pub use diagnostic::Diagnostic;
pub use error::EmitError;
pub use names::{NameAllocator, Scope};
pub use resolver::TypeResolver;
