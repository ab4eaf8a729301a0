//! Declarations owned by one compiled unit.
//!
//! A [`Program`] is one source file's worth of parsed declarations. The
//! parser (out of scope here) produces programs; [`crate::schema::Schema`]
//! flattens them into queryable aggregate views.

use rustc_hash::FxHashMap;

use crate::loc::Loc;
use crate::ty::{EnumType, StructType, Type};
use crate::value::ConstValue;

/// Target scopes a `namespace` directive can address.
///
/// `All` is the wildcard scope (`namespace * com.example`); the concrete
/// scopes cover the generators this toolchain ships or plans to ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceScope {
    /// Wildcard: applies to every target unless overridden
    All,
    /// Java generator
    Java,
    /// Kotlin generator
    Kotlin,
    /// C++ generator
    Cpp,
    /// Python generator
    Py,
    /// Rust generator
    Rs,
}

/// A top-level `const` declaration.
///
/// Owned by its declaring unit; the schema re-exposes it without copying.
/// The unit's namespace table is captured at build time so that a constant
/// can be addressed (`<namespace>.Constants.<name>`) long after its program
/// has been consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    /// Constant name
    pub name: String,
    /// Declared type
    pub ty: Type,
    /// Literal value, unevaluated
    pub value: ConstValue,
    /// Declaration site; its program name is the owning-unit identity
    pub loc: Loc,
    /// Namespace table of the declaring unit
    pub namespaces: FxHashMap<NamespaceScope, String>,
}

impl Constant {
    /// Name of the unit that declared this constant
    pub fn program(&self) -> &str {
        self.loc.program()
    }

    /// Namespace for a target scope, falling back to the wildcard scope
    pub fn namespace_for(&self, scope: NamespaceScope) -> Option<&str> {
        self.namespaces
            .get(&scope)
            .or_else(|| self.namespaces.get(&NamespaceScope::All))
            .map(String::as_str)
    }
}

/// A `typedef` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Typedef {
    /// Alias name
    pub name: String,
    /// Aliased type
    pub target: Type,
    /// Declaration site
    pub loc: Loc,
}

/// A field of a struct, union, or exception declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Declared field type
    pub ty: Type,
    /// Default value literal, if one was declared
    pub default: Option<ConstValue>,
}

/// A struct, union, or exception declaration: the type plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    /// The declared type (name and flavor)
    pub ty: StructType,
    /// Fields in declaration order
    pub fields: Vec<Field>,
    /// Declaration site
    pub loc: Loc,
}

/// An enum declaration: the type plus its declaration site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDecl {
    /// The declared enum type, members included
    pub ty: EnumType,
    /// Declaration site
    pub loc: Loc,
}

/// A `service` declaration.
///
/// Aggregated for completeness; the constant evaluator never consumes
/// services, so only the identity survives here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    /// Service name
    pub name: String,
    /// Parent service name, if the declaration extends one
    pub extends: Option<String>,
    /// Declaration site
    pub loc: Loc,
}

/// One compiled source unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Unit name (source file name without extension)
    pub name: String,
    /// Namespace directives declared in this unit
    pub namespaces: FxHashMap<NamespaceScope, String>,
    /// `struct` declarations, in declaration order
    pub structs: Vec<StructDecl>,
    /// `union` declarations, in declaration order
    pub unions: Vec<StructDecl>,
    /// `exception` declarations, in declaration order
    pub exceptions: Vec<StructDecl>,
    /// `enum` declarations, in declaration order
    pub enums: Vec<EnumDecl>,
    /// `const` declarations, in declaration order
    pub constants: Vec<Constant>,
    /// `typedef` declarations, in declaration order
    pub typedefs: Vec<Typedef>,
    /// `service` declarations, in declaration order
    pub services: Vec<Service>,
}

impl Program {
    /// Create an empty program with the given unit name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare a namespace for a target scope
    pub fn set_namespace(&mut self, scope: NamespaceScope, namespace: impl Into<String>) {
        self.namespaces.insert(scope, namespace.into());
    }

    /// Add a `const` declaration, capturing this unit's namespace table
    pub fn add_constant(&mut self, name: impl Into<String>, ty: Type, value: ConstValue, loc: Loc) {
        self.constants.push(Constant {
            name: name.into(),
            ty,
            value,
            loc,
            namespaces: self.namespaces.clone(),
        });
    }
}
