//! Core type definitions for the Ridl type system.
//!
//! [`Type`] is a closed tagged union over every type an IDL declaration can
//! carry: the built-in primitives, enums, struct-like user types, typedef
//! aliases, and the three container shapes. Consumers dispatch with
//! exhaustive `match` expressions; the compiler's exhaustiveness checking
//! stands in for the default branch a visitor hierarchy would need.

use std::fmt;

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// The `bool` type
    Bool,
    /// The `byte` type (8-bit signed integer)
    Byte,
    /// The `i16` type
    I16,
    /// The `i32` type
    I32,
    /// The `i64` type
    I64,
    /// The `double` type (IEEE 754 double precision)
    Double,
    /// The `string` type
    String,
    /// The `binary` type (raw bytes)
    Binary,
    /// The `void` type (service method results only)
    Void,
}

impl BuiltinType {
    /// Get the IDL keyword for this type
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::Bool => "bool",
            BuiltinType::Byte => "byte",
            BuiltinType::I16 => "i16",
            BuiltinType::I32 => "i32",
            BuiltinType::I64 => "i64",
            BuiltinType::Double => "double",
            BuiltinType::String => "string",
            BuiltinType::Binary => "binary",
            BuiltinType::Void => "void",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One member of an enum declaration.
///
/// Name and id are each unique within the owning enum; both are fixed at
/// schema-build time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    /// Member name
    pub name: String,
    /// Member value
    pub id: i32,
}

impl EnumMember {
    /// Create a new enum member
    pub fn new(name: impl Into<String>, id: i32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// An enum declaration: a name plus its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    /// Enum name
    pub name: String,
    /// Members in declaration order
    pub members: Vec<EnumMember>,
}

impl EnumType {
    /// Create a new enum type
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Find a member by its value
    pub fn member_by_id(&self, id: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| i64::from(m.id) == id)
    }

    /// Find a member by its bare name
    pub fn member_by_name(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Which struct-like flavor a [`StructType`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructKind {
    /// A plain `struct`
    Struct,
    /// A `union` (at most one field set)
    Union,
    /// An `exception` (throwable from service methods)
    Exception,
}

/// The name and flavor of a struct-like user type.
///
/// Field lists live on the declaration ([`crate::program::StructDecl`]),
/// not on the type, so that [`Type`] stays cheaply comparable and hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    /// Type name
    pub name: String,
    /// Struct, union, or exception
    pub kind: StructKind,
}

impl StructType {
    /// Create a new struct-like type
    pub fn new(name: impl Into<String>, kind: StructKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The core type representation in Ridl.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Built-in primitive type
    Builtin(BuiltinType),

    /// Enum type, carrying its member list
    Enum(EnumType),

    /// Struct, union, or exception type
    Struct(StructType),

    /// Typedef alias for another type
    Typedef {
        /// Alias name
        name: String,
        /// Aliased type
        target: Box<Type>,
    },

    /// List type: `list<T>`
    List(Box<Type>),

    /// Set type: `set<T>`
    Set(Box<Type>),

    /// Map type: `map<K, V>`
    Map(Box<Type>, Box<Type>),
}

impl Type {
    /// Shorthand for a builtin type
    pub fn builtin(b: BuiltinType) -> Type {
        Type::Builtin(b)
    }

    /// Shorthand for a `list<element>` type
    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    /// Shorthand for a `set<element>` type
    pub fn set(element: Type) -> Type {
        Type::Set(Box::new(element))
    }

    /// Shorthand for a `map<key, value>` type
    pub fn map(key: Type, value: Type) -> Type {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// Shorthand for a typedef alias
    pub fn typedef(name: impl Into<String>, target: Type) -> Type {
        Type::Typedef {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Resolve typedef aliases down to the underlying concrete type.
    ///
    /// Alias chains are guaranteed acyclic by schema construction, so the
    /// walk always terminates. Everything downstream of parsing dispatches
    /// on the true type, never on a raw typedef.
    pub fn true_type(&self) -> &Type {
        let mut ty = self;
        while let Type::Typedef { target, .. } = ty {
            ty = target;
        }
        ty
    }

    /// Check if this type is (or aliases) a builtin
    pub fn is_builtin(&self) -> bool {
        matches!(self.true_type(), Type::Builtin(_))
    }

    /// Check if this type is a typedef alias
    pub fn is_typedef(&self) -> bool {
        matches!(self, Type::Typedef { .. })
    }

    /// Get the enum declaration if this is an enum type
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Type::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The declared name of this type, as written in IDL source
    pub fn name(&self) -> String {
        match self {
            Type::Builtin(b) => b.name().to_string(),
            Type::Enum(e) => e.name.clone(),
            Type::Struct(s) => s.name.clone(),
            Type::Typedef { name, .. } => name.clone(),
            Type::List(e) => format!("list<{}>", e.name()),
            Type::Set(e) => format!("set<{}>", e.name()),
            Type::Map(k, v) => format!("map<{}, {}>", k.name(), v.name()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumType {
        EnumType::new(
            "Color",
            vec![EnumMember::new("RED", 0), EnumMember::new("GREEN", 1)],
        )
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(BuiltinType::Bool.name(), "bool");
        assert_eq!(BuiltinType::I64.name(), "i64");
        assert_eq!(BuiltinType::Binary.name(), "binary");
    }

    #[test]
    fn test_true_type_unwraps_alias_chains() {
        let inner = Type::builtin(BuiltinType::I32);
        let aliased = Type::typedef("Outer", Type::typedef("Inner", inner.clone()));

        assert_eq!(aliased.true_type(), &inner);
        assert!(aliased.is_typedef());
        assert!(aliased.is_builtin());
    }

    #[test]
    fn test_true_type_identity_for_concrete_types() {
        let ty = Type::list(Type::builtin(BuiltinType::String));
        assert_eq!(ty.true_type(), &ty);
    }

    #[test]
    fn test_enum_member_lookup() {
        let e = color();
        assert_eq!(e.member_by_id(1).map(|m| m.name.as_str()), Some("GREEN"));
        assert_eq!(e.member_by_name("RED").map(|m| m.id), Some(0));
        assert!(e.member_by_id(7).is_none());
        assert!(e.member_by_name("BLUE").is_none());
    }

    #[test]
    fn test_type_display() {
        let ty = Type::map(
            Type::builtin(BuiltinType::String),
            Type::list(Type::Enum(color())),
        );
        assert_eq!(ty.to_string(), "map<string, list<Color>>");
    }
}
