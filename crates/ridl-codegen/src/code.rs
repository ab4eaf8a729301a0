//! Target code model: expressions and initializer statements.
//!
//! Constant evaluation does not write source text directly. It produces
//! structured [`Expr`] values and appends [`Statement`]s to an
//! [`Initializer`] sink, so callers (and tests) observe exactly what was
//! emitted, in emission order. `Display` impls render the Java-flavored
//! surface form; the concrete container types inside that text come from
//! the injected type resolver, never from this module.

use std::fmt;

/// A rendered target-language type, opaque to the code emitter.
///
/// Produced by the [`crate::resolver::TypeResolver`]; the emitter only
/// ever splices it into statements and expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType(String);

impl TargetType {
    /// Create a target type from its rendered name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The rendered type name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which container family a collection expression belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// `list<T>`
    List,
    /// `set<T>`
    Set,
    /// `map<K, V>`
    Map,
}

impl CollectionKind {
    /// Name of the read-only wrapper for this container family
    pub fn wrapper(&self) -> &'static str {
        match self {
            CollectionKind::List => "unmodifiableList",
            CollectionKind::Set => "unmodifiableSet",
            CollectionKind::Map => "unmodifiableMap",
        }
    }

    /// Name of the shared empty-collection factory for this family
    pub fn empty_factory(&self) -> &'static str {
        match self {
            CollectionKind::List => "emptyList",
            CollectionKind::Set => "emptySet",
            CollectionKind::Map => "emptyMap",
        }
    }
}

/// A side-effect-free expression denoting a constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Boolean literal
    Bool(bool),
    /// 8-bit integer literal
    Byte(i8),
    /// 16-bit integer literal
    I16(i16),
    /// 32-bit integer literal
    I32(i32),
    /// 64-bit integer literal
    I64(i64),
    /// Double literal
    Double(f64),
    /// String literal (unescaped payload; `Display` escapes)
    Str(String),
    /// Reference to one member of a generated enum
    EnumMember {
        /// Resolved representation of the enum type
        ty: TargetType,
        /// Member name
        member: String,
    },
    /// Reference to another named constant's generated location
    ConstRef {
        /// Namespace of the owning unit's constants holder (may be empty)
        package: String,
        /// Constant name
        name: String,
    },
    /// The shared empty list, typed to its element
    EmptyList {
        /// Resolved element representation
        element: TargetType,
    },
    /// The shared empty set, typed to its element
    EmptySet {
        /// Resolved element representation
        element: TargetType,
    },
    /// The shared empty map, typed to its key and value
    EmptyMap {
        /// Resolved key representation
        key: TargetType,
        /// Resolved value representation
        value: TargetType,
    },
    /// A read-only view over a previously constructed temporary
    Unmodifiable {
        /// Container family, selects the wrapper
        kind: CollectionKind,
        /// Name of the temporary holding the built collection
        name: String,
    },
}

/// Escape a string payload for a double-quoted literal.
fn escape_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Bool(v) => write!(f, "{}", v),
            Expr::Byte(v) => write!(f, "(byte) {}", v),
            Expr::I16(v) => write!(f, "(short) {}", v),
            Expr::I32(v) => write!(f, "{}", v),
            Expr::I64(v) => write!(f, "{}", v),
            Expr::Double(v) => write!(f, "(double) {}", v),
            Expr::Str(s) => escape_str(f, s),
            Expr::EnumMember { ty, member } => write!(f, "{}.{}", ty, member),
            Expr::ConstRef { package, name } => {
                if package.is_empty() {
                    write!(f, "Constants.{}", name)
                } else {
                    write!(f, "{}.Constants.{}", package, name)
                }
            }
            Expr::EmptyList { element } => {
                write!(f, "Collections.<{}>emptyList()", element)
            }
            Expr::EmptySet { element } => {
                write!(f, "Collections.<{}>emptySet()", element)
            }
            Expr::EmptyMap { key, value } => {
                write!(f, "Collections.<{}, {}>emptyMap()", key, value)
            }
            Expr::Unmodifiable { kind, name } => {
                write!(f, "Collections.{}({})", kind.wrapper(), name)
            }
        }
    }
}

/// One emitted initialization instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Declare a slot and assign it in one statement
    DeclareAssign {
        /// Slot name
        name: String,
        /// Declared type of the slot
        ty: TargetType,
        /// Assigned expression
        value: Expr,
    },
    /// Assign an already-declared slot
    Assign {
        /// Slot name
        name: String,
        /// Assigned expression
        value: Expr,
    },
    /// Construct an empty collection into a slot
    ConstructEmpty {
        /// Slot name
        name: String,
        /// Declared type of the slot
        ty: TargetType,
        /// Concrete implementation type to instantiate
        impl_ty: TargetType,
        /// Whether the slot is declared by this statement
        declare: bool,
    },
    /// Append one element to a list or set slot
    Append {
        /// Slot name
        name: String,
        /// Element expression
        value: Expr,
    },
    /// Put one entry into a map slot
    Put {
        /// Slot name
        name: String,
        /// Key expression
        key: Expr,
        /// Value expression
        value: Expr,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::DeclareAssign { name, ty, value } => {
                write!(f, "{} {} = {};", ty, name, value)
            }
            Statement::Assign { name, value } => write!(f, "{} = {};", name, value),
            Statement::ConstructEmpty {
                name,
                ty,
                impl_ty,
                declare,
            } => {
                if *declare {
                    write!(f, "{} {} = new {}();", ty, name, impl_ty)
                } else {
                    write!(f, "{} = new {}();", name, impl_ty)
                }
            }
            Statement::Append { name, value } => write!(f, "{}.add({});", name, value),
            Statement::Put { name, key, value } => {
                write!(f, "{}.put({}, {});", name, key, value)
            }
        }
    }
}

/// An ordered, append-only sink of initializer statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Initializer {
    statements: Vec<Statement>,
}

impl Initializer {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// The statements emitted so far, in emission order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements emitted
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Consume the sink, yielding its statements
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_display_primitives() {
        assert_eq!(Expr::Bool(true).to_string(), "true");
        assert_eq!(Expr::Byte(-3).to_string(), "(byte) -3");
        assert_eq!(Expr::I16(300).to_string(), "(short) 300");
        assert_eq!(Expr::I32(42).to_string(), "42");
        assert_eq!(Expr::I64(1 << 40).to_string(), "1099511627776");
        assert_eq!(Expr::Double(2.5).to_string(), "(double) 2.5");
    }

    #[test]
    fn test_expr_display_string_escapes() {
        let e = Expr::Str("a\"b\\c\nd".into());
        assert_eq!(e.to_string(), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_expr_display_references() {
        let member = Expr::EnumMember {
            ty: TargetType::new("Color"),
            member: "GREEN".into(),
        };
        assert_eq!(member.to_string(), "Color.GREEN");

        let qualified = Expr::ConstRef {
            package: "com.example".into(),
            name: "MAX_SIZE".into(),
        };
        assert_eq!(qualified.to_string(), "com.example.Constants.MAX_SIZE");

        let bare = Expr::ConstRef {
            package: String::new(),
            name: "MAX_SIZE".into(),
        };
        assert_eq!(bare.to_string(), "Constants.MAX_SIZE");
    }

    #[test]
    fn test_expr_display_collections() {
        let empty = Expr::EmptyMap {
            key: TargetType::new("String"),
            value: TargetType::new("Integer"),
        };
        assert_eq!(empty.to_string(), "Collections.<String, Integer>emptyMap()");

        let view = Expr::Unmodifiable {
            kind: CollectionKind::Set,
            name: "set0".into(),
        };
        assert_eq!(view.to_string(), "Collections.unmodifiableSet(set0)");
    }

    #[test]
    fn test_statement_display() {
        let construct = Statement::ConstructEmpty {
            name: "list0".into(),
            ty: TargetType::new("List<String>"),
            impl_ty: TargetType::new("ArrayList<String>"),
            declare: true,
        };
        assert_eq!(
            construct.to_string(),
            "List<String> list0 = new ArrayList<String>();"
        );

        let reassign = Statement::ConstructEmpty {
            name: "items".into(),
            ty: TargetType::new("List<String>"),
            impl_ty: TargetType::new("ArrayList<String>"),
            declare: false,
        };
        assert_eq!(reassign.to_string(), "items = new ArrayList<String>();");

        let put = Statement::Put {
            name: "map0".into(),
            key: Expr::Str("k".into()),
            value: Expr::I32(1),
        };
        assert_eq!(put.to_string(), "map0.put(\"k\", 1);");
    }

    #[test]
    fn test_initializer_preserves_order() {
        let mut block = Initializer::new();
        assert!(block.is_empty());
        block.push(Statement::Assign {
            name: "a".into(),
            value: Expr::I32(1),
        });
        block.push(Statement::Assign {
            name: "b".into(),
            value: Expr::I32(2),
        });
        assert_eq!(block.len(), 2);
        assert_eq!(block.to_string(), "a = 1;\nb = 2;\n");
    }
}
