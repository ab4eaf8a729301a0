//! Constant evaluation and initializer emission.
//!
//! [`ConstantBuilder`] turns a `(name, declared type, literal)` triple into
//! target code: either a single expression, or an ordered sequence of
//! construction statements when the value is a non-empty collection. Both
//! paths dispatch on the declared type's `true_type()` and recurse into each
//! other: the statement path renders element expressions, and the expression
//! path spills nested collections back into the statement path under a fresh
//! temporary name.

use ridl_schema::{
    BuiltinType, ConstValue, ConstValueKind, Constant, NamespaceScope, Schema, Type,
};

use crate::code::{CollectionKind, Expr, Initializer, Statement};
use crate::error::EmitError;
use crate::names::Scope;
use crate::resolver::TypeResolver;

/// Evaluates constant literals and emits their initialization code.
pub struct ConstantBuilder<'a, R: TypeResolver> {
    resolver: &'a R,
    schema: &'a Schema,
    namespace_scope: NamespaceScope,
}

impl<'a, R: TypeResolver> ConstantBuilder<'a, R> {
    /// Create a builder for one generation target.
    ///
    /// `namespace_scope` selects which namespace of a referenced constant's
    /// declaring unit names its generated constants holder.
    pub fn new(resolver: &'a R, schema: &'a Schema, namespace_scope: NamespaceScope) -> Self {
        Self {
            resolver,
            schema,
            namespace_scope,
        }
    }

    /// Emit the statements that leave `name` holding `value`.
    ///
    /// With `needs_declaration` the slot is declared here; otherwise a bare
    /// assignment is emitted into an already-declared slot (a constructor
    /// field, or a temporary being rebuilt).
    pub fn generate_field_initializer(
        &self,
        block: &mut Initializer,
        scope: &mut Scope,
        name: &str,
        ty: &Type,
        value: &ConstValue,
        needs_declaration: bool,
    ) -> Result<(), EmitError> {
        let tt = ty.true_type();
        match tt {
            Type::Builtin(_) | Type::Enum(_) => {
                let init = self.render_const_value(block, scope, ty, value)?;
                if needs_declaration {
                    block.push(Statement::DeclareAssign {
                        name: name.to_string(),
                        ty: self.resolver.representation_of(tt),
                        value: init,
                    });
                } else {
                    block.push(Statement::Assign {
                        name: name.to_string(),
                        value: init,
                    });
                }
                Ok(())
            }

            Type::List(element) | Type::Set(element) => {
                let keyword = if matches!(tt, Type::List(_)) { "list" } else { "set" };
                let Some(items) = value.as_list() else {
                    return Err(self.invalid_literal(keyword, value));
                };
                let element = element.true_type();
                let impl_ty = if matches!(tt, Type::List(_)) {
                    self.resolver.list_impl_of(element)
                } else {
                    self.resolver.set_impl_of(element)
                };
                block.push(Statement::ConstructEmpty {
                    name: name.to_string(),
                    ty: self.resolver.representation_of(tt),
                    impl_ty,
                    declare: needs_declaration,
                });
                for item in items {
                    let rendered = self.render_const_value(block, scope, element, item)?;
                    block.push(Statement::Append {
                        name: name.to_string(),
                        value: rendered,
                    });
                }
                Ok(())
            }

            Type::Map(key, val) => {
                let Some(entries) = value.as_map() else {
                    return Err(self.invalid_literal("map", value));
                };
                let key = key.true_type();
                let val = val.true_type();
                block.push(Statement::ConstructEmpty {
                    name: name.to_string(),
                    ty: self.resolver.representation_of(tt),
                    impl_ty: self.resolver.map_impl_of(key, val),
                    declare: needs_declaration,
                });
                for (entry_key, entry_value) in entries {
                    let rendered_key = self.render_const_value(block, scope, key, entry_key)?;
                    let rendered_value = self.render_const_value(block, scope, val, entry_value)?;
                    block.push(Statement::Put {
                        name: name.to_string(),
                        key: rendered_key,
                        value: rendered_value,
                    });
                }
                Ok(())
            }

            Type::Struct(_) => Err(EmitError::Unsupported {
                construct: "struct-valued constants".into(),
                loc: value.loc.clone(),
            }),

            // true_type() never yields a typedef; reaching this arm means
            // the caller bypassed normalization.
            Type::Typedef { name: alias, .. } => Err(EmitError::Internal {
                message: format!("typedef '{}' survived true_type() normalization", alias),
            }),
        }
    }

    /// Render `value` as a single side-effect-free expression.
    ///
    /// Non-empty collections cannot be a single expression in every target,
    /// so they are built under a fresh temporary through
    /// [`Self::generate_field_initializer`] and referenced here as a
    /// read-only view.
    pub fn render_const_value(
        &self,
        block: &mut Initializer,
        scope: &mut Scope,
        ty: &Type,
        value: &ConstValue,
    ) -> Result<Expr, EmitError> {
        let tt = ty.true_type();
        match tt {
            Type::Builtin(builtin) => self.render_builtin(*builtin, tt, value),
            Type::Enum(_) => self.render_enum_member(tt, value),

            Type::List(element) => match value.as_list() {
                Some([]) => Ok(Expr::EmptyList {
                    element: self.resolver.representation_of(element.true_type()),
                }),
                Some(_) => self.spill_collection(block, scope, tt, value, CollectionKind::List),
                None => self.constant_or_error("list", tt, value),
            },

            Type::Set(element) => match value.as_list() {
                Some([]) => Ok(Expr::EmptySet {
                    element: self.resolver.representation_of(element.true_type()),
                }),
                Some(_) => self.spill_collection(block, scope, tt, value, CollectionKind::Set),
                None => self.constant_or_error("set", tt, value),
            },

            Type::Map(key, val) => match value.as_map() {
                Some([]) => Ok(Expr::EmptyMap {
                    key: self.resolver.representation_of(key.true_type()),
                    value: self.resolver.representation_of(val.true_type()),
                }),
                Some(_) => self.spill_collection(block, scope, tt, value, CollectionKind::Map),
                None => self.constant_or_error("map", tt, value),
            },

            Type::Struct(_) => Err(EmitError::Unsupported {
                construct: "struct-valued constants".into(),
                loc: value.loc.clone(),
            }),

            Type::Typedef { name: alias, .. } => Err(EmitError::Internal {
                message: format!("typedef '{}' survived true_type() normalization", alias),
            }),
        }
    }

    fn render_builtin(
        &self,
        builtin: BuiltinType,
        tt: &Type,
        value: &ConstValue,
    ) -> Result<Expr, EmitError> {
        match builtin {
            BuiltinType::Bool => match &value.kind {
                ConstValueKind::Ident(id) if id == "true" => Ok(Expr::Bool(true)),
                ConstValueKind::Ident(id) if id == "false" => Ok(Expr::Bool(false)),
                ConstValueKind::Int(v) => Ok(Expr::Bool(*v != 0)),
                _ => self.constant_or_error("bool", tt, value),
            },
            BuiltinType::Byte => match value.as_int() {
                Some(v) => Ok(Expr::Byte(v as i8)),
                None => self.constant_or_error("byte", tt, value),
            },
            BuiltinType::I16 => match value.as_int() {
                Some(v) => Ok(Expr::I16(v as i16)),
                None => self.constant_or_error("i16", tt, value),
            },
            BuiltinType::I32 => match value.as_int() {
                Some(v) => Ok(Expr::I32(v as i32)),
                None => self.constant_or_error("i32", tt, value),
            },
            BuiltinType::I64 => match value.as_int() {
                Some(v) => Ok(Expr::I64(v)),
                None => self.constant_or_error("i64", tt, value),
            },
            BuiltinType::Double => match value.as_double() {
                Some(v) => Ok(Expr::Double(v)),
                None => self.constant_or_error("double", tt, value),
            },
            BuiltinType::String => match value.as_str() {
                Some(s) => Ok(Expr::Str(s.to_string())),
                None => self.constant_or_error("string", tt, value),
            },
            BuiltinType::Binary => Err(EmitError::Unsupported {
                construct: "binary literals".into(),
                loc: value.loc.clone(),
            }),
            // A void-typed value slot cannot come from valid input; only a
            // broken caller can get here.
            BuiltinType::Void => Err(EmitError::Internal {
                message: format!("void-typed constant value {} at {}", value.kind, value.loc),
            }),
        }
    }

    fn render_enum_member(&self, tt: &Type, value: &ConstValue) -> Result<Expr, EmitError> {
        let enum_type = self.schema.find_enum_by_type(tt).map_err(|err| {
            EmitError::Internal {
                message: format!("enum type referenced but absent from schema: {}", err),
            }
        })?;

        let member = match &value.kind {
            ConstValueKind::Int(id) => enum_type.member_by_id(*id),
            ConstValueKind::Ident(name) => {
                // Strip the enum-name qualifier, assuming it is present.
                let bare = match name.rfind('.') {
                    Some(ix) => &name[ix + 1..],
                    None => name.as_str(),
                };
                enum_type.member_by_name(bare)
            }
            other => {
                return Err(EmitError::Internal {
                    message: format!(
                        "literal {} cannot denote an enum member; upstream validation bug",
                        other
                    ),
                })
            }
        };

        match member {
            Some(member) => Ok(Expr::EnumMember {
                ty: self.resolver.representation_of(tt),
                member: member.name.clone(),
            }),
            None => Err(EmitError::UnresolvedEnumMember {
                enum_name: enum_type.name.clone(),
                value: value.kind.to_string(),
                loc: value.loc.clone(),
            }),
        }
    }

    /// Build a non-empty collection under a fresh temporary and hand back a
    /// read-only view of it.
    fn spill_collection(
        &self,
        block: &mut Initializer,
        scope: &mut Scope,
        tt: &Type,
        value: &ConstValue,
        kind: CollectionKind,
    ) -> Result<Expr, EmitError> {
        let hint = match kind {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
        };
        let name = scope.temp(hint);
        self.generate_field_initializer(block, scope, &name, tt, value, true)?;
        Ok(Expr::Unmodifiable { kind, name })
    }

    /// Fallback for literals that did not satisfy their declared type
    /// directly: an identifier may still be a reference to another named
    /// constant of the expected type.
    fn constant_or_error(
        &self,
        expected: &str,
        ty: &Type,
        value: &ConstValue,
    ) -> Result<Expr, EmitError> {
        let Some(ident) = value.as_ident() else {
            return Err(self.invalid_literal(expected, value));
        };

        let expected_ty = ty.true_type();
        let (qualifier, bare) = match ident.find('.') {
            Some(ix) => (Some(&ident[..ix]), &ident[ix + 1..]),
            None => (None, ident),
        };

        for constant in self.schema.constants_named(bare) {
            if constant.ty.true_type() != expected_ty {
                continue;
            }
            if let Some(program) = qualifier {
                if constant.program() != program {
                    continue;
                }
            }
            return Ok(self.reference_to(constant, bare));
        }

        Err(EmitError::UnresolvedReference {
            name: ident.to_string(),
            expected: ty.name(),
            loc: value.loc.clone(),
        })
    }

    /// An expression naming `constant`'s already-generated location.
    fn reference_to(&self, constant: &Constant, name: &str) -> Expr {
        let package = constant
            .namespace_for(self.namespace_scope)
            .unwrap_or_default()
            .to_string();
        Expr::ConstRef {
            package,
            name: name.to_string(),
        }
    }

    fn invalid_literal(&self, expected: &str, value: &ConstValue) -> EmitError {
        EmitError::InvalidLiteral {
            expected: expected.to_string(),
            literal: value.kind.to_string(),
            loc: value.loc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::TargetType;
    use ridl_schema::{EnumMember, EnumType, Loc, Program, Span, StructKind, StructType};

    // A Java-flavored resolver, standing in for the generator-owned one.
    struct JavaResolver;

    impl TypeResolver for JavaResolver {
        fn representation_of(&self, ty: &Type) -> TargetType {
            let name = match ty.true_type() {
                Type::Builtin(BuiltinType::Bool) => "Boolean".to_string(),
                Type::Builtin(BuiltinType::Byte) => "Byte".to_string(),
                Type::Builtin(BuiltinType::I16) => "Short".to_string(),
                Type::Builtin(BuiltinType::I32) => "Integer".to_string(),
                Type::Builtin(BuiltinType::I64) => "Long".to_string(),
                Type::Builtin(BuiltinType::Double) => "Double".to_string(),
                Type::Builtin(BuiltinType::String) => "String".to_string(),
                Type::Builtin(BuiltinType::Binary) => "byte[]".to_string(),
                Type::Builtin(BuiltinType::Void) => "Void".to_string(),
                Type::Enum(e) => e.name.clone(),
                Type::Struct(s) => s.name.clone(),
                Type::List(e) => format!("List<{}>", self.representation_of(e)),
                Type::Set(e) => format!("Set<{}>", self.representation_of(e)),
                Type::Map(k, v) => format!(
                    "Map<{}, {}>",
                    self.representation_of(k),
                    self.representation_of(v)
                ),
                Type::Typedef { .. } => unreachable!("true_type() strips typedefs"),
            };
            TargetType::new(name)
        }

        fn list_impl_of(&self, element: &Type) -> TargetType {
            TargetType::new(format!("ArrayList<{}>", self.representation_of(element)))
        }

        fn set_impl_of(&self, element: &Type) -> TargetType {
            TargetType::new(format!("HashSet<{}>", self.representation_of(element)))
        }

        fn map_impl_of(&self, key: &Type, value: &Type) -> TargetType {
            TargetType::new(format!(
                "HashMap<{}, {}>",
                self.representation_of(key),
                self.representation_of(value)
            ))
        }
    }

    fn loc() -> Loc {
        Loc::new("test", Span::new(0, 1, 1, 1))
    }

    fn int(v: i64) -> ConstValue {
        ConstValue::new(ConstValueKind::Int(v), loc())
    }

    fn ident(s: &str) -> ConstValue {
        ConstValue::new(ConstValueKind::Ident(s.into()), loc())
    }

    fn string(s: &str) -> ConstValue {
        ConstValue::new(ConstValueKind::Str(s.into()), loc())
    }

    fn list(items: Vec<ConstValue>) -> ConstValue {
        ConstValue::new(ConstValueKind::List(items), loc())
    }

    fn color() -> EnumType {
        EnumType::new(
            "Color",
            vec![EnumMember::new("RED", 0), EnumMember::new("GREEN", 1)],
        )
    }

    fn schema() -> Schema {
        let mut shared = Program::new("shared");
        shared.set_namespace(NamespaceScope::Java, "com.example.shared");
        shared.enums.push(ridl_schema::EnumDecl {
            ty: color(),
            loc: loc(),
        });
        shared.add_constant("MAX_SIZE", Type::builtin(BuiltinType::I32), int(100), loc());
        Schema::new([shared])
    }

    fn render(ty: &Type, value: &ConstValue) -> Result<Expr, EmitError> {
        let schema = schema();
        let builder = ConstantBuilder::new(&JavaResolver, &schema, NamespaceScope::Java);
        let mut block = Initializer::new();
        let mut scope = Scope::new();
        builder.render_const_value(&mut block, &mut scope, ty, value)
    }

    #[test]
    fn test_render_integer_primitives() {
        assert_eq!(
            render(&Type::builtin(BuiltinType::I32), &int(42)),
            Ok(Expr::I32(42))
        );
        assert_eq!(
            render(&Type::builtin(BuiltinType::Byte), &int(300)),
            Ok(Expr::Byte(300i64 as i8))
        );
        assert_eq!(
            render(&Type::builtin(BuiltinType::I64), &int(1 << 40)),
            Ok(Expr::I64(1 << 40))
        );
    }

    #[test]
    fn test_render_bool_identifier_and_integer() {
        let ty = Type::builtin(BuiltinType::Bool);
        assert_eq!(render(&ty, &ident("true")), Ok(Expr::Bool(true)));
        assert_eq!(render(&ty, &ident("false")), Ok(Expr::Bool(false)));
        assert_eq!(render(&ty, &int(0)), Ok(Expr::Bool(false)));
        assert_eq!(render(&ty, &int(7)), Ok(Expr::Bool(true)));
    }

    #[test]
    fn test_render_double_widens_integer() {
        let ty = Type::builtin(BuiltinType::Double);
        assert_eq!(render(&ty, &int(3)), Ok(Expr::Double(3.0)));
        assert_eq!(
            render(&ty, &ConstValue::new(ConstValueKind::Double(2.5), loc())),
            Ok(Expr::Double(2.5))
        );
    }

    #[test]
    fn test_render_through_typedef_alias() {
        let ty = Type::typedef("Size", Type::builtin(BuiltinType::I32));
        assert_eq!(render(&ty, &int(9)), Ok(Expr::I32(9)));
    }

    #[test]
    fn test_invalid_literal_is_rejected() {
        let err = render(&Type::builtin(BuiltinType::I32), &string("oops")).unwrap_err();
        assert!(matches!(err, EmitError::InvalidLiteral { .. }));
    }

    #[test]
    fn test_binary_literals_unsupported() {
        let err = render(&Type::builtin(BuiltinType::Binary), &string("00ff")).unwrap_err();
        assert!(matches!(err, EmitError::Unsupported { .. }));
    }

    #[test]
    fn test_void_is_internal_violation() {
        let err = render(&Type::builtin(BuiltinType::Void), &int(0)).unwrap_err();
        assert!(matches!(err, EmitError::Internal { .. }));
    }

    #[test]
    fn test_struct_values_unsupported() {
        let ty = Type::Struct(StructType::new("Point", StructKind::Struct));
        let err = render(&ty, &list(vec![])).unwrap_err();
        assert!(matches!(err, EmitError::Unsupported { .. }));
    }

    #[test]
    fn test_enum_by_id_name_and_qualified_name_agree() {
        let ty = Type::Enum(color());
        let expected = Expr::EnumMember {
            ty: TargetType::new("Color"),
            member: "GREEN".into(),
        };
        assert_eq!(render(&ty, &int(1)), Ok(expected.clone()));
        assert_eq!(render(&ty, &ident("GREEN")), Ok(expected.clone()));
        assert_eq!(render(&ty, &ident("Color.GREEN")), Ok(expected));
    }

    #[test]
    fn test_enum_member_misses_are_reported() {
        let ty = Type::Enum(color());
        assert!(matches!(
            render(&ty, &int(9)).unwrap_err(),
            EmitError::UnresolvedEnumMember { .. }
        ));
        assert!(matches!(
            render(&ty, &ident("BLUE")).unwrap_err(),
            EmitError::UnresolvedEnumMember { .. }
        ));
    }

    #[test]
    fn test_enum_absent_from_schema_is_internal() {
        let ty = Type::Enum(EnumType::new("Ghost", vec![]));
        assert!(matches!(
            render(&ty, &int(0)).unwrap_err(),
            EmitError::Internal { .. }
        ));
    }

    #[test]
    fn test_identifier_falls_back_to_constant_reference() {
        let expr = render(&Type::builtin(BuiltinType::I32), &ident("MAX_SIZE")).unwrap();
        assert_eq!(
            expr,
            Expr::ConstRef {
                package: "com.example.shared".into(),
                name: "MAX_SIZE".into(),
            }
        );
    }

    #[test]
    fn test_constant_reference_requires_matching_type() {
        let err = render(&Type::builtin(BuiltinType::String), &ident("MAX_SIZE")).unwrap_err();
        assert!(matches!(err, EmitError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_empty_list_is_a_single_expression() {
        let ty = Type::list(Type::builtin(BuiltinType::String));
        let schema = schema();
        let builder = ConstantBuilder::new(&JavaResolver, &schema, NamespaceScope::Java);
        let mut block = Initializer::new();
        let mut scope = Scope::new();
        let expr = builder
            .render_const_value(&mut block, &mut scope, &ty, &list(vec![]))
            .unwrap();
        assert_eq!(
            expr,
            Expr::EmptyList {
                element: TargetType::new("String")
            }
        );
        assert!(block.is_empty());
    }

    #[test]
    fn test_nonempty_list_spills_to_statements() {
        let ty = Type::list(Type::builtin(BuiltinType::String));
        let schema = schema();
        let builder = ConstantBuilder::new(&JavaResolver, &schema, NamespaceScope::Java);
        let mut block = Initializer::new();
        let mut scope = Scope::new();
        let expr = builder
            .render_const_value(
                &mut block,
                &mut scope,
                &ty,
                &list(vec![string("a"), string("b")]),
            )
            .unwrap();

        assert_eq!(
            expr,
            Expr::Unmodifiable {
                kind: CollectionKind::List,
                name: "list0".into(),
            }
        );
        assert_eq!(block.len(), 3);
        assert!(matches!(
            block.statements()[0],
            Statement::ConstructEmpty { declare: true, .. }
        ));
        assert_eq!(
            block.statements()[1],
            Statement::Append {
                name: "list0".into(),
                value: Expr::Str("a".into()),
            }
        );
        assert_eq!(
            block.statements()[2],
            Statement::Append {
                name: "list0".into(),
                value: Expr::Str("b".into()),
            }
        );
    }
}
