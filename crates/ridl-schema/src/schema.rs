//! Aggregation of compiled units into one queryable schema.
//!
//! A [`Schema`] flattens every declaration from every [`Program`] into
//! ordered lists: unit order as supplied, declaration order within a unit
//! preserved, duplicates preserved as-is. Construction is the only mutation
//! that ever happens; afterwards the schema is read-only and can be shared
//! freely across threads.
//!
//! Strictly speaking this is a lossy representation: the filesystem
//! structure of the source units is not preserved. Constants keep enough
//! identity (owning program name, namespace table) for cross-unit
//! references to resolve without it.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::program::{Constant, EnumDecl, Program, Service, StructDecl, Typedef};
use crate::ty::{EnumType, Type};

/// Errors raised by schema lookups.
///
/// Schema construction is expected to have validated every reference before
/// evaluation begins, so a failed lookup is a hard error, not a recoverable
/// absence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No enum declaration matches the queried type
    #[error("no enum type matching '{name}'")]
    NoSuchEnum {
        /// Name of the type that was looked up
        name: String,
    },
}

/// All types, constants, and services defined across a set of compiled
/// units, frozen into flat declaration-ordered lists.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    structs: Vec<StructDecl>,
    unions: Vec<StructDecl>,
    exceptions: Vec<StructDecl>,
    enums: Vec<EnumDecl>,
    constants: Vec<Constant>,
    typedefs: Vec<Typedef>,
    services: Vec<Service>,
    /// Bare constant name -> indices into `constants`, declaration order
    constants_by_name: FxHashMap<String, Vec<usize>>,
}

impl Schema {
    /// Build a schema from programs, in the order supplied.
    pub fn new(programs: impl IntoIterator<Item = Program>) -> Self {
        let mut schema = Schema::default();

        for program in programs {
            schema.structs.extend(program.structs);
            schema.unions.extend(program.unions);
            schema.exceptions.extend(program.exceptions);
            schema.enums.extend(program.enums);
            schema.constants.extend(program.constants);
            schema.typedefs.extend(program.typedefs);
            schema.services.extend(program.services);
        }

        for (index, constant) in schema.constants.iter().enumerate() {
            schema
                .constants_by_name
                .entry(constant.name.clone())
                .or_default()
                .push(index);
        }

        schema
    }

    /// All `struct` declarations
    pub fn structs(&self) -> &[StructDecl] {
        &self.structs
    }

    /// All `union` declarations
    pub fn unions(&self) -> &[StructDecl] {
        &self.unions
    }

    /// All `exception` declarations
    pub fn exceptions(&self) -> &[StructDecl] {
        &self.exceptions
    }

    /// All `enum` declarations
    pub fn enums(&self) -> &[EnumDecl] {
        &self.enums
    }

    /// All `const` declarations
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// All `typedef` declarations
    pub fn typedefs(&self) -> &[Typedef] {
        &self.typedefs
    }

    /// All `service` declarations
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Find the enum declaration whose type equals `ty`.
    ///
    /// Callers must have resolved `ty` to its true type first; a typedef
    /// alias never matches.
    pub fn find_enum_by_type(&self, ty: &Type) -> Result<&EnumType, SchemaError> {
        if let Type::Enum(target) = ty {
            if let Some(decl) = self.enums.iter().find(|decl| decl.ty == *target) {
                return Ok(&decl.ty);
            }
        }
        Err(SchemaError::NoSuchEnum { name: ty.name() })
    }

    /// Constants with the given bare name, in declaration order.
    ///
    /// Backed by an index so large schemas avoid a full scan; iteration
    /// order is identical to scanning `constants()`, so first-match-wins
    /// tie-breaks are unchanged.
    pub fn constants_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Constant> {
        self.constants_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.constants[index])
    }
}
