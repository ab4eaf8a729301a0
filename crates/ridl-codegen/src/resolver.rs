//! The injected mapping from IDL types to target-language types.

use ridl_schema::Type;

use crate::code::TargetType;

/// Maps abstract IDL types to their target-language representations.
///
/// Implementations are owned by the enclosing generator. Every method must
/// be total over the `true_type()`-normalized types reachable from schema
/// declarations; the constant emitter calls them without a fallback.
pub trait TypeResolver {
    /// The declared (interface-level) representation of a type
    fn representation_of(&self, ty: &Type) -> TargetType;

    /// The concrete list implementation to instantiate for an element type
    fn list_impl_of(&self, element: &Type) -> TargetType;

    /// The concrete set implementation to instantiate for an element type
    fn set_impl_of(&self, element: &Type) -> TargetType;

    /// The concrete map implementation to instantiate for a key/value pair
    fn map_impl_of(&self, key: &Type, value: &Type) -> TargetType;
}
