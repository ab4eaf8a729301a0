//! Collision-free identifier allocation for generated code.
//!
//! Nested collection constants need one temporary per nesting level, and
//! none of those temporaries may collide with each other or with names the
//! caller already owns (such as the field being initialized). A
//! [`NameAllocator`] tracks every name handed out; a [`Scope`] couples it
//! with the monotonically increasing counter that seeds temporary names.

use rustc_hash::FxHashSet;

/// Hands out identifiers that are unique within one allocator's lifetime.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    used: FxHashSet<String>,
}

impl NameAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a caller-owned name as taken without allocating it
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// Allocate a fresh identifier based on `suggestion`.
    ///
    /// The suggestion is sanitized into identifier shape first; on
    /// collision a `_<n>` suffix is appended until the name is free.
    pub fn new_name(&mut self, suggestion: &str) -> String {
        let base = sanitize(suggestion);
        let mut candidate = base.clone();
        let mut attempt = 1u32;
        while self.used.contains(&candidate) {
            candidate = format!("{}_{}", base, attempt);
            attempt += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Rewrite arbitrary text into a valid identifier.
fn sanitize(suggestion: &str) -> String {
    let mut out = String::with_capacity(suggestion.len());
    for c in suggestion.chars() {
        if c.is_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Per-evaluation naming state for one top-level constant or default value.
///
/// Not shared across independent evaluations; passed by exclusive borrow
/// through the recursion, never stored globally.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    counter: u32,
    names: NameAllocator,
}

impl Scope {
    /// Create a fresh evaluation scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a caller-owned name as taken (for example the target slot)
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.names.reserve(name);
    }

    /// Current value of the scope counter
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Manufacture a fresh temporary name from a base hint.
    ///
    /// Each call consumes one counter value, so temporaries read `list0`,
    /// `map1`, `list2`, ... in allocation order regardless of nesting.
    pub fn temp(&mut self, hint: &str) -> String {
        let tag = self.counter;
        self.counter += 1;
        self.names.new_name(&format!("{}{}", hint, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_name_dedupes_with_suffix() {
        let mut names = NameAllocator::new();
        assert_eq!(names.new_name("item"), "item");
        assert_eq!(names.new_name("item"), "item_1");
        assert_eq!(names.new_name("item"), "item_2");
    }

    #[test]
    fn test_reserved_names_are_avoided() {
        let mut names = NameAllocator::new();
        names.reserve("list0");
        assert_eq!(names.new_name("list0"), "list0_1");
    }

    #[test]
    fn test_sanitize_rewrites_invalid_identifiers() {
        assert_eq!(sanitize("my-field"), "my_field");
        assert_eq!(sanitize("1st"), "_1st");
        assert_eq!(sanitize(""), "_");
    }

    #[test]
    fn test_scope_temps_are_distinct() {
        let mut scope = Scope::new();
        let a = scope.temp("list");
        let b = scope.temp("list");
        let c = scope.temp("map");
        assert_eq!(a, "list0");
        assert_eq!(b, "list1");
        assert_eq!(c, "map2");
        assert_eq!(scope.counter(), 3);
    }

    #[test]
    fn test_scope_respects_reserved_slot_names() {
        let mut scope = Scope::new();
        scope.reserve("list0");
        assert_eq!(scope.temp("list"), "list0_1");
    }
}
