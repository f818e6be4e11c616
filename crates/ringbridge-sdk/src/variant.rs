//! Variant: owned snapshot of a printed VM value
//!
//! The adapter in [`crate::convert`] reads a value through [`ValueAccess`]
//! once and produces a `Variant`; everything downstream works on this owned
//! tree and never sees VM handles.
//!
//! [`ValueAccess`]: crate::context::ValueAccess

/// A printed value, detached from the VM.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// String content
    Str(String),
    /// Numeric content (the VM does not distinguish ints from floats)
    Num(f64),
    /// Ordered elements, possibly nested
    List(Vec<Variant>),
    /// Object or raw pointer; never introspected
    Opaque,
}

impl Variant {
    /// Build a list variant
    pub fn list(items: impl IntoIterator<Item = Variant>) -> Self {
        Variant::List(items.into_iter().collect())
    }

    /// Short type name, for diagnostics
    pub const fn type_name(&self) -> &'static str {
        match self {
            Variant::Str(_) => "string",
            Variant::Num(_) => "number",
            Variant::List(_) => "list",
            Variant::Opaque => "object",
        }
    }

    /// Returns true for lists with no elements
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Variant::List(items) if items.is_empty())
    }
}

impl From<&str> for Variant {
    fn from(s: &str) -> Self {
        Variant::Str(s.to_string())
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::Str(s)
    }
}

impl From<f64> for Variant {
    fn from(n: f64) -> Self {
        Variant::Num(n)
    }
}

impl From<i32> for Variant {
    fn from(n: i32) -> Self {
        Variant::Num(n as f64)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(items: Vec<Variant>) -> Self {
        Variant::List(items)
    }
}

// Nested lists are unlinked onto a heap stack so that dropping a deep tree
// does not recurse once per level.
impl Drop for Variant {
    fn drop(&mut self) {
        let Variant::List(items) = self else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let mut stack = std::mem::take(items);
        while let Some(mut item) = stack.pop() {
            if let Variant::List(inner) = &mut item {
                stack.append(inner);
            }
        }
    }
}
