//! Generation context threaded through recursive value generation.

/// Maximum object nesting before generation short-circuits.
///
/// This is the hard termination guarantee for cyclic or pathologically deep
/// schemas; the resolver deliberately leaves cycle back-edges un-inlined and
/// relies on this budget.
pub const MAX_DEPTH: usize = 10;

/// Immutable per-call generation context.
///
/// Each recursive descent constructs a derived copy; the parent context is
/// never mutated.
#[derive(Debug, Clone, Default)]
pub struct GenContext {
    /// Path segments traversed so far, for diagnostics.
    pub path: Vec<String>,
    /// Object nesting depth, checked against [`MAX_DEPTH`] at entry.
    pub depth: usize,
    /// Current array position, when generating an array element.
    pub index: Option<usize>,
    /// Key under which this node is generated; consulted by the heuristics table.
    pub property_name: Option<String>,
}

impl GenContext {
    /// Root context for a fresh generation call.
    #[must_use]
    pub fn root() -> Self {
        GenContext::default()
    }

    /// Derived context for descending into the named property of an object.
    #[must_use]
    pub fn property(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        GenContext {
            path,
            depth: self.depth + 1,
            index: None,
            property_name: Some(name.to_string()),
        }
    }

    /// Derived context for generating the element at `index` of an array.
    ///
    /// Array descent keeps the depth unchanged; only object nesting counts
    /// against the budget.
    #[must_use]
    pub fn element(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index.to_string());
        GenContext {
            path,
            depth: self.depth,
            index: Some(index),
            property_name: None,
        }
    }

    /// Dotted render of the traversal path, for log messages.
    #[must_use]
    pub fn path_display(&self) -> String {
        if self.path.is_empty() {
            "$".to_string()
        } else {
            self.path.join(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_descent() {
        let root = GenContext::root();
        let child = root.property("user");
        assert_eq!(child.depth, 1);
        assert_eq!(child.property_name.as_deref(), Some("user"));
        assert_eq!(child.path_display(), "user");
        // parent untouched
        assert_eq!(root.depth, 0);
        assert!(root.path.is_empty());
    }

    #[test]
    fn test_element_keeps_depth() {
        let ctx = GenContext::root().property("tags");
        let elem = ctx.element(3);
        assert_eq!(elem.depth, ctx.depth);
        assert_eq!(elem.index, Some(3));
        assert_eq!(elem.path_display(), "tags.3");
        assert!(elem.property_name.is_none());
    }
}
