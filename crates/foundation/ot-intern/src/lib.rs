//! Interned names for member names, labels and argument names
//!
//! The binder interns every name it hands to the operation tree. Operations
//! store the `Symbol` only, so a tree can be shared across threads without
//! carrying strings around.

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::sync::Arc;

/// Thread-safe string interner
///
/// Cloning is cheap; clones share the same table.
#[derive(Clone, Debug)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Creates an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Interns `name`, returning the existing symbol if it was seen before
    pub fn intern(&self, name: &str) -> Symbol {
        self.inner.get_or_intern(name)
    }

    /// Looks up a symbol without interning
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.inner.get(name)
    }

    /// Resolves a symbol produced by this interner
    #[must_use]
    pub fn resolve(&self, symbol: &Symbol) -> &str {
        self.inner.resolve(symbol)
    }

    /// Resolves a symbol that may come from a different interner
    #[must_use]
    pub fn try_resolve(&self, symbol: &Symbol) -> Option<&str> {
        self.inner.try_resolve(symbol)
    }

    /// Number of distinct names interned so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
