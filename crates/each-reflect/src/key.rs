// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Property keys.
//!
//! A key is either a string name or a symbol. Symbols compare by identity:
//! two symbols created with the same description are still distinct keys.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// A unique, optionally described, property key.
///
/// # Examples
///
/// ```rust
/// # use each_reflect::key::Symbol;
///
/// let a = Symbol::new("tag");
/// let b = Symbol::new("tag");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.to_string(), "Symbol(tag)");
/// ```
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a fresh symbol with a description.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Creates a fresh symbol without a description.
    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol#{}({})", self.id, self.description().unwrap_or(""))
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// A property key: a string name or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name(String),
    Symbol(Symbol),
}

impl PropertyKey {
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Symbol(_) => None,
        }
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Name(_) => None,
            Self::Symbol(symbol) => Some(symbol),
        }
    }
}

impl From<&str> for PropertyKey {
    #[inline]
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for PropertyKey {
    #[inline]
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Symbol> for PropertyKey {
    #[inline]
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for PropertyKey {
    #[inline]
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

impl PartialEq<str> for PropertyKey {
    fn eq(&self, other: &str) -> bool {
        self.as_name() == Some(other)
    }
}

impl PartialEq<&str> for PropertyKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_name() == Some(*other)
    }
}

impl PartialEq<Symbol> for PropertyKey {
    fn eq(&self, other: &Symbol) -> bool {
        self.as_symbol() == Some(other)
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// Which kinds of keys an enumeration admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Names and symbols; names come first at each level.
    #[default]
    Key,
    /// String names only.
    Name,
    /// Symbols only.
    Symbol,
}

impl KeyType {
    #[inline]
    pub fn includes_names(self) -> bool {
        !matches!(self, Self::Symbol)
    }

    #[inline]
    pub fn includes_symbols(self) -> bool {
        !matches!(self, Self::Name)
    }

    #[inline]
    pub fn admits(self, key: &PropertyKey) -> bool {
        match key {
            PropertyKey::Name(_) => self.includes_names(),
            PropertyKey::Symbol(_) => self.includes_symbols(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Symbol::new("same");
        let b = Symbol::new("same");
        assert_ne!(a, b);
        assert_eq!(PropertyKey::from(&a), PropertyKey::Symbol(a.clone()));
        assert_ne!(PropertyKey::from(&a), PropertyKey::from(&b));
    }

    #[test]
    fn test_keys_hash_consistently() {
        let symbol = Symbol::anonymous();
        let mut set = FxHashSet::default();
        assert!(set.insert(PropertyKey::from("a")));
        assert!(set.insert(PropertyKey::from(&symbol)));
        assert!(!set.insert(PropertyKey::from("a".to_string())));
        assert!(!set.insert(PropertyKey::Symbol(symbol)));
    }

    #[test]
    fn test_key_type_admission() {
        let name = PropertyKey::from("name");
        let symbol = PropertyKey::from(Symbol::anonymous());

        assert!(KeyType::Key.admits(&name) && KeyType::Key.admits(&symbol));
        assert!(KeyType::Name.admits(&name) && !KeyType::Name.admits(&symbol));
        assert!(!KeyType::Symbol.admits(&name) && KeyType::Symbol.admits(&symbol));
        assert_eq!(KeyType::default(), KeyType::Key);
    }

    #[test]
    fn test_display_and_comparisons() {
        let symbol = Symbol::new("tag");
        let key = PropertyKey::from(&symbol);
        assert_eq!(key.to_string(), "Symbol(tag)");
        assert_eq!(key, symbol);
        assert_eq!(PropertyKey::from("value"), "value");
        assert_eq!(Symbol::anonymous().description(), None);
    }
}
