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

//! # Prototype-Chain Property Enumeration
//!
//! Walks an object and its ancestors, yielding `(key, descriptor)` pairs under
//! a `KeyFilter`:
//!
//! - `key_type` selects names, symbols or both; at each level names come
//!   before symbols, each group in host order.
//! - `enumerable` restricts output to enumerable properties; clearing it
//!   ("defined" mode) admits hidden properties as well.
//! - `own` stops after the most-derived level.
//!
//! The walk stops before the root level. A key is produced at most once: the
//! first level declaring it wins, and that declaration shadows the same key
//! on every less-derived level even when the shadowing property itself is
//! filtered out (a hidden override still hides an enumerable inherited
//! property).
//!
//! The part of the chain that will be walked is validated up front, so a
//! cyclic chain fails with `CycleDetected` before anything is produced. Each
//! level's own properties are read lazily, when the previous level is done.
//!
//! ## Usage
//!
//! ```rust
//! use each_reflect::enumerate::{each_key, KeyFilter};
//! use each_reflect::graph::{ObjectGraph, PropertyDescriptor};
//!
//! let mut graph = ObjectGraph::new();
//! let proto = graph.create(graph.root());
//! graph.define(proto, "greet", PropertyDescriptor::method("hello"));
//! graph.set(proto, "color", "red");
//!
//! let object = graph.create(proto);
//! graph.set(object, "name", "ferris");
//!
//! let keys: Vec<String> = each_key(&graph, object, KeyFilter::default())
//!     .unwrap()
//!     .map(|key| key.to_string())
//!     .collect();
//! assert_eq!(keys, vec!["name", "color"]);
//!
//! let keys: Vec<String> = each_key(&graph, object, KeyFilter::default().defined())
//!     .unwrap()
//!     .map(|key| key.to_string())
//!     .collect();
//! assert_eq!(keys, vec!["name", "greet", "color"]);
//! ```

use crate::{
    chain::prototype_chain,
    host::{Descriptor, OwnProperties, Reflect},
    key::{KeyType, PropertyKey},
};
use each_core::error::Result;
use rustc_hash::FxHashSet;
use std::iter::FusedIterator;

/// Selects which properties an enumeration yields.
///
/// The default is every enumerable key, inherited ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyFilter {
    pub key_type: KeyType,
    pub enumerable: bool,
    pub own: bool,
}

impl Default for KeyFilter {
    fn default() -> Self {
        Self {
            key_type: KeyType::Key,
            enumerable: true,
            own: false,
        }
    }
}

impl KeyFilter {
    #[inline]
    pub fn new(key_type: KeyType, enumerable: bool, own: bool) -> Self {
        Self {
            key_type,
            enumerable,
            own,
        }
    }

    #[inline]
    pub fn with_key_type(self, key_type: KeyType) -> Self {
        Self { key_type, ..self }
    }

    /// Restricts the walk to the object's own level.
    #[inline]
    pub fn own(self) -> Self {
        Self { own: true, ..self }
    }

    /// Walks the whole chain.
    #[inline]
    pub fn inherited(self) -> Self {
        Self { own: false, ..self }
    }

    /// Admits non-enumerable properties too.
    #[inline]
    pub fn defined(self) -> Self {
        Self {
            enumerable: false,
            ..self
        }
    }

    /// Admits enumerable properties only.
    #[inline]
    pub fn enumerable(self) -> Self {
        Self {
            enumerable: true,
            ..self
        }
    }
}

impl std::fmt::Display for KeyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KeyFilter({:?}, {}, {})",
            self.key_type,
            if self.enumerable { "enumerable" } else { "defined" },
            if self.own { "own" } else { "inherited" }
        )
    }
}

/// Lazily yields `(key, descriptor)` pairs of an object's chain.
pub struct Properties<'h, H>
where
    H: Reflect + ?Sized,
{
    host: &'h H,
    filter: KeyFilter,
    levels: std::vec::IntoIter<H::Object>,
    current: smallvec::IntoIter<[(PropertyKey, H::Descriptor); 8]>,
    visited: FxHashSet<PropertyKey>,
}

/// Enumerates the properties of `object` under `filter`.
///
/// # Errors
///
/// Returns `CycleDetected` if the walked part of the chain loops.
pub fn each_descriptor<H>(host: &H, object: H::Object, filter: KeyFilter) -> Result<Properties<'_, H>>
where
    H: Reflect + ?Sized,
{
    let mut levels = Vec::new();
    for level in prototype_chain(host, object) {
        let level = level?;
        if host.is_root(&level) {
            break;
        }
        levels.push(level);
        if filter.own {
            break;
        }
    }

    tracing::trace!(levels = levels.len(), %filter, "enumerating properties");

    Ok(Properties {
        host,
        filter,
        levels: levels.into_iter(),
        current: OwnProperties::new().into_iter(),
        visited: FxHashSet::default(),
    })
}

/// Alias of [`each_descriptor`].
#[inline]
pub fn enumerate<H>(host: &H, object: H::Object, filter: KeyFilter) -> Result<Properties<'_, H>>
where
    H: Reflect + ?Sized,
{
    each_descriptor(host, object, filter)
}

impl<'h, H> Properties<'h, H>
where
    H: Reflect + ?Sized,
{
    #[inline]
    pub fn filter(&self) -> KeyFilter {
        self.filter
    }

    /// Reads the next level, names first, keeping only admitted key types.
    fn load_level(&mut self, level: &H::Object) {
        let properties = self.host.own_properties(level);
        let key_type = self.filter.key_type;

        let mut ordered = OwnProperties::with_capacity(properties.len());
        if key_type.includes_names() {
            ordered.extend(properties.iter().filter(|(key, _)| key.is_name()).cloned());
        }
        if key_type.includes_symbols() {
            ordered.extend(properties.into_iter().filter(|(key, _)| key.is_symbol()));
        }

        tracing::trace!(properties = ordered.len(), "loaded prototype level");
        self.current = ordered.into_iter();
    }
}

impl<'h, H> Iterator for Properties<'h, H>
where
    H: Reflect + ?Sized,
{
    type Item = (PropertyKey, H::Descriptor);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for (key, descriptor) in self.current.by_ref() {
                // Seen keys shadow less-derived levels whether or not they
                // were admitted.
                if !self.visited.insert(key.clone()) {
                    continue;
                }
                if self.filter.enumerable && !descriptor.is_enumerable() {
                    continue;
                }
                return Some((key, descriptor));
            }
            let level = self.levels.next()?;
            self.load_level(&level);
        }
    }
}

impl<'h, H> FusedIterator for Properties<'h, H> where H: Reflect + ?Sized {}

/// Yields the admitted keys of `object`.
pub struct Keys<'h, H>
where
    H: Reflect + ?Sized,
{
    inner: Properties<'h, H>,
}

/// Enumerates the keys of `object` under `filter`.
///
/// # Errors
///
/// Returns `CycleDetected` if the walked part of the chain loops.
pub fn each_key<H>(host: &H, object: H::Object, filter: KeyFilter) -> Result<Keys<'_, H>>
where
    H: Reflect + ?Sized,
{
    Ok(Keys {
        inner: each_descriptor(host, object, filter)?,
    })
}

impl<'h, H> Iterator for Keys<'h, H>
where
    H: Reflect + ?Sized,
{
    type Item = PropertyKey;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<'h, H> FusedIterator for Keys<'h, H> where H: Reflect + ?Sized {}

/// Yields the values of the admitted keys of `object`.
///
/// Values are read through the object itself, so accessors run with the
/// object as receiver; any side effects are the caller's concern. A read
/// that produces nothing (a setter-only accessor) yields `None`.
pub struct Values<'h, H>
where
    H: Reflect + ?Sized,
{
    object: H::Object,
    inner: Properties<'h, H>,
}

/// Enumerates the values of `object` under `filter`.
///
/// # Errors
///
/// Returns `CycleDetected` if the walked part of the chain loops.
pub fn each_value<H>(host: &H, object: H::Object, filter: KeyFilter) -> Result<Values<'_, H>>
where
    H: Reflect + ?Sized,
{
    Ok(Values {
        inner: each_descriptor(host, object.clone(), filter)?,
        object,
    })
}

impl<'h, H> Iterator for Values<'h, H>
where
    H: Reflect + ?Sized,
{
    type Item = Option<H::Value>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.inner.next()?;
        Some(self.inner.host.get(&self.object, &key))
    }
}

impl<'h, H> FusedIterator for Values<'h, H> where H: Reflect + ?Sized {}

/// Yields `(key, value)` pairs of the admitted keys of `object`.
pub struct Entries<'h, H>
where
    H: Reflect + ?Sized,
{
    object: H::Object,
    inner: Properties<'h, H>,
}

/// Enumerates the entries of `object` under `filter`.
///
/// # Errors
///
/// Returns `CycleDetected` if the walked part of the chain loops.
pub fn each_entry<H>(host: &H, object: H::Object, filter: KeyFilter) -> Result<Entries<'_, H>>
where
    H: Reflect + ?Sized,
{
    Ok(Entries {
        inner: each_descriptor(host, object.clone(), filter)?,
        object,
    })
}

impl<'h, H> Iterator for Entries<'h, H>
where
    H: Reflect + ?Sized,
{
    type Item = (PropertyKey, Option<H::Value>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.inner.next()?;
        let value = self.inner.host.get(&self.object, &key);
        Some((key, value))
    }
}

impl<'h, H> FusedIterator for Entries<'h, H> where H: Reflect + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{ObjectGraph, ObjectId, PropertyDescriptor},
        key::Symbol,
    };
    use each_core::error::ErrorKind;

    struct Fixture {
        graph: ObjectGraph<&'static str>,
        extend: ObjectId,
        base_symbol: Symbol,
        public: Symbol,
        private: Symbol,
        extend_symbol: Symbol,
    }

    /// A base class, a derived class overriding one method, and an instance
    /// of the derived class with one hidden and two enumerable fields.
    fn fixture() -> Fixture {
        let base_symbol = Symbol::new("base");
        let public = Symbol::new("enumerable");
        let private = Symbol::new("non-enumerable");
        let extend_symbol = Symbol::new("extends");

        let mut graph = ObjectGraph::new();
        let root = graph.root();
        graph.define(root, "toString", PropertyDescriptor::method("native"));
        graph.set(root, "leaked", "root level must never be inspected");

        let base = graph.create(root);
        graph.define(base, "constructor", PropertyDescriptor::method("Base"));
        graph.define(base, "base", PropertyDescriptor::getter(|_, _| "Base"));
        graph.define(base, "getBase", PropertyDescriptor::method("getBase"));
        graph.define(base, "overrideMe", PropertyDescriptor::method("throws"));
        graph.define(base, &base_symbol, PropertyDescriptor::method("[base]"));

        let proto = graph.create(base);
        graph.define(proto, "constructor", PropertyDescriptor::method("Extend"));
        graph.define(proto, "extend", PropertyDescriptor::getter(|_, _| "Extend"));
        graph.define(proto, "getExtend", PropertyDescriptor::method("getExtend"));
        graph.define(proto, "overrideMe", PropertyDescriptor::method("noop"));
        graph.define(proto, &extend_symbol, PropertyDescriptor::method("[extend]"));

        let extend = graph.create(proto);
        graph.define(extend, &private, PropertyDescriptor::hidden("private"));
        graph.set(extend, &public, "public");
        graph.set(extend, "value", "extends");

        Fixture {
            graph,
            extend,
            base_symbol,
            public,
            private,
            extend_symbol,
        }
    }

    fn keys(fx: &Fixture, filter: KeyFilter) -> Vec<PropertyKey> {
        each_key(&fx.graph, fx.extend, filter).unwrap().collect()
    }

    fn name(name: &str) -> PropertyKey {
        PropertyKey::from(name)
    }

    fn sym(symbol: &Symbol) -> PropertyKey {
        PropertyKey::from(symbol)
    }

    #[test]
    fn test_enumerable_inherited_names() {
        let fx = fixture();
        let filter = KeyFilter::default().with_key_type(KeyType::Name);
        assert_eq!(keys(&fx, filter), vec![name("value")]);
    }

    #[test]
    fn test_enumerable_own_names() {
        let fx = fixture();
        let filter = KeyFilter::default().with_key_type(KeyType::Name).own();
        assert_eq!(keys(&fx, filter), vec![name("value")]);
    }

    #[test]
    fn test_defined_inherited_names() {
        let fx = fixture();
        let filter = KeyFilter::default().with_key_type(KeyType::Name).defined();
        assert_eq!(
            keys(&fx, filter),
            vec![
                name("value"),
                name("constructor"),
                name("extend"),
                name("getExtend"),
                name("overrideMe"),
                name("base"),
                name("getBase"),
            ]
        );
    }

    #[test]
    fn test_defined_own_names() {
        let fx = fixture();
        let filter = KeyFilter::new(KeyType::Name, false, true);
        assert_eq!(keys(&fx, filter), vec![name("value")]);
    }

    #[test]
    fn test_symbols() {
        let fx = fixture();
        let symbols = KeyFilter::default().with_key_type(KeyType::Symbol);

        assert_eq!(keys(&fx, symbols), vec![sym(&fx.public)]);
        assert_eq!(keys(&fx, symbols.own()), vec![sym(&fx.public)]);
        assert_eq!(
            keys(&fx, symbols.defined()),
            vec![
                sym(&fx.private),
                sym(&fx.public),
                sym(&fx.extend_symbol),
                sym(&fx.base_symbol),
            ]
        );
        assert_eq!(
            keys(&fx, symbols.defined().own()),
            vec![sym(&fx.private), sym(&fx.public)]
        );
    }

    #[test]
    fn test_all_keys() {
        let fx = fixture();
        let all = KeyFilter::default();

        assert_eq!(keys(&fx, all), vec![name("value"), sym(&fx.public)]);
        assert_eq!(keys(&fx, all.own()), vec![name("value"), sym(&fx.public)]);
        assert_eq!(
            keys(&fx, all.defined().own()),
            vec![name("value"), sym(&fx.private), sym(&fx.public)]
        );
        assert_eq!(
            keys(&fx, all.defined()),
            vec![
                name("value"),
                sym(&fx.private),
                sym(&fx.public),
                name("constructor"),
                name("extend"),
                name("getExtend"),
                name("overrideMe"),
                sym(&fx.extend_symbol),
                name("base"),
                name("getBase"),
                sym(&fx.base_symbol),
            ]
        );
    }

    #[test]
    fn test_shadowed_key_takes_own_descriptor() {
        let mut graph = ObjectGraph::new();
        let proto = graph.create(graph.root());
        graph.define(proto, "p", PropertyDescriptor::hidden("inherited"));
        let object = graph.create(proto);
        graph.set(object, "p", "own");

        let found: Vec<_> = each_descriptor(&graph, object, KeyFilter::default().defined())
            .unwrap()
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "p");
        assert_eq!(found[0].1.value(), Some(&"own"));
        assert!(found[0].1.is_enumerable());
    }

    #[test]
    fn test_hidden_override_hides_enumerable_inherited() {
        let mut graph = ObjectGraph::new();
        let proto = graph.create(graph.root());
        graph.set(proto, "p", "inherited");
        let object = graph.create(proto);
        graph.define(object, "p", PropertyDescriptor::hidden("own"));

        let found: Vec<_> = each_key(&graph, object, KeyFilter::default())
            .unwrap()
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_root_is_never_inspected() {
        let fx = fixture();
        let root_keys: Vec<_> = each_key(&fx.graph, fx.graph.root(), KeyFilter::default().defined())
            .unwrap()
            .collect();
        assert!(root_keys.is_empty());
        assert!(!keys(&fx, KeyFilter::default().defined()).contains(&name("toString")));
    }

    #[test]
    fn test_orphan_is_inspected() {
        let mut graph = ObjectGraph::new();
        let orphan = graph.create_orphan();
        graph.set(orphan, "x", 1);
        let found: Vec<_> = each_key(&graph, orphan, KeyFilter::default())
            .unwrap()
            .collect();
        assert_eq!(found, vec![name("x")]);
    }

    #[test]
    fn test_values_and_entries() {
        let fx = fixture();
        let values: Vec<_> = each_value(&fx.graph, fx.extend, KeyFilter::default())
            .unwrap()
            .collect();
        assert_eq!(values, vec![Some("extends"), Some("public")]);

        let entries: Vec<_> = each_entry(
            &fx.graph,
            fx.extend,
            KeyFilter::default().with_key_type(KeyType::Name).defined(),
        )
        .unwrap()
        .collect();
        assert_eq!(entries[0], (name("value"), Some("extends")));
        assert_eq!(entries[1], (name("constructor"), Some("Extend")));
        assert_eq!(entries[2], (name("extend"), Some("Extend")));
        assert_eq!(entries[5], (name("base"), Some("Base")));
    }

    #[test]
    fn test_cycle_fails_before_yielding() {
        let mut graph = ObjectGraph::new();
        let a = graph.create_orphan();
        let b = graph.create(a);
        graph.set(b, "x", 1);
        graph.set_prototype(a, Some(b));

        let err = each_key(&graph, b, KeyFilter::default()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::CycleDetected);

        // Own enumeration never walks past the first level.
        let own: Vec<_> = each_key(&graph, b, KeyFilter::default().own())
            .unwrap()
            .collect();
        assert_eq!(own, vec![name("x")]);
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(
            KeyFilter::default().to_string(),
            "KeyFilter(Key, enumerable, inherited)"
        );
        assert_eq!(
            KeyFilter::default().defined().own().to_string(),
            "KeyFilter(Key, defined, own)"
        );
    }
}
