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

//! Key views over any number of objects.
//!
//! A [`KeyView`] is a [`KeyFilter`] without a key type: it fixes visibility
//! and ownership, and each `*_of` method picks the key type and the shape of
//! the yielded items. Views start as enumerable and inherited; `own()` and
//! `defined()` flip one setting each and commute.
//!
//! ```rust
//! use each::{ObjectGraph, PropertyDescriptor, keys};
//!
//! let mut graph = ObjectGraph::new();
//! let parent = graph.create(graph.root());
//! graph.set(parent, "inherited", 1);
//! let child = graph.create(parent);
//! graph.set(child, "own", 2);
//! graph.define(child, "hidden", PropertyDescriptor::hidden(3));
//!
//! let names: Vec<_> = keys().name_of(&graph, [child]).unwrap().into_iter().collect();
//! assert_eq!(names, ["own", "inherited"]);
//!
//! let own: Vec<_> = keys()
//!     .own()
//!     .defined()
//!     .name_of(&graph, [child])
//!     .unwrap()
//!     .into_iter()
//!     .collect();
//! assert_eq!(own, ["own", "hidden"]);
//! ```

use each_core::error::Result;
use each_iter::Each;
use each_reflect::{
    KeyFilter, KeyType, PropertyKey, Reflect, each_descriptor, each_entry, each_key, each_value,
};

/// Visibility and ownership settings shared by every `*_of` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyView {
    filter: KeyFilter,
}

/// The default view: enumerable keys, inherited ones included.
#[inline]
pub fn keys() -> KeyView {
    KeyView::default()
}

impl KeyView {
    /// Restricts the view to the object's own level.
    #[inline]
    pub fn own(self) -> Self {
        Self {
            filter: self.filter.own(),
        }
    }

    /// Includes non-enumerable properties.
    #[inline]
    pub fn defined(self) -> Self {
        Self {
            filter: self.filter.defined(),
        }
    }

    /// The filter applied for `key_type`.
    #[inline]
    pub fn filter(&self, key_type: KeyType) -> KeyFilter {
        self.filter.with_key_type(key_type)
    }

    /// Keys of every object in turn, names and symbols alike.
    ///
    /// # Errors
    ///
    /// `CycleDetected` if a walked prototype chain loops. Every chain is
    /// checked before the sequence is returned.
    pub fn key_of<'h, H, I>(&self, host: &'h H, objects: I) -> Result<Each<'h, PropertyKey>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        self.keys_of(host, objects, KeyType::Key)
    }

    /// String-named keys of every object in turn.
    ///
    /// # Errors
    ///
    /// See [`KeyView::key_of`].
    pub fn name_of<'h, H, I>(&self, host: &'h H, objects: I) -> Result<Each<'h, PropertyKey>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        self.keys_of(host, objects, KeyType::Name)
    }

    /// Symbol keys of every object in turn.
    ///
    /// # Errors
    ///
    /// See [`KeyView::key_of`].
    pub fn symbol_of<'h, H, I>(&self, host: &'h H, objects: I) -> Result<Each<'h, PropertyKey>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        self.keys_of(host, objects, KeyType::Symbol)
    }

    fn keys_of<'h, H, I>(
        &self,
        host: &'h H,
        objects: I,
        key_type: KeyType,
    ) -> Result<Each<'h, PropertyKey>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        let filter = self.filter(key_type);
        let mut sequence = Each::new();
        for object in objects {
            sequence.push_source(each_key(host, object, filter)?);
        }
        Ok(sequence)
    }

    /// Values read through every object in turn.
    ///
    /// A `None` item is an accessor property without a getter.
    ///
    /// # Errors
    ///
    /// See [`KeyView::key_of`].
    pub fn value_of<'h, H, I>(&self, host: &'h H, objects: I) -> Result<Each<'h, Option<H::Value>>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        let filter = self.filter(KeyType::Key);
        let mut sequence = Each::new();
        for object in objects {
            sequence.push_source(each_value(host, object, filter)?);
        }
        Ok(sequence)
    }

    /// `(key, value)` pairs of every object in turn.
    ///
    /// # Errors
    ///
    /// See [`KeyView::key_of`].
    pub fn entry_of<'h, H, I>(
        &self,
        host: &'h H,
        objects: I,
    ) -> Result<Each<'h, (PropertyKey, Option<H::Value>)>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        let filter = self.filter(KeyType::Key);
        let mut sequence = Each::new();
        for object in objects {
            sequence.push_source(each_entry(host, object, filter)?);
        }
        Ok(sequence)
    }

    /// `(key, descriptor)` pairs of every object in turn.
    ///
    /// # Errors
    ///
    /// See [`KeyView::key_of`].
    pub fn descriptor_of<'h, H, I>(
        &self,
        host: &'h H,
        objects: I,
    ) -> Result<Each<'h, (PropertyKey, H::Descriptor)>>
    where
        H: Reflect + ?Sized,
        I: IntoIterator<Item = H::Object>,
    {
        let filter = self.filter(KeyType::Key);
        let mut sequence = Each::new();
        for object in objects {
            sequence.push_source(each_descriptor(host, object, filter)?);
        }
        Ok(sequence)
    }
}

impl From<KeyFilter> for KeyView {
    /// Keeps visibility and ownership; the key type is chosen per call.
    #[inline]
    fn from(filter: KeyFilter) -> Self {
        Self { filter }
    }
}

impl std::fmt::Display for KeyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KeyView({}, {})",
            if self.filter.enumerable { "enumerable" } else { "defined" },
            if self.filter.own { "own" } else { "inherited" }
        )
    }
}
