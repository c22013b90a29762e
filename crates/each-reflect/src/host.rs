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

//! # Reflection Capability
//!
//! The enumerator never touches an object model directly. Everything it needs
//! from a host environment is captured by two traits:
//!
//! - `Descriptor`: the metadata of one property. The enumerator only ever
//!   asks whether a property is enumerable; everything else is passed through
//!   to the caller unmodified.
//! - `Reflect`: per-level access to an object graph (own properties of one
//!   level, the parent level, whether a level is the universal root) plus a
//!   property read that may run accessors.
//!
//! Any host with native reflection facilities implements `Reflect`; the
//! workspace ships `ObjectGraph` as an in-memory reference host.

use crate::key::PropertyKey;
use smallvec::SmallVec;

/// The own properties of one object level, in host order.
pub type OwnProperties<D> = SmallVec<[(PropertyKey, D); 8]>;

/// Metadata of a single property.
pub trait Descriptor {
    /// Whether generic enumeration sees the property.
    fn is_enumerable(&self) -> bool;

    /// Whether the property may be redefined or deleted.
    fn is_configurable(&self) -> bool;

    /// Whether the property is backed by accessors rather than a value.
    fn is_accessor(&self) -> bool;

    /// Whether a data property may be assigned. `None` for accessors.
    fn is_writable(&self) -> Option<bool>;
}

/// Reflection primitives of a host object model.
pub trait Reflect {
    /// A handle to one object (one level of a prototype chain).
    type Object: Clone + Eq + std::hash::Hash;
    type Descriptor: Descriptor + Clone;
    type Value;

    /// The properties declared directly on `object`, in host order.
    fn own_properties(&self, object: &Self::Object) -> OwnProperties<Self::Descriptor>;

    /// The parent level of `object`, if any.
    fn prototype_of(&self, object: &Self::Object) -> Option<Self::Object>;

    /// Whether `object` is the universal base level of every chain.
    ///
    /// The root is yielded by chain walks but never inspected for properties.
    fn is_root(&self, object: &Self::Object) -> bool;

    /// Reads `key` through `object`, running an accessor with `object` as the
    /// receiver if the resolved property has one.
    fn get(&self, object: &Self::Object, key: &PropertyKey) -> Option<Self::Value>;
}

impl<R> Reflect for &R
where
    R: Reflect + ?Sized,
{
    type Object = R::Object;
    type Descriptor = R::Descriptor;
    type Value = R::Value;

    #[inline]
    fn own_properties(&self, object: &Self::Object) -> OwnProperties<Self::Descriptor> {
        (**self).own_properties(object)
    }

    #[inline]
    fn prototype_of(&self, object: &Self::Object) -> Option<Self::Object> {
        (**self).prototype_of(object)
    }

    #[inline]
    fn is_root(&self, object: &Self::Object) -> bool {
        (**self).is_root(object)
    }

    #[inline]
    fn get(&self, object: &Self::Object, key: &PropertyKey) -> Option<Self::Value> {
        (**self).get(object, key)
    }
}
