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

//! # In-Memory Object Graph
//!
//! A small arena-backed object model implementing `Reflect`. Objects are
//! addressed by `ObjectId`, carry an ordered list of own properties and an
//! optional prototype. A graph always owns a root object, the universal base
//! of every chain created with `create`; it is walked but never inspected.
//!
//! Properties are either data properties or accessors. Accessor getters are
//! closures called with the graph and the receiver (the object the read went
//! through), so a getter on a prototype sees the derived object.
//!
//! ## Usage
//!
//! ```rust
//! use each_reflect::graph::{ObjectGraph, PropertyDescriptor};
//! use each_reflect::host::Reflect;
//!
//! let mut graph = ObjectGraph::new();
//! let proto = graph.create(graph.root());
//! graph.define(proto, "kind", PropertyDescriptor::hidden("shape"));
//!
//! let circle = graph.create(proto);
//! graph.set(circle, "radius", "2");
//!
//! assert_eq!(graph.get(&circle, &"radius".into()), Some("2"));
//! assert_eq!(graph.get(&circle, &"kind".into()), Some("shape"));
//! assert_eq!(graph.prototype_of(&circle), Some(proto));
//! ```

use crate::{
    host::{Descriptor, OwnProperties, Reflect},
    key::PropertyKey,
};
use std::rc::Rc;

/// A handle to an object of an `ObjectGraph`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// A getter, called with the graph and the receiver of the read.
pub type Getter<V> = Rc<dyn Fn(&ObjectGraph<V>, ObjectId) -> V>;

/// How a property stores its value.
pub enum Slot<V> {
    Data { value: V, writable: bool },
    Accessor { get: Option<Getter<V>>, set: bool },
}

impl<V: Clone> Clone for Slot<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Data { value, writable } => Self::Data {
                value: value.clone(),
                writable: *writable,
            },
            Self::Accessor { get, set } => Self::Accessor {
                get: get.clone(),
                set: *set,
            },
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Slot<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data { value, writable } => f
                .debug_struct("Data")
                .field("value", value)
                .field("writable", writable)
                .finish(),
            Self::Accessor { get, set } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", set)
                .finish(),
        }
    }
}

/// Metadata and storage of one property of an `ObjectGraph`.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor<V> {
    pub slot: Slot<V>,
    pub enumerable: bool,
    pub configurable: bool,
}

impl<V> PropertyDescriptor<V> {
    /// An enumerable, writable, configurable data property, as created by a
    /// plain assignment.
    pub fn data(value: V) -> Self {
        Self {
            slot: Slot::Data {
                value,
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    /// A non-enumerable, read-only, non-configurable data property.
    pub fn hidden(value: V) -> Self {
        Self {
            slot: Slot::Data {
                value,
                writable: false,
            },
            enumerable: false,
            configurable: false,
        }
    }

    /// A non-enumerable, configurable method-like property.
    pub fn method(value: V) -> Self {
        Self {
            slot: Slot::Data {
                value,
                writable: true,
            },
            enumerable: false,
            configurable: true,
        }
    }

    /// A non-enumerable, configurable getter-only accessor.
    pub fn getter<F>(get: F) -> Self
    where
        F: Fn(&ObjectGraph<V>, ObjectId) -> V + 'static,
    {
        Self {
            slot: Slot::Accessor {
                get: Some(Rc::new(get)),
                set: false,
            },
            enumerable: false,
            configurable: true,
        }
    }

    #[inline]
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    #[inline]
    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    /// Returns the stored value of a data property.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match &self.slot {
            Slot::Data { value, .. } => Some(value),
            Slot::Accessor { .. } => None,
        }
    }
}

impl<V> Descriptor for PropertyDescriptor<V> {
    #[inline]
    fn is_enumerable(&self) -> bool {
        self.enumerable
    }

    #[inline]
    fn is_configurable(&self) -> bool {
        self.configurable
    }

    #[inline]
    fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor { .. })
    }

    #[inline]
    fn is_writable(&self) -> Option<bool> {
        match self.slot {
            Slot::Data { writable, .. } => Some(writable),
            Slot::Accessor { .. } => None,
        }
    }
}

struct ObjectData<V> {
    prototype: Option<ObjectId>,
    properties: Vec<(PropertyKey, PropertyDescriptor<V>)>,
}

/// An arena of objects with prototype links.
pub struct ObjectGraph<V> {
    objects: Vec<ObjectData<V>>,
    root: ObjectId,
}

impl<V> Default for ObjectGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ObjectGraph<V> {
    /// Creates a graph holding only the root object.
    pub fn new() -> Self {
        Self {
            objects: vec![ObjectData {
                prototype: None,
                properties: Vec::new(),
            }],
            root: ObjectId(0),
        }
    }

    /// The universal base object.
    #[inline]
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Number of objects, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always `false`: a graph owns at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Creates an object whose prototype is `prototype`.
    pub fn create(&mut self, prototype: ObjectId) -> ObjectId {
        self.insert(Some(prototype))
    }

    /// Creates an object without a prototype.
    ///
    /// An orphan is not the root, so its own properties are enumerated.
    pub fn create_orphan(&mut self) -> ObjectId {
        self.insert(None)
    }

    fn insert(&mut self, prototype: Option<ObjectId>) -> ObjectId {
        if let Some(prototype) = prototype {
            self.assert_owned(prototype, "create");
        }
        let id = ObjectId(self.objects.len());
        self.objects.push(ObjectData {
            prototype,
            properties: Vec::new(),
        });
        id
    }

    /// Replaces the prototype of `object`.
    ///
    /// Cycles are not rejected here; chain walks report them.
    pub fn set_prototype(&mut self, object: ObjectId, prototype: Option<ObjectId>) {
        if let Some(prototype) = prototype {
            self.assert_owned(prototype, "set_prototype");
        }
        self.data_mut(object).prototype = prototype;
    }

    /// Assigns an enumerable data property.
    pub fn set(&mut self, object: ObjectId, key: impl Into<PropertyKey>, value: V) {
        self.define(object, key, PropertyDescriptor::data(value));
    }

    /// Defines (or redefines in place) a property on `object`.
    ///
    /// Redefinition keeps the key's original position.
    pub fn define(
        &mut self,
        object: ObjectId,
        key: impl Into<PropertyKey>,
        descriptor: PropertyDescriptor<V>,
    ) {
        let key = key.into();
        let properties = &mut self.data_mut(object).properties;
        match properties.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = descriptor,
            None => properties.push((key, descriptor)),
        }
    }

    /// The descriptor declared directly on `object` for `key`.
    pub fn own_property(&self, object: ObjectId, key: &PropertyKey) -> Option<&PropertyDescriptor<V>> {
        self.data(object)
            .properties
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, descriptor)| descriptor)
    }

    /// Resolves `key` along the chain of `object`.
    ///
    /// The walk is bounded by the number of objects, so it terminates on
    /// cyclic chains.
    pub fn lookup(&self, object: ObjectId, key: &PropertyKey) -> Option<&PropertyDescriptor<V>> {
        let mut current = Some(object);
        for _ in 0..self.objects.len() {
            let level = current?;
            if let Some(descriptor) = self.own_property(level, key) {
                return Some(descriptor);
            }
            current = self.data(level).prototype;
        }
        None
    }

    #[inline]
    fn assert_owned(&self, object: ObjectId, operation: &str) {
        assert!(
            object.0 < self.objects.len(),
            "called `ObjectGraph::{}` with {} which does not belong to this graph",
            operation,
            object
        );
    }

    #[inline]
    fn data(&self, object: ObjectId) -> &ObjectData<V> {
        self.assert_owned(object, "data");
        &self.objects[object.0]
    }

    #[inline]
    fn data_mut(&mut self, object: ObjectId) -> &mut ObjectData<V> {
        self.assert_owned(object, "data_mut");
        &mut self.objects[object.0]
    }
}

impl<V> Reflect for ObjectGraph<V>
where
    V: Clone,
{
    type Object = ObjectId;
    type Descriptor = PropertyDescriptor<V>;
    type Value = V;

    fn own_properties(&self, object: &ObjectId) -> OwnProperties<PropertyDescriptor<V>> {
        self.data(*object).properties.iter().cloned().collect()
    }

    #[inline]
    fn prototype_of(&self, object: &ObjectId) -> Option<ObjectId> {
        self.data(*object).prototype
    }

    #[inline]
    fn is_root(&self, object: &ObjectId) -> bool {
        *object == self.root
    }

    fn get(&self, object: &ObjectId, key: &PropertyKey) -> Option<V> {
        match &self.lookup(*object, key)?.slot {
            Slot::Data { value, .. } => Some(value.clone()),
            Slot::Accessor { get, .. } => get.as_ref().map(|get| get(self, *object)),
        }
    }
}

impl<V> std::fmt::Debug for ObjectGraph<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectGraph")
            .field("objects", &self.objects.len())
            .field("root", &self.root)
            .finish()
    }
}
