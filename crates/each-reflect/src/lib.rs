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

//! # Each Reflect
//!
//! Property enumeration across prototype chains, written against an explicit
//! reflection capability instead of a concrete object model.
//!
//! ## Modules
//!
//! - `key`: `PropertyKey` (string name or identity-compared `Symbol`) and
//!   `KeyType`, the name/symbol selector.
//! - `host`: The `Reflect` capability (own properties of one level, parent
//!   level, root test, property read) and the `Descriptor` metadata trait.
//! - `chain`: `prototype_chain`, a lazy, cycle-aware walk over every level of
//!   a chain, root included.
//! - `enumerate`: `KeyFilter` and the de-duplicating enumerations
//!   `each_descriptor`, `each_key`, `each_value` and `each_entry`.
//! - `graph`: `ObjectGraph`, an in-memory reference host with data and
//!   accessor properties.
//!
//! Refer to each module for detailed APIs and examples.

pub mod chain;
pub mod enumerate;
pub mod graph;
pub mod host;
pub mod key;

pub use chain::{PrototypeChain, prototype_chain};
pub use enumerate::{KeyFilter, each_descriptor, each_entry, each_key, each_value, enumerate};
pub use graph::{ObjectGraph, ObjectId, PropertyDescriptor};
pub use host::{Descriptor, Reflect};
pub use key::{KeyType, PropertyKey, Symbol};
