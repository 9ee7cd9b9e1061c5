//! Attribute model for pluggable components.
//!
//! Every pluggable component (tokenizer factory, pipeline stage, clustering
//! algorithm) describes its configurable attributes through an explicit
//! tagged-variant model instead of runtime reflection:
//!
//! - [`AttrDescriptor`] tags each attribute with an [`AttrKind`], an optional
//!   description, and constraint metadata.
//! - [`AttrComponent`] is the visit/bind seam every component implements.
//! - [`AttrVisitor`] dispatches per attribute kind; nested components recurse
//!   by explicit ownership, with the dot-joined path tracked by the visitor.
//!
//! Three operations are built on the visitor:
//!
//! - [`check_documentation`] — require a non-empty description on every leaf,
//!   collecting all violations into one aggregate failure.
//! - [`to_map`] / [`from_map`] — flatten to and rebuild from a dotted-path
//!   map, with names translated through a pluggable [`NameMapper`].
//! - [`pretty_print`] — nested human-readable rendering in declaration order.

pub mod check;
pub mod descriptor;
pub mod map;
pub mod pretty;
pub mod value;
pub mod visitor;

pub use check::check_documentation;
pub use descriptor::{AttrDescriptor, AttrKind, Constraint};
pub use map::{from_map, to_map, AttrMap, IdentityMapper, NameMapper};
pub use pretty::pretty_print;
pub use value::AttrValue;
pub use visitor::{AttrComponent, AttrVisitor};
