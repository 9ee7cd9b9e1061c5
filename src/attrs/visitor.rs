//! The component/visitor seam of the attribute model.

use crate::attrs::descriptor::AttrDescriptor;
use crate::attrs::value::AttrValue;
use crate::errors::Result;

/// Dispatch target for attribute visits, one method per attribute kind.
///
/// Components call exactly one method per attribute, in declaration order.
/// Nested components arrive through [`AttrVisitor::visit_component`]; whether
/// and how to recurse is the visitor's decision, and the visitor tracks the
/// dot-joined path for diagnostics (see [`check`](crate::attrs::check),
/// [`map`](crate::attrs::map), and [`pretty`](crate::attrs::pretty)).
pub trait AttrVisitor {
    fn visit_bool(&mut self, desc: &AttrDescriptor, value: bool);
    fn visit_int(&mut self, desc: &AttrDescriptor, value: i64);
    fn visit_real(&mut self, desc: &AttrDescriptor, value: f64);
    fn visit_enum(&mut self, desc: &AttrDescriptor, value: &str);
    fn visit_str(&mut self, desc: &AttrDescriptor, value: &str);
    fn visit_str_list(&mut self, desc: &AttrDescriptor, value: &[String]);
    fn visit_component(&mut self, desc: &AttrDescriptor, component: &dyn AttrComponent);
}

/// A pluggable component exposing its configuration through the attribute
/// model.
///
/// # Contract
///
/// - `visit_attrs` emits every attribute exactly once, in declaration order,
///   and is free of side effects on the component.
/// - `bind_attr` sets one leaf attribute from a value; unknown keys and
///   type-mismatched values fail with
///   [`ClusterError::AttributeBinding`](crate::errors::ClusterError).
/// - `child_mut` exposes nested components for binding; it returns `None`
///   for keys that are not component-kind attributes.
pub trait AttrComponent {
    /// Visit every attribute of this component in declaration order.
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor);

    /// Bind one leaf attribute by key.
    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()>;

    /// Mutable access to a nested component attribute by key.
    fn child_mut(&mut self, key: &str) -> Option<&mut dyn AttrComponent>;
}
