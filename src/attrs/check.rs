//! Documentation check over the attribute tree.
//!
//! Walks the full tree and requires every leaf attribute descriptor to carry
//! a non-empty description. Violations are collected with their full dotted
//! paths instead of failing fast, so a single run reports all gaps.

use crate::attrs::descriptor::AttrDescriptor;
use crate::attrs::visitor::{AttrComponent, AttrVisitor};
use crate::errors::{ClusterError, Result};

/// Require a non-empty description on every leaf attribute of `component`
/// and all nested components.
///
/// Returns a single aggregate
/// [`ClusterError::DocumentationCheck`] listing every violating path.
pub fn check_documentation(component: &dyn AttrComponent) -> Result<()> {
    let mut checker = DocCheckVisitor::default();
    component.visit_attrs(&mut checker);

    if checker.violations.is_empty() {
        Ok(())
    } else {
        Err(ClusterError::documentation_check(checker.violations))
    }
}

#[derive(Default)]
struct DocCheckVisitor {
    path: Vec<&'static str>,
    violations: Vec<String>,
}

impl DocCheckVisitor {
    fn check_leaf(&mut self, desc: &AttrDescriptor) {
        if !desc.is_documented() {
            self.violations.push(self.joined(desc.key));
        }
    }

    fn joined(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path.join("."))
        }
    }
}

impl AttrVisitor for DocCheckVisitor {
    fn visit_bool(&mut self, desc: &AttrDescriptor, _value: bool) {
        self.check_leaf(desc);
    }

    fn visit_int(&mut self, desc: &AttrDescriptor, _value: i64) {
        self.check_leaf(desc);
    }

    fn visit_real(&mut self, desc: &AttrDescriptor, _value: f64) {
        self.check_leaf(desc);
    }

    fn visit_enum(&mut self, desc: &AttrDescriptor, _value: &str) {
        self.check_leaf(desc);
    }

    fn visit_str(&mut self, desc: &AttrDescriptor, _value: &str) {
        self.check_leaf(desc);
    }

    fn visit_str_list(&mut self, desc: &AttrDescriptor, _value: &[String]) {
        self.check_leaf(desc);
    }

    fn visit_component(&mut self, desc: &AttrDescriptor, component: &dyn AttrComponent) {
        self.path.push(desc.key);
        component.visit_attrs(self);
        self.path.pop();
    }
}
