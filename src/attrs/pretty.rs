//! Human-readable rendering of an attribute tree.
//!
//! Output is purely diagnostic; the only behavioral contract is determinism
//! of ordering, which follows attribute declaration order.

use std::fmt::Write;

use crate::attrs::descriptor::AttrDescriptor;
use crate::attrs::visitor::{AttrComponent, AttrVisitor};

/// Render the attribute tree of `component` as nested key/value text.
///
/// ```text
/// name = "stem-grouping"
/// pipeline {
///   tokenize {
///     max_field_length = 0
///   }
/// }
/// ```
pub fn pretty_print(component: &dyn AttrComponent) -> String {
    let mut printer = PrettyVisitor {
        indent: 0,
        out: String::new(),
    };
    component.visit_attrs(&mut printer);
    printer.out
}

struct PrettyVisitor {
    indent: usize,
    out: String,
}

impl PrettyVisitor {
    fn line(&mut self, key: &str, value: impl std::fmt::Display) {
        let pad = "  ".repeat(self.indent);
        // Writing to a String cannot fail.
        let _ = writeln!(self.out, "{pad}{key} = {value}");
    }
}

impl AttrVisitor for PrettyVisitor {
    fn visit_bool(&mut self, desc: &AttrDescriptor, value: bool) {
        self.line(desc.key, value);
    }

    fn visit_int(&mut self, desc: &AttrDescriptor, value: i64) {
        self.line(desc.key, value);
    }

    fn visit_real(&mut self, desc: &AttrDescriptor, value: f64) {
        self.line(desc.key, value);
    }

    fn visit_enum(&mut self, desc: &AttrDescriptor, value: &str) {
        self.line(desc.key, value);
    }

    fn visit_str(&mut self, desc: &AttrDescriptor, value: &str) {
        self.line(desc.key, format!("{value:?}"));
    }

    fn visit_str_list(&mut self, desc: &AttrDescriptor, value: &[String]) {
        self.line(desc.key, format!("{value:?}"));
    }

    fn visit_component(&mut self, desc: &AttrDescriptor, component: &dyn AttrComponent) {
        let pad = "  ".repeat(self.indent);
        let _ = writeln!(self.out, "{pad}{} {{", desc.key);
        self.indent += 1;
        component.visit_attrs(self);
        self.indent -= 1;
        let _ = writeln!(self.out, "{pad}}}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::visitor::test_support::{Knobs, Outer};

    #[test]
    fn test_leaf_rendering() {
        let out = pretty_print(&Knobs::default());

        assert!(out.contains("enabled = true"));
        assert!(out.contains("count = 10"));
        assert!(out.contains("mode = fast"));
        assert!(out.contains("label = \"knobs\""));
    }

    #[test]
    fn test_nested_rendering_indents() {
        let outer = Outer {
            name: "outer".to_string(),
            knobs: Knobs::default(),
        };
        let out = pretty_print(&outer);

        assert!(out.contains("name = \"outer\""));
        assert!(out.contains("knobs {"));
        assert!(out.contains("  enabled = true"));
        assert!(out.contains("}"));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let out = pretty_print(&Knobs::default());
        let enabled_pos = out.find("enabled").unwrap();
        let count_pos = out.find("count").unwrap();
        let extras_pos = out.find("extras").unwrap();

        assert!(enabled_pos < count_pos);
        assert!(count_pos < extras_pos);
    }

    #[test]
    fn test_deterministic_output() {
        let outer = Outer::default();
        assert_eq!(pretty_print(&outer), pretty_print(&outer));
    }
}
