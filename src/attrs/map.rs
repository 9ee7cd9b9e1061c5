//! Flattening the attribute tree to a map and rebuilding it.
//!
//! `to_map` walks the tree and emits one entry per leaf attribute, keyed by
//! the dot-joined path translated through a pluggable [`NameMapper`].
//! `from_map` reverses the translation and binds each entry back onto the
//! component, descending through nested components by path segment.
//!
//! # Round-trip law
//!
//! For any component `c`, `from_map(&mut c2, &to_map(&c, m), m)` must leave
//! `c2` in a state where `to_map(&c2, m) == to_map(&c, m)`.
//!
//! # Informational entries
//!
//! Keys beginning with `@` (e.g. `@title`) are informational and ignored by
//! `from_map`. Any other unknown key fails with an attribute binding error.

use std::collections::BTreeMap;

use crate::attrs::descriptor::AttrDescriptor;
use crate::attrs::value::AttrValue;
use crate::attrs::visitor::{AttrComponent, AttrVisitor};
use crate::errors::{ClusterError, Result};

/// Flattened attribute map: external name to leaf value.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// Prefix marking informational map entries that `from_map` skips.
const INFO_PREFIX: char = '@';

// ─── Name mapping ───────────────────────────────────────────────────────────

/// Converts between in-process dotted attribute paths and an external
/// naming convention.
pub trait NameMapper {
    /// Map an internal dotted path to its external name.
    fn to_external(&self, path: &str) -> String;

    /// Map an external name back to the internal dotted path.
    fn to_internal(&self, name: &str) -> String;
}

/// The default mapper: external names are the internal paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl NameMapper for IdentityMapper {
    fn to_external(&self, path: &str) -> String {
        path.to_string()
    }

    fn to_internal(&self, name: &str) -> String {
        name.to_string()
    }
}

// ─── to_map ─────────────────────────────────────────────────────────────────

/// Flatten the attribute tree of `component` into an [`AttrMap`].
pub fn to_map(component: &dyn AttrComponent, mapper: &dyn NameMapper) -> AttrMap {
    let mut visitor = ToMapVisitor {
        path: Vec::new(),
        map: AttrMap::new(),
        mapper,
    };
    component.visit_attrs(&mut visitor);
    visitor.map
}

struct ToMapVisitor<'m> {
    path: Vec<&'static str>,
    map: AttrMap,
    mapper: &'m dyn NameMapper,
}

impl ToMapVisitor<'_> {
    fn insert(&mut self, key: &str, value: AttrValue) {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path.join("."))
        };
        self.map.insert(self.mapper.to_external(&path), value);
    }
}

impl AttrVisitor for ToMapVisitor<'_> {
    fn visit_bool(&mut self, desc: &AttrDescriptor, value: bool) {
        self.insert(desc.key, AttrValue::Bool(value));
    }

    fn visit_int(&mut self, desc: &AttrDescriptor, value: i64) {
        self.insert(desc.key, AttrValue::Int(value));
    }

    fn visit_real(&mut self, desc: &AttrDescriptor, value: f64) {
        self.insert(desc.key, AttrValue::Real(value));
    }

    fn visit_enum(&mut self, desc: &AttrDescriptor, value: &str) {
        self.insert(desc.key, AttrValue::Enum(value.to_string()));
    }

    fn visit_str(&mut self, desc: &AttrDescriptor, value: &str) {
        self.insert(desc.key, AttrValue::Str(value.to_string()));
    }

    fn visit_str_list(&mut self, desc: &AttrDescriptor, value: &[String]) {
        self.insert(desc.key, AttrValue::StrList(value.to_vec()));
    }

    fn visit_component(&mut self, desc: &AttrDescriptor, component: &dyn AttrComponent) {
        self.path.push(desc.key);
        component.visit_attrs(self);
        self.path.pop();
    }
}

// ─── from_map ───────────────────────────────────────────────────────────────

/// Bind every entry of `map` onto `component`.
///
/// Unknown keys and type-mismatched values fail with
/// [`ClusterError::AttributeBinding`]; informational `@`-prefixed entries
/// are skipped. Entries are applied in map order; on error, earlier entries
/// may already have been bound.
pub fn from_map(
    component: &mut dyn AttrComponent,
    map: &AttrMap,
    mapper: &dyn NameMapper,
) -> Result<()> {
    for (name, value) in map {
        if name.starts_with(INFO_PREFIX) {
            continue;
        }

        let path = mapper.to_internal(name);
        bind_path(component, &path, value)?;
    }
    Ok(())
}

/// Descend through nested components along `path` and bind the leaf.
fn bind_path(component: &mut dyn AttrComponent, path: &str, value: &AttrValue) -> Result<()> {
    let mut current = component;
    let mut rest = path;

    while let Some((head, tail)) = rest.split_once('.') {
        current = current.child_mut(head).ok_or_else(|| {
            ClusterError::attribute_binding(path, format!("unknown component '{head}'"))
        })?;
        rest = tail;
    }

    current.bind_attr(rest, value).map_err(|err| match err {
        // Re-anchor leaf-level errors at the full dotted path.
        ClusterError::AttributeBinding { message, .. } => {
            ClusterError::attribute_binding(path, message)
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::visitor::test_support::{Knobs, Outer};

    #[test]
    fn test_to_map_flattens_nested_paths() {
        let outer = Outer {
            name: "outer".to_string(),
            knobs: Knobs::default(),
        };

        let map = to_map(&outer, &IdentityMapper);

        assert_eq!(map["name"], AttrValue::Str("outer".to_string()));
        assert_eq!(map["knobs.enabled"], AttrValue::Bool(true));
        assert_eq!(map["knobs.count"], AttrValue::Int(10));
        assert_eq!(map["knobs.mode"], AttrValue::Enum("fast".to_string()));
        assert_eq!(map.len(), 7); // 1 own leaf + 6 nested leaves
    }

    #[test]
    fn test_round_trip_law() {
        let original = Outer {
            name: "configured".to_string(),
            knobs: Knobs {
                enabled: false,
                count: 3,
                threshold: 0.9,
                mode: "exact".to_string(),
                label: "tuned".to_string(),
                extras: vec!["x".to_string(), "y".to_string()],
            },
        };

        let map = to_map(&original, &IdentityMapper);

        let mut rebuilt = Outer::default();
        from_map(&mut rebuilt, &map, &IdentityMapper).unwrap();

        assert_eq!(to_map(&rebuilt, &IdentityMapper), map);
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_unknown_key_fails() {
        let mut outer = Outer::default();
        let mut map = AttrMap::new();
        map.insert("knobs.nonexistent".to_string(), AttrValue::Bool(true));

        let err = from_map(&mut outer, &map, &IdentityMapper).unwrap_err();
        match err {
            ClusterError::AttributeBinding { path, .. } => {
                assert_eq!(path, "knobs.nonexistent");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_component_segment_fails() {
        let mut outer = Outer::default();
        let mut map = AttrMap::new();
        map.insert("widgets.count".to_string(), AttrValue::Int(1));

        let err = from_map(&mut outer, &map, &IdentityMapper).unwrap_err();
        assert!(err.to_string().contains("widgets"));
    }

    #[test]
    fn test_type_mismatch_fails_with_full_path() {
        let mut outer = Outer::default();
        let mut map = AttrMap::new();
        map.insert("knobs.count".to_string(), AttrValue::Str("ten".to_string()));

        let err = from_map(&mut outer, &map, &IdentityMapper).unwrap_err();
        match err {
            ClusterError::AttributeBinding { path, message } => {
                assert_eq!(path, "knobs.count");
                assert!(message.contains("Int"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_informational_entries_ignored() {
        let mut outer = Outer::default();
        let mut map = AttrMap::new();
        map.insert("@title".to_string(), AttrValue::Str("Saved config".to_string()));
        map.insert("name".to_string(), AttrValue::Str("renamed".to_string()));

        from_map(&mut outer, &map, &IdentityMapper).unwrap();
        assert_eq!(outer.name, "renamed");
    }

    #[test]
    fn test_custom_name_mapper() {
        /// Maps dots to slashes for an external convention.
        struct SlashMapper;

        impl NameMapper for SlashMapper {
            fn to_external(&self, path: &str) -> String {
                path.replace('.', "/")
            }

            fn to_internal(&self, name: &str) -> String {
                name.replace('/', ".")
            }
        }

        let outer = Outer::default();
        let map = to_map(&outer, &SlashMapper);
        assert!(map.contains_key("knobs/count"));

        let mut rebuilt = Outer::default();
        from_map(&mut rebuilt, &map, &SlashMapper).unwrap();
        assert_eq!(to_map(&rebuilt, &SlashMapper), map);
    }
}
