//! Attribute descriptors: kind tags, descriptions, and constraints.

use serde::Serialize;

/// Tagged attribute kind.
///
/// An explicit enumeration replaces runtime type inspection: every attribute
/// declares exactly one kind, and visitors dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttrKind {
    Bool,
    Int,
    Real,
    Enum,
    Str,
    StrList,
    /// A nested component that recursively exposes its own attributes
    Component,
}

/// Constraint metadata attached to an attribute descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Inclusive integer range
    IntRange { min: i64, max: i64 },
    /// Inclusive real range
    RealRange { min: f64, max: f64 },
    /// Allowed values for an enum attribute
    EnumValues(Vec<&'static str>),
}

/// Metadata for one configurable attribute on a component.
///
/// Descriptors are attached at component-definition time and never mutated
/// at runtime, so they are built from `'static` data.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrDescriptor {
    /// Attribute key, unique within its component
    pub key: &'static str,
    /// Attribute kind
    pub kind: AttrKind,
    /// Human-readable description; required by the documentation check
    pub description: Option<&'static str>,
    /// Optional value constraint
    pub constraint: Option<Constraint>,
}

impl AttrDescriptor {
    /// Create a descriptor with no description or constraint
    pub fn new(key: &'static str, kind: AttrKind) -> Self {
        Self {
            key,
            kind,
            description: None,
            constraint: None,
        }
    }

    /// Builder method: attach a description
    pub fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Builder method: attach a constraint
    pub fn constrained(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Check whether the descriptor carries a non-empty description
    pub fn is_documented(&self) -> bool {
        self.description.map_or(false, |d| !d.trim().is_empty())
    }
}
