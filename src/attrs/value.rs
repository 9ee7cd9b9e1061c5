//! Attribute values exchanged through `to_map` / `from_map`.

use crate::attrs::descriptor::AttrKind;
use crate::errors::{ClusterError, Result};
use serde::{Deserialize, Serialize};

/// A value for one leaf attribute.
///
/// Component-kind attributes never appear as values; nested components are
/// flattened into dotted-path leaf entries instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Enum(String),
    Str(String),
    StrList(Vec<String>),
}

impl AttrValue {
    /// The kind this value corresponds to
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Bool(_) => AttrKind::Bool,
            AttrValue::Int(_) => AttrKind::Int,
            AttrValue::Real(_) => AttrKind::Real,
            AttrValue::Enum(_) => AttrKind::Enum,
            AttrValue::Str(_) => AttrKind::Str,
            AttrValue::StrList(_) => AttrKind::StrList,
        }
    }

    /// Extract a bool, or fail with an [`ClusterError::AttributeBinding`]
    pub fn expect_bool(&self, path: &str) -> Result<bool> {
        match self {
            AttrValue::Bool(v) => Ok(*v),
            other => Err(type_mismatch(path, AttrKind::Bool, other)),
        }
    }

    /// Extract an integer, or fail with a binding error
    pub fn expect_int(&self, path: &str) -> Result<i64> {
        match self {
            AttrValue::Int(v) => Ok(*v),
            other => Err(type_mismatch(path, AttrKind::Int, other)),
        }
    }

    /// Extract a real, or fail with a binding error.
    /// Integers widen to reals; the reverse is a mismatch.
    pub fn expect_real(&self, path: &str) -> Result<f64> {
        match self {
            AttrValue::Real(v) => Ok(*v),
            AttrValue::Int(v) => Ok(*v as f64),
            other => Err(type_mismatch(path, AttrKind::Real, other)),
        }
    }

    /// Extract an enum value, or fail with a binding error
    pub fn expect_enum(&self, path: &str) -> Result<&str> {
        match self {
            AttrValue::Enum(v) => Ok(v),
            other => Err(type_mismatch(path, AttrKind::Enum, other)),
        }
    }

    /// Extract a string, or fail with a binding error
    pub fn expect_str(&self, path: &str) -> Result<&str> {
        match self {
            AttrValue::Str(v) => Ok(v),
            other => Err(type_mismatch(path, AttrKind::Str, other)),
        }
    }

    /// Extract a string list, or fail with a binding error
    pub fn expect_str_list(&self, path: &str) -> Result<&[String]> {
        match self {
            AttrValue::StrList(v) => Ok(v),
            other => Err(type_mismatch(path, AttrKind::StrList, other)),
        }
    }
}

fn type_mismatch(path: &str, expected: AttrKind, got: &AttrValue) -> ClusterError {
    ClusterError::attribute_binding(
        path,
        format!("expected {expected:?}, got {:?}", got.kind()),
    )
}
