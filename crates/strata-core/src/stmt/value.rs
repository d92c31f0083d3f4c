use chrono::{DateTime, Utc};

/// A single field value of a [`Record`](super::Record).
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// An instant in time
    DateTime(DateTime<Utc>),

    /// Floating point number
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of primitive values
    List(Vec<Value>),

    /// Null value. Null is a real value: it is kept by normalization and
    /// sent to the backend.
    #[default]
    Null,

    /// String value
    String(String),

    /// The field is absent. Unset fields are never sent to a backend; they
    /// mean "omit", not "set to null".
    Unset,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` when the value is neither null nor unset.
    pub const fn is_defined(&self) -> bool {
        !matches!(self, Self::Null | Self::Unset)
    }

    /// Truthiness as used by the search-engine partial update and the
    /// document-store upsert check: `false`, `0`, `NaN`, the empty string,
    /// null and unset are falsy; everything else, empty lists included, is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::I64(v) => *v != 0,
            Self::F64(v) => *v != 0.0 && !v.is_nan(),
            Self::String(v) => !v.is_empty(),
            Self::DateTime(_) | Self::List(_) => true,
            Self::Null | Self::Unset => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Renders a scalar as the text a backend uses for a document identifier.
    pub fn to_key_string(&self) -> Option<String> {
        match self {
            Self::String(v) => Some(v.clone()),
            Self::I64(v) => Some(v.to_string()),
            Self::F64(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::DateTime(v) => Some(v.to_rfc3339()),
            Self::List(_) | Self::Null | Self::Unset => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::I64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
