use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Marker closing a group whose elements were cut at `max_elements`
pub const TRUNCATION_MARKER: &str = "........";

/// Structural type summary of a value.
///
/// Serializes to the nested-list shape: a scalar is a string, a group is an
/// array whose first item is its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// `"int"`, `"list of 3 int"`, `"dict of 0"`
    Scalar(String),
    /// Label followed by element descriptions
    Group {
        label: String,
        children: Vec<TypeDescriptor>,
    },
    /// Stands for the elements left out of a truncated group
    Truncated,
}

impl TypeDescriptor {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar(name.into())
    }

    pub fn group(label: impl Into<String>, children: Vec<TypeDescriptor>) -> Self {
        Self::Group {
            label: label.into(),
            children,
        }
    }

    /// Structural length: the label plus each child for a group, 1 otherwise
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Group { children, .. } => 1 + children.len(),
            Self::Scalar(_) | Self::Truncated => 1,
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Scalar text, group label or the truncation marker
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Scalar(name) => name,
            Self::Group { label, .. } => label,
            Self::Truncated => TRUNCATION_MARKER,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[TypeDescriptor] {
        match self {
            Self::Group { children, .. } => children,
            Self::Scalar(_) | Self::Truncated => &[],
        }
    }

    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group { label, children } => {
                write!(f, "['{label}'")?;
                for child in children {
                    f.write_str(", ")?;
                    child.write_nested(f)?;
                }
                f.write_str("]")
            }
            other => write!(f, "'{}'", other.label()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group { .. } => self.write_nested(f),
            other => f.write_str(other.label()),
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Group { label, children } => {
                let mut seq = serializer.serialize_seq(Some(1 + children.len()))?;
                seq.serialize_element(label)?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            other => serializer.serialize_str(other.label()),
        }
    }
}
