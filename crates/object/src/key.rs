use std::fmt;

/// Key of a keyed container or name of an attribute.
///
/// Only [`Key::Str`] is textual; enumeration skips every other variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Key {
    /// Textual form of the key, if it has one
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    /// Representation used inside container reprs (`'a'`, `1`, `True`)
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Key::Str(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::None => f.write_str("None"),
            Key::Bool(true) => f.write_str("True"),
            Key::Bool(false) => f.write_str("False"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strings_are_textual() {
        assert_eq!(Key::from("a").as_str(), Some("a"));
        assert_eq!(Key::from(1).as_str(), None);
        assert!(!Key::Bool(true).is_textual());
        assert!(!Key::None.is_textual());
    }

    #[test]
    fn repr_quotes_strings() {
        assert_eq!(Key::from("a").repr(), "'a'");
        assert_eq!(Key::from(3).repr(), "3");
        assert_eq!(Key::Bool(false).repr(), "False");
    }
}
