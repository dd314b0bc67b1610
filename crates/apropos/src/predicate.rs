use crate::error::{AproposError, Result};
use grasp_object::{Category, TextError, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Node under test: its name (absent for positional children), the value,
/// and the category the registry gave it
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: Option<&'a str>,
    pub value: &'a Value,
    pub category: Category,
}

/// Decides whether a node matches the needle.
///
/// Returning [`AproposError::Text`] marks the node as "no match" and lets
/// the walk continue; any other error aborts the search.
pub trait Predicate {
    fn test(&self, needle: &str, candidate: &Candidate<'_>) -> Result<bool>;
}

impl<F> Predicate for F
where
    F: Fn(&str, Option<&str>, &Value) -> bool,
{
    fn test(&self, needle: &str, candidate: &Candidate<'_>) -> Result<bool> {
        Ok(self(needle, candidate.name, candidate.value))
    }
}

/// What part of a node the built-in predicates look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[default]
    Name,
    Value,
    Doc,
}

impl Field {
    /// Text to search, or `None` when the field does not apply to this node
    fn haystack<'a>(self, candidate: &Candidate<'a>) -> std::result::Result<Option<Cow<'a, str>>, TextError> {
        match self {
            Field::Name => Ok(candidate
                .name
                .filter(|name| !name.is_empty())
                .map(Cow::Borrowed)),
            // A container's text embeds its elements; let the walk find
            // them one level down instead of reporting the container.
            Field::Value if candidate.category.is_container() => Ok(None),
            Field::Value => candidate.value.text().map(|t| Some(Cow::Owned(t))),
            Field::Doc => match candidate.value.doc() {
                Some(doc @ (Value::Str(_) | Value::Bytes(_))) => {
                    let text = doc.text()?;
                    Ok((!text.is_empty()).then_some(Cow::Owned(text)))
                }
                _ => Ok(None),
            },
        }
    }
}

/// Substring containment on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal(pub Field);

impl Predicate for Literal {
    fn test(&self, needle: &str, candidate: &Candidate<'_>) -> Result<bool> {
        Ok(self
            .0
            .haystack(candidate)?
            .is_some_and(|hay| hay.contains(needle)))
    }
}

/// Pattern search (anywhere in the text) on one field
#[derive(Debug, Clone)]
pub struct Pattern {
    field: Field,
    regex: Regex,
}

impl Pattern {
    /// Compile `needle`; syntax errors are returned to the caller
    pub fn new(field: Field, needle: &str) -> Result<Self> {
        Ok(Self {
            field,
            regex: Regex::new(needle)?,
        })
    }
}

impl Predicate for Pattern {
    // The needle was compiled into `regex` up front.
    fn test(&self, _needle: &str, candidate: &Candidate<'_>) -> Result<bool> {
        Ok(self
            .field
            .haystack(candidate)?
            .is_some_and(|hay| self.regex.is_match(&hay)))
    }
}

/// The six built-in predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    #[default]
    Name,
    Value,
    Doc,
    NameRegex,
    ValueRegex,
    DocRegex,
}

impl PredicateKind {
    pub const ALL: [PredicateKind; 6] = [
        PredicateKind::Name,
        PredicateKind::Value,
        PredicateKind::Doc,
        PredicateKind::NameRegex,
        PredicateKind::ValueRegex,
        PredicateKind::DocRegex,
    ];

    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            PredicateKind::Name | PredicateKind::NameRegex => Field::Name,
            PredicateKind::Value | PredicateKind::ValueRegex => Field::Value,
            PredicateKind::Doc | PredicateKind::DocRegex => Field::Doc,
        }
    }

    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(
            self,
            PredicateKind::NameRegex | PredicateKind::ValueRegex | PredicateKind::DocRegex
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PredicateKind::Name => "name",
            PredicateKind::Value => "value",
            PredicateKind::Doc => "doc",
            PredicateKind::NameRegex => "name_regex",
            PredicateKind::ValueRegex => "value_regex",
            PredicateKind::DocRegex => "doc_regex",
        }
    }

    /// Predicate ready to test nodes against `needle`
    pub fn build(self, needle: &str) -> Result<Box<dyn Predicate>> {
        if self.is_pattern() {
            Ok(Box::new(Pattern::new(self.field(), needle)?))
        } else {
            Ok(Box::new(Literal(self.field())))
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredicateKind {
    type Err = AproposError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AproposError::UnknownPredicate(s.to_string()))
    }
}
