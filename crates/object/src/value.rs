use crate::key::Key;
use crate::object::Object;
use ndarray::{ArrayD, IxDyn, ShapeError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Shared, growable sequence. Cloning the handle shares the list.
pub type SharedList = Arc<RwLock<Vec<Value>>>;

/// Shared keyed container. Cloning the handle shares the mapping.
pub type SharedDict = Arc<RwLock<Entries>>;

/// Insertion-ordered `Key -> Value` entries
#[derive(Debug, Clone, Default)]
pub struct Entries {
    items: Vec<(Key, Value)>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous value for `key`
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.items.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let idx = self.items.iter().position(|(k, _)| k == key)?;
        Some(self.items.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.items.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.items.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k.into(), v.into());
        }
        entries
    }
}

/// A runtime value under inspection.
///
/// Scalars are held inline; composites are reference-counted so that the
/// same container can be reachable from several parents (or from itself).
/// [`Value::identity`] exposes the address of that shared allocation.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Str(Arc<str>),
    /// Raw bytes; their text form needs UTF-8 decoding and may fail
    Bytes(Arc<[u8]>),
    List(SharedList),
    Tuple(Arc<[Value]>),
    Dict(SharedDict),
    Set(Arc<[Value]>),
    FrozenSet(Arc<[Value]>),
    Array(Arc<ArrayD<Value>>),
    Object(Arc<dyn Object>),
    /// Sentinel left behind by a failed attribute read
    Exception(Arc<str>),
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Value::Bytes(Arc::from(b.as_ref()))
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(Arc::new(RwLock::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn frozenset<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::FrozenSet(items.into_iter().map(Into::into).collect())
    }

    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Dict(Arc::new(RwLock::new(entries.into_iter().collect())))
    }

    /// Array-like value with the given dimensions, elements in row-major order
    pub fn array(shape: &[usize], elements: Vec<Value>) -> Result<Self, ShapeError> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), elements)?;
        Ok(Value::Array(Arc::new(array)))
    }

    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    pub fn exception(message: impl AsRef<str>) -> Self {
        Value::Exception(Arc::from(message.as_ref()))
    }

    /// Append to a list; returns false for anything that is not a list
    pub fn push(&self, item: impl Into<Value>) -> bool {
        match self {
            Value::List(list) => {
                list.write().push(item.into());
                true
            }
            _ => false,
        }
    }

    /// Insert into a dict; returns false for anything that is not a dict
    pub fn insert(&self, key: impl Into<Key>, item: impl Into<Value>) -> bool {
        match self {
            Value::Dict(dict) => {
                dict.write().insert(key.into(), item.into());
                true
            }
            _ => false,
        }
    }

    /// Runtime type name
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Complex { .. } => "complex",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Array(_) => "ndarray",
            Value::Object(object) => object.type_name(),
            Value::Exception(_) => "Exception",
        }
    }

    /// Identity of a shared value (address of its allocation); scalars have none
    #[must_use]
    pub fn identity(&self) -> Option<usize> {
        let ptr = match self {
            Value::List(list) => Arc::as_ptr(list).cast::<()>(),
            Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => {
                Arc::as_ptr(items).cast::<()>()
            }
            Value::Dict(dict) => Arc::as_ptr(dict).cast::<()>(),
            Value::Array(array) => Arc::as_ptr(array).cast::<()>(),
            Value::Object(object) => Arc::as_ptr(object).cast::<()>(),
            _ => return None,
        };
        Some(ptr as usize)
    }

    /// Same shared allocation (never true for scalars)
    #[must_use]
    pub fn is_same(&self, other: &Value) -> bool {
        matches!((self.identity(), other.identity()), (Some(a), Some(b)) if a == b)
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Value::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }

    /// Name the value declares for itself (modules, named objects)
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        self.as_object().and_then(Object::declared_name)
    }

    /// Documentation attached to the value, if any
    #[must_use]
    pub fn doc(&self) -> Option<Value> {
        self.as_object().and_then(Object::doc)
    }

    /// Number of elements for containers
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(list.read().len()),
            Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => Some(items.len()),
            Value::Dict(dict) => Some(dict.read().len()),
            Value::Array(array) => Some(array.len()),
            Value::Object(object) => object
                .as_sequence()
                .map(|seq| seq.len())
                .or_else(|| object.as_mapping().map(|map| map.keys().len())),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    // Shallow on purpose: composites may contain themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Complex { re, im } => write!(f, "Complex({re:?}, {im:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Value::Exception(msg) => write!(f, "Exception({msg:?})"),
            Value::Object(object) => write!(f, "<{} object>", object.type_name()),
            composite => write!(
                f,
                "<{} of {} @{:#x}>",
                composite.type_name(),
                composite.len().unwrap_or(0),
                composite.identity().unwrap_or(0)
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::None
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_have_no_identity() {
        assert_eq!(Value::from(1).identity(), None);
        assert_eq!(Value::str("x").identity(), None);
        assert!(!Value::from(1).is_same(&Value::from(1)));
    }

    #[test]
    fn clones_share_identity() {
        let list = Value::list([1, 2]);
        let alias = list.clone();
        assert!(list.is_same(&alias));
        assert!(!list.is_same(&Value::list([1, 2])));
    }

    #[test]
    fn push_builds_cycles() {
        let list = Value::list(Vec::<Value>::new());
        assert!(list.push(list.clone()));
        assert_eq!(list.len(), Some(1));
        assert!(!Value::from(1).push(2));
    }

    #[test]
    fn entries_replace_in_place() {
        let mut entries = Entries::new();
        entries.insert(Key::from("a"), Value::from(1));
        entries.insert(Key::from("b"), Value::from(2));
        let previous = entries.insert(Key::from("a"), Value::from(3));
        assert!(matches!(previous, Some(Value::Int(1))));
        let keys: Vec<_> = entries.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("a"), Key::from("b")]);
        assert!(matches!(entries.remove(&Key::from("b")), Some(Value::Int(2))));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn type_names_follow_runtime_kinds() {
        assert_eq!(Value::None.type_name(), "NoneType");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::tuple([1]).type_name(), "tuple");
        assert_eq!(Value::frozenset([1]).type_name(), "frozenset");
        let array = Value::array(&[2], vec![Value::from(1), Value::from(2)]).expect("shape");
        assert_eq!(array.type_name(), "ndarray");
        assert_eq!(array.len(), Some(2));
    }

    #[test]
    fn array_rejects_mismatched_shape() {
        assert!(Value::array(&[3], vec![Value::from(1)]).is_err());
    }

    #[test]
    fn debug_of_self_containing_list_terminates() {
        let list = Value::list(Vec::<Value>::new());
        list.push(list.clone());
        assert!(format!("{list:?}").starts_with("<list of 1"));
    }
}
