// field maps of mappings hash with seahash
use seahash::SeaHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

// containers are shared handles, so identity survives cloning
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// used to print out readable forms of a value
use std::fmt;

use lazy_static::lazy_static;

use crate::path::parse_index;

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

/// Pseudo-key that reads (and on a terminal write, re-points) the base of a mapping.
pub const PROTO_KEY: &str = "__proto__";
/// Read-only key of every sequence.
pub const LENGTH_KEY: &str = "length";
/// How many slots a single write may add to the end of a sequence.
pub const MAX_GROWTH: usize = 1 << 16;

// Fields every plain mapping inherits from the shared base.
const INHERITED: [&str; 7] = [
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

lazy_static! {
    static ref SHARED_BASE: Mapping = {
        let base = Mapping::bare();
        for name in INHERITED {
            base.insert(name, Value::Opaque(Opaque::new(name)));
        }
        base
    };
}

/// The single mapping that every [`Mapping::new`] delegates unresolved
/// lookups to. Writes through the path accessors never land here.
pub fn shared_base() -> Mapping {
    SHARED_BASE.clone()
}

// ------------- Value -------------
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Mapping(Mapping),
    Sequence(Sequence),
    Opaque(Opaque),
}

impl Value {
    pub fn opaque(label: &str) -> Self {
        Value::Opaque(Opaque::new(label))
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Mapping(_) | Value::Sequence(_))
    }
    /// Null, `false`, `0`, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Mapping(_) | Value::Sequence(_) | Value::Opaque(_) => true,
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
            Value::Opaque(_) => "opaque",
        }
    }
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    /// Reads `key` from a container, following the base chain of mappings.
    /// Primitives have no keys.
    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Value::Mapping(m) => m.lookup(key),
            Value::Sequence(s) => s.lookup(key),
            _ => None,
        }
    }
    /// Membership anywhere along the base chain.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Value::Mapping(m) => m.contains(key),
            Value::Sequence(s) => s.contains(key),
            _ => false,
        }
    }
    /// Membership on the container itself.
    pub fn contains_own(&self, key: &str) -> bool {
        match self {
            Value::Mapping(m) => m.contains_own(key),
            Value::Sequence(s) => s.contains(key),
            _ => false,
        }
    }

    /// Renders the value as JSON. The structure must be acyclic.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    Json::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n).map_or(Json::Null, Json::Number)
                }
            }
            Value::String(s) => Json::String(s.clone()),
            Value::Mapping(m) => {
                let mut object = serde_json::Map::new();
                for key in m.keys() {
                    if let Some(value) = m.get_own(&key) {
                        object.insert(key, value.to_json());
                    }
                }
                Json::Object(object)
            }
            Value::Sequence(s) => Json::Array(s.to_vec().iter().map(Value::to_json).collect()),
            Value::Opaque(o) => Json::String(o.label().to_owned()),
        }
    }
}

// Primitives compare by value, containers and opaques by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a.ptr_eq(b),
            (Value::Sequence(a), Value::Sequence(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Mapping(m) => m.fmt(f),
            Value::Sequence(s) => s.fmt(f),
            Value::Opaque(o) => o.fmt(f),
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(n.into()) }
}
impl From<usize> for Value {
    fn from(n: usize) -> Self { Value::Number(n as f64) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_owned()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}
impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self { Value::Mapping(m) }
}
impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self { Value::Sequence(s) }
}
impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self { Value::Sequence(Sequence::from(values)) }
}
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            Json::String(s) => Value::String(s),
            Json::Array(items) => items.into_iter().map(Value::from).collect::<Vec<_>>().into(),
            Json::Object(object) => {
                let mapping = Mapping::new();
                for (key, value) in object {
                    mapping.insert(&key, value.into());
                }
                Value::Mapping(mapping)
            }
        }
    }
}

// ------------- Mapping -------------
#[derive(Default)]
struct Fields {
    own: HashMap<String, Value, KeyHasher>,
    base: Option<Mapping>,
}

#[derive(Clone)]
pub struct Mapping(Arc<RwLock<Fields>>);

impl Mapping {
    /// A plain mapping, delegating to the shared base.
    pub fn new() -> Self {
        Self::with_base(&SHARED_BASE)
    }
    /// A mapping delegating to `base`.
    pub fn with_base(base: &Mapping) -> Self {
        Self(Arc::new(RwLock::new(Fields {
            own: HashMap::default(),
            base: Some(base.clone()),
        })))
    }
    /// A mapping without any base.
    pub fn bare() -> Self {
        Self(Arc::new(RwLock::new(Fields::default())))
    }

    // A poisoned lock still guards consistent data: every write is a single
    // map operation.
    fn read(&self) -> RwLockReadGuard<'_, Fields> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> RwLockWriteGuard<'_, Fields> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
    pub fn is_shared_base(&self) -> bool {
        self.ptr_eq(&SHARED_BASE)
    }
    pub fn base(&self) -> Option<Mapping> {
        self.read().base.clone()
    }
    /// Re-points the base. Refuses (returning false) when the new chain
    /// would lead back to this mapping.
    pub fn set_base(&self, base: Option<Mapping>) -> bool {
        let mut cursor = base.clone();
        while let Some(link) = cursor {
            if link.ptr_eq(self) {
                return false;
            }
            cursor = link.base();
        }
        self.write().base = base;
        true
    }

    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.read().own.get(key).cloned()
    }
    pub fn lookup(&self, key: &str) -> Option<Value> {
        if key == PROTO_KEY {
            return self.base().map(Value::Mapping);
        }
        let mut cursor = Some(self.clone());
        while let Some(mapping) = cursor {
            if let Some(value) = mapping.get_own(key) {
                return Some(value);
            }
            cursor = mapping.base();
        }
        None
    }
    pub fn contains_own(&self, key: &str) -> bool {
        self.read().own.contains_key(key)
    }
    pub fn contains(&self, key: &str) -> bool {
        if key == PROTO_KEY {
            return self.base().is_some();
        }
        let mut cursor = Some(self.clone());
        while let Some(mapping) = cursor {
            if mapping.contains_own(key) {
                return true;
            }
            cursor = mapping.base();
        }
        false
    }

    /// Re-points the base from a value: a mapping becomes the new base and
    /// Null removes it. Anything else, or a mapping that would close a
    /// cycle, is refused with false.
    pub fn assign_base(&self, value: &Value) -> bool {
        match value {
            Value::Mapping(base) => self.set_base(Some(base.clone())),
            Value::Null => self.set_base(None),
            _ => false,
        }
    }

    /// Stores `value` under `key`, returning what was there before.
    /// Writing [`PROTO_KEY`] goes through [`Mapping::assign_base`] instead,
    /// and a refused base is dropped.
    pub fn insert(&self, key: &str, value: Value) -> Option<Value> {
        if key == PROTO_KEY {
            let previous = self.base().map(Value::Mapping);
            self.assign_base(&value);
            return previous;
        }
        self.write().own.insert(key.to_owned(), value)
    }
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write().own.remove(key)
    }
    pub fn len(&self) -> usize {
        self.read().own.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Own keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().own.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for Mapping {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_shared_base() {
            return write!(f, "SharedBase");
        }
        let fields = self.read();
        let mut keys: Vec<&String> = fields.own.keys().collect();
        keys.sort_unstable();
        f.debug_map()
            .entries(keys.into_iter().map(|k| (k, &fields.own[k])))
            .finish()
    }
}

// ------------- Sequence -------------
/// Sequences have no base chain: their only keys are indices below the
/// length and [`LENGTH_KEY`], whether or not inherited keys are asked for.
#[derive(Clone, Default)]
pub struct Sequence(Arc<RwLock<Vec<Value>>>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }
    fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
    pub fn len(&self) -> usize {
        self.read().len()
    }
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }
    /// Assigns at `index`, growing the sequence with Null holes if needed.
    /// Returns false, leaving the sequence alone, when `index` lies more
    /// than [`MAX_GROWTH`] past the end.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let mut items = self.write();
        if index >= items.len() {
            let within = items.len().checked_add(MAX_GROWTH).is_some_and(|limit| index < limit);
            let Some(len) = index.checked_add(1).filter(|_| within) else {
                return false;
            };
            items.resize(len, Value::Null);
        }
        items[index] = value;
        true
    }
    pub fn push(&self, value: Value) {
        self.write().push(value);
    }
    /// Shallow copy of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.read().clone()
    }
    pub fn lookup(&self, key: &str) -> Option<Value> {
        if key == LENGTH_KEY {
            return Some(self.len().into());
        }
        parse_index(key).and_then(|index| self.get(index))
    }
    pub fn contains(&self, key: &str) -> bool {
        key == LENGTH_KEY || parse_index(key).is_some_and(|index| index < self.len())
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(values)))
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.read().iter()).finish()
    }
}

// ------------- Opaque -------------
/// A non-traversable payload (a function, a handle) known only by its label.
#[derive(Clone)]
pub struct Opaque(Arc<str>);

impl Opaque {
    pub fn new(label: &str) -> Self {
        Self(Arc::from(label))
    }
    pub fn label(&self) -> &str {
        &self.0
    }
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Opaque({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_mappings_delegate_to_the_shared_base() {
        let m = Mapping::new();
        assert!(m.base().is_some_and(|b| b.is_shared_base()));
        assert!(m.contains("toString"));
        assert!(!m.contains_own("toString"));
        assert!(!Mapping::bare().contains("toString"));
    }

    #[test]
    fn lookup_walks_the_base_chain() {
        let base = Mapping::bare();
        base.insert("h", true.into());
        let m = Mapping::with_base(&base);
        assert_eq!(m.lookup("h"), Some(Value::Bool(true)));
        assert_eq!(m.get_own("h"), None);
        assert_eq!(m.lookup(PROTO_KEY), Some(Value::Mapping(base)));
    }

    #[test]
    fn set_base_refuses_cycles() {
        let a = Mapping::bare();
        let b = Mapping::with_base(&a);
        assert!(!a.set_base(Some(b.clone())));
        assert!(a.base().is_none());
        assert!(b.set_base(None));
    }

    #[test]
    fn containers_compare_by_identity() {
        let m = Mapping::new();
        assert_eq!(Value::Mapping(m.clone()), Value::Mapping(m));
        assert_ne!(Value::Mapping(Mapping::new()), Value::Mapping(Mapping::new()));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::from("a"), Value::from("a"));
    }

    #[test]
    fn sequence_set_fills_holes_with_null() {
        let s = Sequence::new();
        assert!(s.set(2, 7.into()));
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(0), Some(Value::Null));
        assert_eq!(s.lookup("length"), Some(Value::Number(3.0)));
        assert!(s.contains("2"));
        assert!(!s.contains("3"));
    }

    #[test]
    fn sequence_set_refuses_far_indices() {
        let s = Sequence::from(vec![Value::Null]);
        assert!(!s.set(usize::MAX, 1.into()));
        assert!(!s.set(1 + MAX_GROWTH, 1.into()));
        assert_eq!(s.len(), 1);
        assert!(s.set(MAX_GROWTH, 1.into()));
        assert_eq!(s.len(), MAX_GROWTH + 1);
    }

    #[test]
    fn assign_base_reports_refusal() {
        let a = Mapping::bare();
        let b = Mapping::with_base(&a);
        assert!(!a.assign_base(&Value::Mapping(b)));
        assert!(!a.assign_base(&Value::from(5)));
        assert!(a.base().is_none());
        let c = Mapping::bare();
        assert!(a.assign_base(&Value::Mapping(c.clone())));
        assert!(a.base().is_some_and(|base| base.ptr_eq(&c)));
        assert!(a.assign_base(&Value::Null));
        assert!(a.base().is_none());
    }

    #[test]
    fn truthiness() {
        for falsy in [Value::Null, false.into(), 0.into(), f64::NAN.into(), "".into()] {
            assert!(!falsy.is_truthy(), "{falsy:?} should be falsy");
        }
        for truthy in [Value::from(1), "x".into(), Mapping::new().into(), Value::opaque("f")] {
            assert!(truthy.is_truthy(), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn json_round_trip() {
        let doc = json!({"a": [1, 2.5, {"b": null}], "c": "d", "e": true});
        assert_eq!(Value::from(doc.clone()).to_json(), doc);
    }
}
