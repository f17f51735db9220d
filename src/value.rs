use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::BTreeMap;

/// A value to be bencoded.
///
/// Bencode has four wire kinds: integers, byte strings, lists and
/// dictionaries. `Value` accepts a richer set of shapes and maps each one onto
/// a wire kind when encoded. [`Value::Null`] stands for an absent value and is
/// omitted wherever it appears inside a container.
///
/// # Examples
///
/// ```
/// use rbencode::Value;
///
/// // Creating values directly
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
/// let flag: Value = true.into();
///
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(flag.as_integer(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absent value. Omitted from lists and dictionaries.
    Null,
    /// A shared byte buffer.
    Bytes(Bytes),
    /// A window over a larger shared buffer.
    View(ByteView),
    /// An owned block of raw memory.
    Block(Box<[u8]>),
    /// UTF-8 text, encoded as its bytes.
    Text(String),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A floating point number, coerced to an integer when encoded.
    Float(f64),
    /// An arbitrary-precision integer, encoded exactly.
    BigInt(BigInt),
    /// A boolean, encoded as `i1e` or `i0e`.
    Bool(bool),
    /// An ordered list of values.
    List(Vec<Value>),
    /// The members of an unordered collection, encoded as a list in the
    /// order given.
    Set(Vec<Value>),
    /// A keyed record with byte string keys.
    Dict(BTreeMap<Bytes, Value>),
    /// An explicit sequence of key/value pairs. Keys are sorted when encoded.
    Map(Vec<(Key, Value)>),
}

/// A dictionary key from a [`Value::Map`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bytes(Bytes),
    Text(String),
}

impl Key {
    /// The bytes written to the wire for this key.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Key::Bytes(b) => b.as_ref(),
            Key::Text(s) => s.as_bytes(),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<Bytes> for Key {
    fn from(b: Bytes) -> Self {
        Key::Bytes(b)
    }
}

/// Orders map pairs by key bytes. A repeated key keeps its last value.
pub(crate) fn canonical_pairs(pairs: &[(Key, Value)]) -> BTreeMap<&[u8], &Value> {
    pairs.iter().map(|(k, v)| (k.as_bytes(), v)).collect()
}

/// A `len`-byte window starting at `offset` in a shared buffer.
///
/// Only the bytes inside the window are encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteView {
    buf: Bytes,
    offset: usize,
    len: usize,
}

impl ByteView {
    /// Creates a view, or `None` if the window does not fit inside `buf`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::ByteView;
    /// use bytes::Bytes;
    ///
    /// let view = ByteView::new(Bytes::from_static(b"xxspamxx"), 2, 4).unwrap();
    /// assert_eq!(view.as_slice(), b"spam");
    /// assert!(ByteView::new(Bytes::from_static(b"abc"), 2, 4).is_none());
    /// ```
    pub fn new(buf: Bytes, offset: usize, len: usize) -> Option<Self> {
        let end = offset.checked_add(len)?;
        if end > buf.len() {
            return None;
        }
        Some(Self { buf, offset, len })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes inside the window.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// The underlying buffer, including bytes outside the window.
    pub fn backing(&self) -> &Bytes {
        &self.buf
    }
}

impl Value {
    /// Creates a text value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Text(s.to_owned())
    }

    /// Collects the members of an unordered collection into a [`Value::Set`].
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Collects key/value pairs into a [`Value::Map`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::{encode, Value};
    ///
    /// let map = Value::map([("zebra", Value::Integer(1)), ("apple", Value::Integer(2))]);
    /// assert_eq!(encode(&map).unwrap(), b"d5:applei2e5:zebrai1ee");
    /// ```
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the raw bytes of any byte-like value, text included.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_bytes(), Some(b"hello".as_slice()));
    /// assert_eq!(Value::Integer(1).as_bytes(), None);
    /// ```
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_ref()),
            Value::View(v) => Some(v.as_slice()),
            Value::Block(b) => Some(&b[..]),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is text or valid UTF-8 bytes.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => std::str::from_utf8(self.as_bytes()?).ok(),
        }
    }

    /// Returns the items of a list or set.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) | Value::Set(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is a [`Value::Dict`].
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in a [`Value::Dict`] or [`Value::Map`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// let map = Value::map([("name", "rbencode")]);
    /// assert_eq!(map.get(b"name").and_then(|v| v.as_str()), Some("rbencode"));
    /// assert_eq!(map.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        match self {
            Value::Dict(d) => d.get(key),
            // Later pairs win, like repeated inserts into a map.
            Value::Map(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| k.as_bytes() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<BigInt> for Value {
    fn from(i: BigInt) -> Self {
        Value::BigInt(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<ByteView> for Value {
    fn from(v: ByteView) -> Self {
        Value::View(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
