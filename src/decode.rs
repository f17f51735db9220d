use super::error::{BencodeError, MalformedReason};
use super::number::parse_int;
use super::value::{Key, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::ops::{Bound, RangeBounds};

/// Default limit on list/dictionary nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

const DICTIONARY_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INTEGER_START: u8 = b'i';
const STRING_DELIM: u8 = b':';
const END_OF_TYPE: u8 = b'e';

/// Decodes bencoded data with the default [`Decoder`].
///
/// Byte strings and dictionary keys come back as raw [`Bytes`]. Returns
/// `Ok(None)` for empty input. Bytes after the first complete value are
/// ignored.
///
/// # Examples
///
/// ```
/// use rbencode::decode;
///
/// let value = decode(b"i42e").unwrap().unwrap();
/// assert_eq!(value.as_integer(), Some(42));
///
/// let value = decode(b"d3:foo3:bare").unwrap().unwrap();
/// assert_eq!(value.get(&b"foo"[..]).and_then(|v| v.as_str()), Some("bar"));
///
/// assert_eq!(decode(b"").unwrap(), None);
/// ```
pub fn decode(data: &[u8]) -> Result<Option<Decoded>, BencodeError> {
    Decoder::new().decode(data)
}

/// A decoded bencode node.
///
/// `S` is the byte string type: [`Bytes`] by default, or `String` when the
/// [`Decoder`] has a [`TextMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<S = Bytes> {
    Integer(i64),
    String(S),
    List(Vec<Decoded<S>>),
    Dict(BTreeMap<S, Decoded<S>>),
}

impl<S: Ord> Decoded<S> {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Decoded::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&S> {
        match self {
            Decoded::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the byte string as UTF-8, if it is one and is valid.
    pub fn as_str(&self) -> Option<&str>
    where
        S: AsRef<[u8]>,
    {
        std::str::from_utf8(self.as_string()?.as_ref()).ok()
    }

    pub fn as_list(&self) -> Option<&[Decoded<S>]> {
        match self {
            Decoded::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<S, Decoded<S>>> {
        match self {
            Decoded::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key if this node is a dictionary.
    pub fn get<Q>(&self, key: &Q) -> Option<&Decoded<S>>
    where
        S: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.as_dict()?.get(key)
    }
}

impl From<Decoded<Bytes>> for Value {
    fn from(node: Decoded<Bytes>) -> Self {
        match node {
            Decoded::Integer(i) => Value::Integer(i),
            Decoded::String(b) => Value::Bytes(b),
            Decoded::List(l) => Value::List(l.into_iter().map(Value::from).collect()),
            Decoded::Dict(d) => Value::Dict(d.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<Decoded<String>> for Value {
    fn from(node: Decoded<String>) -> Self {
        match node {
            Decoded::Integer(i) => Value::Integer(i),
            Decoded::String(s) => Value::Text(s),
            Decoded::List(l) => Value::List(l.into_iter().map(Value::from).collect()),
            Decoded::Dict(d) => Value::Map(
                d.into_iter()
                    .map(|(k, v)| (Key::Text(k), v.into()))
                    .collect(),
            ),
        }
    }
}

/// How decoded byte strings are materialized.
pub trait StringMode {
    type Output: Ord;

    fn materialize(&self, raw: Bytes) -> Self::Output;
}

/// Keep byte strings as raw [`Bytes`] sliced from the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl StringMode for Raw {
    type Output = Bytes;

    fn materialize(&self, raw: Bytes) -> Bytes {
        raw
    }
}

/// Turn byte strings into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// UTF-8, with invalid sequences replaced by U+FFFD.
    Utf8,
    /// One character per byte.
    Latin1,
    /// One character per byte, high bit cleared.
    Ascii,
    /// Lowercase hexadecimal.
    Hex,
    /// Standard padded base64.
    Base64,
    /// UTF-16 little endian, with unpaired surrogates replaced by U+FFFD. An
    /// odd trailing byte is ignored.
    Utf16Le,
}

impl StringMode for TextMode {
    type Output = String;

    fn materialize(&self, raw: Bytes) -> String {
        match self {
            TextMode::Utf8 => String::from_utf8_lossy(&raw).into_owned(),
            TextMode::Latin1 => raw.iter().map(|&b| char::from(b)).collect(),
            TextMode::Ascii => raw.iter().map(|&b| char::from(b & 0x7f)).collect(),
            TextMode::Hex => raw
                .iter()
                .fold(String::with_capacity(raw.len() * 2), |mut s, b| {
                    use std::fmt::Write;
                    let _ = write!(s, "{:02x}", b);
                    s
                }),
            TextMode::Base64 => STANDARD.encode(&raw),
            TextMode::Utf16Le => {
                let units = raw.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }
}

/// A decoded value with the cursor state it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    /// Cursor position after the value, relative to the window.
    pub position: usize,
    /// Size of the window that was parsed.
    pub window_len: usize,
}

/// A configurable bencode decoder.
///
/// The decoder only holds configuration. Every call builds its own parser
/// state, so one decoder can be shared between threads.
///
/// # Examples
///
/// ```
/// use rbencode::{Decoded, Decoder, TextMode};
///
/// let data = b"xxd4:spam4:eggsexx";
/// let decoder = Decoder::new().window(2..16).text(TextMode::Utf8);
///
/// let value = decoder.decode(data).unwrap().unwrap();
/// assert_eq!(value.get("spam"), Some(&Decoded::String("eggs".to_string())));
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<M = Raw> {
    mode: M,
    start: usize,
    end: Option<usize>,
    max_depth: usize,
    reject_trailing: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            mode: Raw,
            start: 0,
            end: None,
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: false,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: StringMode> Decoder<M> {
    /// Materializes byte strings and dictionary keys as text.
    pub fn text(self, mode: TextMode) -> Decoder<TextMode> {
        Decoder {
            mode,
            start: self.start,
            end: self.end,
            max_depth: self.max_depth,
            reject_trailing: self.reject_trailing,
        }
    }

    /// Restricts decoding to a byte range of the input. Out of range bounds
    /// are clamped to the input.
    pub fn window<R: RangeBounds<usize>>(mut self, range: R) -> Self {
        self.start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        self.end = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Fail when bytes remain in the window after the top-level value.
    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }

    /// Decodes a copy of the window. Returns `Ok(None)` when there is
    /// nothing to decode.
    pub fn decode(&self, data: &[u8]) -> Result<Option<Decoded<M::Output>>, BencodeError> {
        Ok(self.parse(data)?.map(|parsed| parsed.value))
    }

    /// Decodes the window without copying. Byte strings share `data`'s
    /// storage.
    pub fn decode_bytes(&self, data: Bytes) -> Result<Option<Decoded<M::Output>>, BencodeError> {
        Ok(self.parse_bytes(data)?.map(|parsed| parsed.value))
    }

    /// Like [`decode`](Self::decode), also reporting the final cursor.
    pub fn parse(&self, data: &[u8]) -> Result<Option<Parsed<Decoded<M::Output>>>, BencodeError> {
        let (start, end) = self.bounds(data.len());
        self.parse_window(Bytes::copy_from_slice(&data[start..end]))
    }

    /// Like [`decode_bytes`](Self::decode_bytes), also reporting the final
    /// cursor.
    pub fn parse_bytes(
        &self,
        data: Bytes,
    ) -> Result<Option<Parsed<Decoded<M::Output>>>, BencodeError> {
        let (start, end) = self.bounds(data.len());
        self.parse_window(data.slice(start..end))
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let end = self.end.map_or(len, |e| e.min(len));
        (self.start.min(end), end)
    }

    fn parse_window(
        &self,
        window: Bytes,
    ) -> Result<Option<Parsed<Decoded<M::Output>>>, BencodeError> {
        if window.is_empty() {
            return Ok(None);
        }

        let mut parser = Parser {
            data: window,
            pos: 0,
            mode: &self.mode,
            max_depth: self.max_depth,
        };
        let value = parser.next(0)?;

        if self.reject_trailing && parser.pos != parser.data.len() {
            return Err(BencodeError::malformed(
                parser.pos,
                MalformedReason::TrailingData,
            ));
        }

        tracing::trace!(
            position = parser.pos,
            window_len = parser.data.len(),
            "decoded bencode value"
        );

        Ok(Some(Parsed {
            value,
            position: parser.pos,
            window_len: parser.data.len(),
        }))
    }
}

/// Cursor state for a single decode call.
struct Parser<'m, M> {
    data: Bytes,
    pos: usize,
    mode: &'m M,
    max_depth: usize,
}

impl<M: StringMode> Parser<'_, M> {
    fn next(&mut self, depth: usize) -> Result<Decoded<M::Output>, BencodeError> {
        if depth > self.max_depth {
            return Err(BencodeError::malformed(
                self.pos,
                MalformedReason::NestingTooDeep,
            ));
        }

        match self.data.get(self.pos) {
            Some(&DICTIONARY_START) => self.dictionary(depth),
            Some(&LIST_START) => self.list(depth),
            Some(&INTEGER_START) => self.integer(),
            _ => self.string().map(Decoded::String),
        }
    }

    /// Offset of the next `marker` at or after the cursor.
    fn find(&self, marker: u8) -> Result<usize, BencodeError> {
        self.data[self.pos..]
            .iter()
            .position(|&b| b == marker)
            .map(|i| self.pos + i)
            .ok_or(BencodeError::malformed(
                self.pos,
                MalformedReason::MissingDelimiter(marker),
            ))
    }

    /// Whether the cursor sits on an end marker. Running out of input first
    /// is an error.
    fn at_end(&self) -> Result<bool, BencodeError> {
        match self.data.get(self.pos) {
            Some(&END_OF_TYPE) => Ok(true),
            Some(_) => Ok(false),
            None => Err(BencodeError::malformed(
                self.pos,
                MalformedReason::MissingDelimiter(END_OF_TYPE),
            )),
        }
    }

    fn dictionary(&mut self, depth: usize) -> Result<Decoded<M::Output>, BencodeError> {
        self.pos += 1;
        let mut dict = BTreeMap::new();

        while !self.at_end()? {
            let key = self.string()?;
            let value = self.next(depth + 1)?;
            dict.insert(key, value);
        }

        self.pos += 1;
        Ok(Decoded::Dict(dict))
    }

    fn list(&mut self, depth: usize) -> Result<Decoded<M::Output>, BencodeError> {
        self.pos += 1;
        let mut list = Vec::new();

        while !self.at_end()? {
            list.push(self.next(depth + 1)?);
        }

        self.pos += 1;
        Ok(Decoded::List(list))
    }

    fn integer(&mut self) -> Result<Decoded<M::Output>, BencodeError> {
        let end = self.find(END_OF_TYPE)?;
        let number = parse_int(&self.data, self.pos + 1, end)?;

        self.pos = end + 1;
        Ok(Decoded::Integer(number))
    }

    fn string(&mut self) -> Result<M::Output, BencodeError> {
        let sep = self.find(STRING_DELIM)?;
        let declared = parse_int(&self.data, self.pos, sep)?;
        let len = usize::try_from(declared).map_err(|_| {
            BencodeError::malformed(self.pos, MalformedReason::NegativeLength(declared))
        })?;

        let start = sep + 1;
        let available = self.data.len() - start;
        if len > available {
            return Err(BencodeError::malformed(
                start,
                MalformedReason::TruncatedString {
                    declared: len,
                    available,
                },
            ));
        }

        let end = start + len;
        self.pos = end;
        Ok(self.mode.materialize(self.data.slice(start..end)))
    }
}
