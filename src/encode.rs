use bytes::{BufMut, BytesMut};

use super::diagnostics::{Truncation, TruncationSink, WarnOnce};
use super::error::BencodeError;
use super::number::{coerce, Number};
use super::value::{canonical_pairs, Value};

/// Encodes a value to a byte vector with the default [`Encoder`].
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted by their bytes)
///
/// [`Value::Null`] members of lists and dictionaries are left out.
///
/// # Errors
///
/// Returns [`BencodeError::UnsupportedType`] if the tree contains a NaN or
/// infinite float.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// // Encode an integer
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a string
/// let encoded = encode(&Value::string("hello")).unwrap();
/// assert_eq!(encoded, b"5:hello");
///
/// // Encode a list, skipping the null
/// let list = Value::List(vec![Value::Integer(1), Value::Null, Value::string("two")]);
/// let encoded = encode(&list).unwrap();
/// assert_eq!(encoded, b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// let encoded = encode(&Value::Dict(dict)).unwrap();
/// assert_eq!(encoded, b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    Encoder::new().encode(value)
}

/// Encodes a value into `dest` at `offset` with the default [`Encoder`].
///
/// Returns the number of bytes written. See [`Encoder::encode_into`].
pub fn encode_into(
    value: &Value,
    dest: &mut BytesMut,
    offset: usize,
) -> Result<usize, BencodeError> {
    Encoder::new().encode_into(value, dest, offset)
}

/// A bencode encoder.
///
/// Numbers that cannot be written exactly are reported to the encoder's
/// [`TruncationSink`]. The default sink, [`WarnOnce`], logs the first one in
/// the process.
#[derive(Debug)]
pub struct Encoder<S = WarnOnce> {
    sink: S,
    last_len: Option<usize>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_sink(WarnOnce)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TruncationSink> Encoder<S> {
    /// Creates an encoder that reports truncations to `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            last_len: None,
        }
    }

    /// Length of the output of the last successful call, if any.
    pub fn last_encoded_len(&self) -> Option<usize> {
        self.last_len
    }

    /// Encodes `value` into a new byte vector.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, BencodeError> {
        let mut buf = Vec::new();
        self.encode_value(value, &mut buf)?;

        tracing::trace!(len = buf.len(), kind = %value.kind(), "encoded bencode value");
        self.last_len = Some(buf.len());
        Ok(buf)
    }

    /// Encodes `value` and copies the bytes into `dest` starting at `offset`.
    ///
    /// `offset` may be at most `dest.len()`. Bytes already in `dest` are
    /// overwritten and `dest` is extended when the encoding runs past its
    /// end, so writing at `dest.len()` appends. Bytes outside the written
    /// range are left untouched. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::InvalidOffset`] when `offset` is past the end
    /// of `dest`. Nothing is written in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::{Encoder, Value};
    /// use bytes::BytesMut;
    ///
    /// let mut dest = BytesMut::from(&b"header:"[..]);
    /// let mut encoder = Encoder::new();
    /// let written = encoder.encode_into(&Value::Integer(7), &mut dest, 7).unwrap();
    ///
    /// assert_eq!(written, 3);
    /// assert_eq!(&dest[..], b"header:i7e");
    /// assert_eq!(encoder.last_encoded_len(), Some(3));
    /// ```
    pub fn encode_into(
        &mut self,
        value: &Value,
        dest: &mut BytesMut,
        offset: usize,
    ) -> Result<usize, BencodeError> {
        if offset > dest.len() {
            return Err(BencodeError::InvalidOffset {
                offset,
                len: dest.len(),
            });
        }

        let encoded = self.encode(value)?;
        let overlap = (dest.len() - offset).min(encoded.len());
        dest[offset..offset + overlap].copy_from_slice(&encoded[..overlap]);
        dest.extend_from_slice(&encoded[overlap..]);
        Ok(encoded.len())
    }

    fn encode_value(&self, value: &Value, buf: &mut Vec<u8>) -> Result<(), BencodeError> {
        match value {
            Value::Null => {}
            Value::Bytes(b) => put_byte_string(buf, b),
            Value::View(v) => put_byte_string(buf, v.as_slice()),
            Value::Block(b) => put_byte_string(buf, b),
            Value::Text(s) => put_byte_string(buf, s.as_bytes()),
            Value::Integer(i) => self.put_number(buf, Number::Integer(*i))?,
            Value::Float(f) => self.put_number(buf, Number::Float(*f))?,
            Value::Bool(b) => self.put_number(buf, Number::Integer(i64::from(*b)))?,
            Value::BigInt(i) => {
                buf.put_u8(b'i');
                buf.put_slice(i.to_str_radix(10).as_bytes());
                buf.put_u8(b'e');
            }
            Value::List(items) | Value::Set(items) => {
                buf.put_u8(b'l');
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    self.encode_value(item, buf)?;
                }
                buf.put_u8(b'e');
            }
            Value::Dict(d) => {
                buf.put_u8(b'd');
                for (key, val) in d {
                    if val.is_null() {
                        continue;
                    }
                    put_byte_string(buf, key);
                    self.encode_value(val, buf)?;
                }
                buf.put_u8(b'e');
            }
            Value::Map(pairs) => {
                buf.put_u8(b'd');
                for (key, val) in canonical_pairs(pairs) {
                    if val.is_null() {
                        continue;
                    }
                    put_byte_string(buf, key);
                    self.encode_value(val, buf)?;
                }
                buf.put_u8(b'e');
            }
        }
        Ok(())
    }

    fn put_number(&self, buf: &mut Vec<u8>, number: Number) -> Result<(), BencodeError> {
        let coerced = coerce(number)?;
        buf.put_u8(b'i');
        buf.put_slice(coerced.to_string().as_bytes());
        buf.put_u8(b'e');

        if !number.is_exact(coerced) {
            self.sink.truncated(&Truncation {
                original: number,
                coerced,
            });
        }
        Ok(())
    }
}

fn put_byte_string(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.put_slice(bytes.len().to_string().as_bytes());
    buf.put_u8(b':');
    buf.put_slice(bytes);
}
