use super::error::BencodeError;
use super::number::{coerce, digit_count, unsigned_digit_count, Number};
use super::value::{canonical_pairs, Value};

/// Computes the exact size of `value`'s encoding without producing it.
///
/// The accounting mirrors [`Encoder`](crate::Encoder) node for node, so the
/// result always equals the length of the encoded output. Use it to size a
/// buffer before calling [`encode_into`](crate::encode_into).
///
/// # Errors
///
/// Fails with [`BencodeError::UnsupportedType`] for the same values the
/// encoder rejects.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, encoded_len, Value};
///
/// let value = Value::map([
///     ("string", Value::string("Hello World")),
///     ("integer", Value::Integer(12345)),
/// ]);
/// assert_eq!(encoded_len(&value).unwrap(), encode(&value).unwrap().len());
/// assert_eq!(encoded_len(&Value::Null).unwrap(), 0);
/// ```
pub fn encoded_len(value: &Value) -> Result<usize, BencodeError> {
    let len = match value {
        Value::Null => 0,
        Value::Bytes(b) => byte_string_len(b.len()),
        Value::View(v) => byte_string_len(v.len()),
        Value::Block(b) => byte_string_len(b.len()),
        Value::Text(s) => byte_string_len(s.len()),
        Value::Integer(i) => integer_len(Number::Integer(*i))?,
        Value::Float(f) => integer_len(Number::Float(*f))?,
        Value::Bool(b) => integer_len(Number::Integer(i64::from(*b)))?,
        Value::BigInt(i) => 2 + i.to_str_radix(10).len(),
        Value::List(items) | Value::Set(items) => {
            let mut len = 2;
            for item in items {
                len += encoded_len(item)?;
            }
            len
        }
        Value::Dict(d) => {
            let mut len = 2;
            for (key, val) in d {
                if val.is_null() {
                    continue;
                }
                len += byte_string_len(key.len()) + encoded_len(val)?;
            }
            len
        }
        Value::Map(pairs) => {
            let mut len = 2;
            for (key, val) in canonical_pairs(pairs) {
                if val.is_null() {
                    continue;
                }
                len += byte_string_len(key.len()) + encoded_len(val)?;
            }
            len
        }
    };
    Ok(len)
}

/// `<len>:<bytes>`
pub(crate) fn byte_string_len(len: usize) -> usize {
    unsigned_digit_count(len as u64) + 1 + len
}

/// `i<n>e`
fn integer_len(number: Number) -> Result<usize, BencodeError> {
    Ok(2 + digit_count(coerce(number)?))
}
