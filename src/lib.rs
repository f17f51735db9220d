//! rbencode - canonical bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files, tracker
//! responses and DHT messages.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! [`Value`] maps a wider set of shapes onto these kinds: text, byte views,
//! floats, booleans and big integers, sets, and explicit key/value maps.
//! [`Value::Null`] is skipped wherever it appears in a container.
//!
//! # Modules
//!
//! - [`Value`] / [`Kind`] - encoder input and its classification
//! - [`encoded_len`] - exact encoded size without encoding
//! - [`Encoder`] - canonical encoding with a truncation diagnostic channel
//! - [`Decoder`] - cursor-driven decoding into [`Decoded`] trees
//!
//! # Examples
//!
//! ## Encoding
//!
//! ```
//! use rbencode::{encode, Value};
//!
//! let value = Value::map([
//!     ("string", Value::string("Hello World")),
//!     ("integer", Value::Integer(12345)),
//! ]);
//! assert_eq!(encode(&value).unwrap(), b"d7:integeri12345e6:string11:Hello Worlde");
//! ```
//!
//! ## Decoding
//!
//! ```
//! use rbencode::{decode, Decoder, TextMode};
//!
//! // Byte strings stay raw unless a text mode is requested.
//! let value = decode(b"l4:spami42ee").unwrap().unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list[0].as_string().map(|b| &b[..]), Some(b"spam".as_slice()));
//! assert_eq!(list[1].as_integer(), Some(42));
//!
//! let value = Decoder::new()
//!     .text(TextMode::Utf8)
//!     .decode(b"d3:foo3:bare")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(value.get("foo").and_then(|v| v.as_str()), Some("bar"));
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::UnsupportedType`] - the value has no wire form (NaN or
//!   infinite floats)
//! - [`BencodeError::MalformedInput`] - the input breaks the grammar; carries
//!   the byte offset and a [`MalformedReason`]
//! - [`BencodeError::InvalidOffset`] - an [`encode_into`] offset lies past the
//!   end of the destination
//!
//! Empty input is not an error: decoding it yields `Ok(None)`.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod diagnostics;
mod encode;
mod error;
mod kind;
mod length;
mod number;
mod value;

pub use decode::{decode, Decoded, Decoder, Parsed, Raw, StringMode, TextMode, DEFAULT_MAX_DEPTH};
pub use diagnostics::{Silent, Truncation, TruncationSink, WarnOnce};
pub use encode::{encode, encode_into, Encoder};
pub use error::{BencodeError, MalformedReason};
pub use kind::{Kind, WireKind};
pub use length::encoded_len;
pub use number::{digit_count, Number};
pub use value::{ByteView, Key, Value};
