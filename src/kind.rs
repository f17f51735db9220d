use std::fmt;

use super::value::Value;

/// The category a [`Value`] falls into before it is mapped to a wire kind.
///
/// Several categories share a wire kind: byte buffers, views, memory blocks
/// and text all become byte strings, sets become lists, and ordered key/value
/// containers become dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    ByteBuffer,
    ByteView,
    MemoryBlock,
    Text,
    Numeric,
    BigInteger,
    Boolean,
    Array,
    Set,
    Mapping,
    OrderedKeyValue,
}

/// The four node kinds bencode can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    ByteString,
    Integer,
    List,
    Dictionary,
}

impl Kind {
    /// Stable lowercase name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::ByteBuffer => "buffer",
            Kind::ByteView => "arraybufferview",
            Kind::MemoryBlock => "arraybuffer",
            Kind::Text => "string",
            Kind::Numeric => "number",
            Kind::BigInteger => "bigint",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Set => "set",
            Kind::Mapping => "object",
            Kind::OrderedKeyValue => "map",
        }
    }

    /// The wire kind this category is encoded as. `None` for [`Kind::Null`],
    /// which is never written.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::{Kind, WireKind};
    ///
    /// assert_eq!(Kind::Set.wire_kind(), Some(WireKind::List));
    /// assert_eq!(Kind::Boolean.wire_kind(), Some(WireKind::Integer));
    /// assert_eq!(Kind::Null.wire_kind(), None);
    /// ```
    pub fn wire_kind(self) -> Option<WireKind> {
        match self {
            Kind::Null => None,
            Kind::ByteBuffer | Kind::ByteView | Kind::MemoryBlock | Kind::Text => {
                Some(WireKind::ByteString)
            }
            Kind::Numeric | Kind::BigInteger | Kind::Boolean => Some(WireKind::Integer),
            Kind::Array | Kind::Set => Some(WireKind::List),
            Kind::Mapping | Kind::OrderedKeyValue => Some(WireKind::Dictionary),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Classifies the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bytes(_) => Kind::ByteBuffer,
            Value::View(_) => Kind::ByteView,
            Value::Block(_) => Kind::MemoryBlock,
            Value::Text(_) => Kind::Text,
            Value::Integer(_) | Value::Float(_) => Kind::Numeric,
            Value::BigInt(_) => Kind::BigInteger,
            Value::Bool(_) => Kind::Boolean,
            Value::List(_) => Kind::Array,
            Value::Set(_) => Kind::Set,
            Value::Dict(_) => Kind::Mapping,
            Value::Map(_) => Kind::OrderedKeyValue,
        }
    }
}
