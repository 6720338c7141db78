//! Typed property list values.

use super::OrderedDictionary;
use std::time::SystemTime;

/// Numeric leaf of a property list.
///
/// Binary plists distinguish signed and unsigned 64-bit integers, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer
    Integer(i64),
    /// Unsigned integer larger than `i64::MAX`
    Unsigned(u64),
    /// Floating point value
    Real(f64),
}

/// A single node of a property list document.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    Array(Vec<PlistValue>),
    /// Nested ordered dictionary
    Dictionary(OrderedDictionary),
    /// Raw bytes
    Data(Vec<u8>),
    /// Integer or real number
    Number(Number),
    /// Boolean flag
    Boolean(bool),
    /// Point in time
    Date(SystemTime),
}

impl PlistValue {
    /// Returns the string if this value is a [`PlistValue::String`].
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this value is an array.
    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested dictionary if this value is one.
    pub fn as_dictionary(&self) -> Option<&OrderedDictionary> {
        match self {
            PlistValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the raw bytes if this value is data.
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            PlistValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the number if this value is numeric.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            PlistValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this value is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PlistValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp if this value is a date.
    pub fn as_date(&self) -> Option<SystemTime> {
        match self {
            PlistValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
            PlistValue::Data(_) => "data",
            PlistValue::Number(_) => "number",
            PlistValue::Boolean(_) => "boolean",
            PlistValue::Date(_) => "date",
        }
    }

    /// Converts a decoded `plist` value into the typed representation.
    ///
    /// Keyed archiver UIDs have no meaning in bundle metadata and are rejected.
    pub(crate) fn from_raw(raw: plist::Value) -> std::result::Result<Self, String> {
        Ok(match raw {
            plist::Value::String(s) => PlistValue::String(s),
            plist::Value::Boolean(b) => PlistValue::Boolean(b),
            plist::Value::Data(bytes) => PlistValue::Data(bytes),
            plist::Value::Real(r) => PlistValue::Number(Number::Real(r)),
            plist::Value::Integer(i) => match i.as_signed() {
                Some(signed) => PlistValue::Number(Number::Integer(signed)),
                None => PlistValue::Number(Number::Unsigned(
                    i.as_unsigned().ok_or("integer out of range")?,
                )),
            },
            plist::Value::Date(d) => PlistValue::Date(d.into()),
            plist::Value::Array(items) => PlistValue::Array(
                items
                    .into_iter()
                    .map(PlistValue::from_raw)
                    .collect::<std::result::Result<_, _>>()?,
            ),
            plist::Value::Dictionary(dict) => {
                PlistValue::Dictionary(OrderedDictionary::from_raw(dict)?)
            }
            plist::Value::Uid(_) => return Err("unsupported UID value".to_string()),
            _ => return Err("unsupported value type".to_string()),
        })
    }

    /// Converts back into a `plist` value for serialization, preserving order.
    pub(crate) fn to_raw(&self) -> plist::Value {
        match self {
            PlistValue::String(s) => plist::Value::String(s.clone()),
            PlistValue::Boolean(b) => plist::Value::Boolean(*b),
            PlistValue::Data(bytes) => plist::Value::Data(bytes.clone()),
            PlistValue::Number(Number::Integer(i)) => plist::Value::Integer((*i).into()),
            PlistValue::Number(Number::Unsigned(u)) => plist::Value::Integer((*u).into()),
            PlistValue::Number(Number::Real(r)) => plist::Value::Real(*r),
            PlistValue::Date(d) => plist::Value::Date((*d).into()),
            PlistValue::Array(items) => {
                plist::Value::Array(items.iter().map(PlistValue::to_raw).collect())
            }
            PlistValue::Dictionary(dict) => plist::Value::Dictionary(dict.to_raw()),
        }
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Boolean(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        PlistValue::Number(Number::Integer(value))
    }
}

impl From<f64> for PlistValue {
    fn from(value: f64) -> Self {
        PlistValue::Number(Number::Real(value))
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(value: Vec<PlistValue>) -> Self {
        PlistValue::Array(value)
    }
}

impl From<OrderedDictionary> for PlistValue {
    fn from(value: OrderedDictionary) -> Self {
        PlistValue::Dictionary(value)
    }
}

impl std::fmt::Display for PlistValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlistValue::String(s) => write!(f, "{s}"),
            PlistValue::Boolean(b) => write!(f, "{b}"),
            PlistValue::Number(Number::Integer(i)) => write!(f, "{i}"),
            PlistValue::Number(Number::Unsigned(u)) => write!(f, "{u}"),
            PlistValue::Number(Number::Real(r)) => write!(f, "{r}"),
            PlistValue::Data(bytes) => write!(f, "<{} bytes>", bytes.len()),
            PlistValue::Date(d) => write!(f, "{d:?}"),
            PlistValue::Array(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            PlistValue::Dictionary(dict) => {
                write!(f, "{{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
