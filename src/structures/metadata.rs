//! Self-describing property bags.
//!
//! Each entry stores its name, then a single `int32` which is either a type
//! tag (negative) or the byte length of a string value (zero or more).

use std::{fmt, io::Read};

use either::Either::{self, Left, Right};
use zerocopy::{Immutable, KnownLayout, TryFromBytes};

use crate::decode::{Decode, Error, Reader};

/// Negative type tags of non-string entries.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes, KnownLayout, Immutable)]
#[allow(dead_code)]
enum EntryTag {
    Boolean = -1,
    Long = -2,
    Double = -3,
    Raw = -4,
}

/// Split the overloaded type field into a tag or a string length.
///
/// Returns the field unchanged as the error if it is an unknown tag.
fn split_type(type_or_len: i32) -> Result<Either<EntryTag, i32>, i32> {
    if type_or_len >= 0 {
        return Ok(Right(type_or_len));
    }

    let tag: Result<EntryTag, _> = zerocopy::try_transmute!(type_or_len);
    tag.map(Left).map_err(|_| type_or_len)
}

/// The typed payload of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Long(i64),
    Double(f64),
    Raw(Vec<u8>),
    String(String),
}

/// Renders values for display and name lookup.
///
/// Raw bytes are rendered as uppercase hexadecimal without separators.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Double(d) => write_decimal(f, *d),
            Self::Raw(bytes) => bytes.iter().try_for_each(|b| write!(f, "{b:02X}")),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Plain decimal notation at any magnitude, with a fractional part kept on
/// integral values ("3.0", not "3").
fn write_decimal(f: &mut fmt::Formatter<'_>, d: f64) -> fmt::Result {
    if d.is_finite() && d.fract() == 0.0 {
        write!(f, "{d:.1}")
    } else {
        write!(f, "{d}")
    }
}

/// A named, typed property.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub name: String,
    pub value: Value,
}

impl Decode for MetadataEntry {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        let name = r.read_string()?;

        let offset = r.offset();
        let type_or_len = r.read_i32()?;

        let tag = split_type(type_or_len)
            .map_err(|tag| Error::UnknownEntryTag { offset, tag })?;

        let value = match tag {
            Left(EntryTag::Boolean) => Value::Boolean(r.read_bool()?),
            Left(EntryTag::Long) => Value::Long(r.read_i64()?),
            Left(EntryTag::Double) => Value::Double(r.read_f64()?),
            Left(EntryTag::Raw) => {
                let offset = r.offset();
                let length = r.read_i32()?;
                let length = usize::try_from(length)
                    .map_err(|_| Error::NegativeLength { offset, length })?;
                Value::Raw(r.read_raw(length)?)
            }
            Right(length) => Value::String(r.read_string_of(length)?),
        };

        Ok(Self { name, value })
    }
}

/// An ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBag {
    pub entries: Vec<MetadataEntry>,
}

impl MetadataBag {
    /// The value of the first entry with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// The rendered value of the first entry with the given name.
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).map(Value::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Decode for MetadataBag {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        Ok(Self {
            entries: Decode::decode(r)?,
        })
    }
}

impl FromIterator<(String, Value)> for MetadataBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| MetadataEntry { name, value })
                .collect(),
        }
    }
}

/// A named bag nested under a structure's metadata.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct Extension {
    pub name: String,
    pub content: MetadataBag,
}

/// The properties attached to a file, waypoint or segment.
#[derive(Debug, Clone, Default, PartialEq, Decode)]
pub struct Metadata {
    pub base: MetadataBag,
    pub extensions: Vec<Extension>,
}

impl Metadata {
    /// The display name; see [`resolve_name`].
    pub fn name(&self) -> Option<String> {
        resolve_name(&self.base)
    }

    /// The extension bag with the given name.
    pub fn extension(&self, name: &str) -> Option<&MetadataBag> {
        self.extensions
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.content)
    }
}

/// Resolve a display name from a base bag: `name`, else `file_desc`.
///
/// Extension bags never take part.
pub fn resolve_name(base: &MetadataBag) -> Option<String> {
    base.get_string("name")
        .or_else(|| base.get_string("file_desc"))
}
