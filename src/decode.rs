//! Sequential decoding of AlpineQuest primitives and structures.
//!
//! Every file written by the application is a single forward-only stream of
//! big-endian fields. A [`Reader`] wraps any [`std::io::Read`] and exposes the
//! primitive reads; the [`Decode`] trait composes them into larger structures.
//!
//! Most structures are declared rather than hand-decoded: deriving
//! [`Decode`](macro@Decode) on a struct with named fields reads each field in
//! declaration order.
//!
//! ```
//! #[derive(Debug, Decode)]
//! pub struct Waypoint {
//!     pub metadata: Metadata,
//!     pub location: Location,
//! }
//! ```

pub mod reader;
pub mod scalar;

use std::io::Read;

pub use reader::{Error, Reader};

/// Derive [`Decode`] for a struct whose fields are stored back to back.
///
/// Fields are decoded in declaration order using their own [`Decode`]
/// implementation. Two field attributes adjust this:
///
/// - `#[decode(with = path)]` calls `path(r)` instead, where `path` is a
///   function taking `&mut Reader<R>` and returning `Result<T, Error>`.
/// - `#[decode(source)]` fills an `Option<PathBuf>` from the reader's source
///   label. No bytes are consumed.
pub use alpinequest_derive::Decode;

/// Decode a value from the current position of a reader.
pub trait Decode: Sized {
    /// Consume exactly the bytes making up one value.
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error>;
}

impl Decode for i32 {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        r.read_i32()
    }
}

impl Decode for i64 {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        r.read_i64()
    }
}

impl Decode for f64 {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        r.read_f64()
    }
}

impl Decode for bool {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        r.read_bool()
    }
}

impl Decode for String {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        r.read_string()
    }
}

/// Lists are prefixed with an `int32` element count.
///
/// A negative count yields an empty list. If fewer elements than declared can
/// be decoded, the whole list fails.
impl<T: Decode> Decode for Vec<T> {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        let count = r.read_i32()?;

        // Don't trust the declared count for allocation; a truncated file
        // fails long before the list would fill.
        let mut items = Vec::new();
        for _ in 0..count.max(0) {
            items.push(T::decode(r)?);
        }

        Ok(items)
    }
}

/// Implement [`Decode`] for `zerocopy` layouts read in a single step.
macro_rules! fixed_layout {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::decode::Decode for $t {
                fn decode<R: ::std::io::Read>(
                    r: &mut $crate::decode::Reader<R>,
                ) -> Result<Self, $crate::decode::Error> {
                    let bytes = r.take::<{ size_of::<$t>() }>()?;
                    Ok(zerocopy::transmute!(bytes))
                }
            }
        )*
    };
}

pub(crate) use fixed_layout;
