//! Hierarchical path identifiers.
//!
//! A [`HierarchyId`] names a node of an ordered tree by the labels walked from
//! the root, written `/1/2/3/` (the root is `/`). It has three forms:
//!
//! - the in-memory label sequence,
//! - the canonical string, see [`parse`] and [`format`],
//! - a compact binary encoding, see [`encode`] and [`decode`], whose unsigned
//!   byte-wise order is the tree's pre-order. Sorting the encoded bytes in a
//!   database sorts the tree depth first, with siblings in label order.
//!
//! ```
//! use hierarchy_id::*;
//!
//! let id = parse("/1/2/3/4/").unwrap();
//! let bytes = encode(&id);
//! assert_eq!(decode(&bytes).unwrap(), id);
//! assert_eq!(format(&id), "/1/2/3/4/");
//!
//! for ancestor in ancestors(&id) {
//!     assert!(encode(&ancestor) < bytes);
//! }
//! ```
//!
//! Serde uses the string form. The [`storage`] module has the pieces a
//! database binding needs, and the `sqlite` feature implements `rusqlite`'s
//! `ToSql` / `FromSql` on top of them.

#![deny(missing_docs)]

pub mod encode_bin;
pub mod encode_str;
pub mod error;
mod hierarchy_id;
mod label;
mod ser;
pub mod storage;

#[cfg(feature = "sqlite")]
pub mod sql;

pub use encode_bin::{decode, encode, encoded_len};
pub use encode_str::{format, parse};
pub use error::{DecodeError, DecodeResult, LabelOutOfRange, ParseError, ParseResult};
pub use hierarchy_id::{ancestors, Ancestors, HierarchyId};
pub use label::Label;
pub use storage::{
    Dialect, FromBytes, NullableHierarchyId, StorageConfig, StorageError, StorageResult,
    StorageValue, ToBytes, TypeTag,
};
