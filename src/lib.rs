//! Blocklist - an ordered list stored as a sequence of fixed-capacity blocks.
//!
//! A flat `Vec` reallocates everything when it grows and shifts everything
//! after the insertion point on a middle insert. A [`BlockList`] spreads its
//! elements over blocks of at most `block_size` elements, so growth allocates
//! one more block and a middle insert shifts at most one block, splitting it
//! first when it is full.
//!
//! # Quick Start
//!
//! ```
//! use blocklist::BlockList;
//!
//! let mut list = BlockList::with_block_size(5).unwrap();
//! for i in 0..20 {
//!     list.push(format!("Hello{}", i));
//! }
//!
//! list.insert(14, "InsertA".to_string()).unwrap();
//! list.insert(5, "InsertB".to_string()).unwrap();
//! list.insert(1, "InsertC".to_string()).unwrap();
//!
//! assert_eq!(list.len(), 23);
//! assert_eq!(list.get(1).unwrap(), "InsertC");
//! assert_eq!(list.get(6).unwrap(), "InsertB");
//! assert_eq!(list.get(16).unwrap(), "InsertA");
//! ```

mod block;
pub mod config;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
#[cfg(feature = "serde")]
mod serde;
pub mod snapshot;

pub use config::BlockListConfig;
pub use config::DEFAULT_BLOCK_COUNT;
pub use config::DEFAULT_BLOCK_SIZE;
pub use cursor::Cursor;
pub use error::Error;
pub use error::Result;
pub use list::BlockList;
pub use snapshot::SnapshotElement;
