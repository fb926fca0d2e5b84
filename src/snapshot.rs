//! Flat serialized snapshots.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! block_size: i32
//! len:        i32
//! repeated ceil(len / block_size) times:
//!     fill:   i32
//!     fill x  element
//! ```
//!
//! The writer packs elements into full blocks (only the last may be partial),
//! so the reader can recover the block count from `len` and `block_size`.
//! Block boundaries are therefore not preserved across a round trip, only the
//! element sequence and the block size.

use std::io::Read;
use std::io::Write;

use tracing::debug;

use crate::block::Block;
use crate::config::DEFAULT_BLOCK_COUNT;
use crate::error::Error;
use crate::error::Result;
use crate::list::BlockList;

/// Most elements reserved up front for one decoded block. The header is
/// untrusted, so anything beyond this is only allocated once the elements
/// have actually been read.
const MAX_PREALLOC: usize = 1024;

/// An element type that can appear in a snapshot.
pub trait SnapshotElement: Sized {
    fn encode<W: Write>(&self, out: &mut W) -> Result<()>;
    fn decode<R: Read>(input: &mut R) -> Result<Self>;
}

macro_rules! impl_snapshot_number {
    ($($ty:ty),*) => {$(
        impl SnapshotElement for $ty {
            fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
                out.write_all(&self.to_be_bytes())?;
                return Ok(());
            }

            fn decode<R: Read>(input: &mut R) -> Result<Self> {
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                input.read_exact(&mut bytes)?;
                return Ok(<$ty>::from_be_bytes(bytes));
            }
        }
    )*};
}

impl_snapshot_number!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl SnapshotElement for bool {
    fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
        return (*self as u8).encode(out);
    }

    fn decode<R: Read>(input: &mut R) -> Result<Self> {
        match u8::decode(input)? {
            0 => return Ok(false),
            1 => return Ok(true),
            other => return Err(Error::corrupt(format!("invalid bool byte {:#04x}", other))),
        }
    }
}

/// Length-prefixed bytes: u32 length, then the bytes.
impl SnapshotElement for Vec<u8> {
    fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
        let len = u32::try_from(self.len())
            .map_err(|_| Error::corrupt(format!("byte string of {} bytes is too long", self.len())))?;
        len.encode(out)?;
        out.write_all(self)?;
        return Ok(());
    }

    fn decode<R: Read>(input: &mut R) -> Result<Self> {
        let len = u32::decode(input)? as u64;
        // Read through `take` so a bogus length cannot force a huge allocation.
        let mut bytes = Vec::new();
        input.take(len).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != len {
            return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }
        return Ok(bytes);
    }
}

/// UTF-8, length-prefixed like `Vec<u8>`.
impl SnapshotElement for String {
    fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
        let len = u32::try_from(self.len())
            .map_err(|_| Error::corrupt(format!("string of {} bytes is too long", self.len())))?;
        len.encode(out)?;
        out.write_all(self.as_bytes())?;
        return Ok(());
    }

    fn decode<R: Read>(input: &mut R) -> Result<Self> {
        let bytes = Vec::<u8>::decode(input)?;
        return String::from_utf8(bytes).map_err(|e| Error::corrupt(format!("invalid UTF-8: {}", e)));
    }
}

/// A presence byte (0 = None, 1 = Some) followed by the value.
impl<T: SnapshotElement> SnapshotElement for Option<T> {
    fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            None => return 0u8.encode(out),
            Some(value) => {
                1u8.encode(out)?;
                return value.encode(out);
            }
        }
    }

    fn decode<R: Read>(input: &mut R) -> Result<Self> {
        match u8::decode(input)? {
            0 => return Ok(None),
            1 => return Ok(Some(T::decode(input)?)),
            other => return Err(Error::corrupt(format!("invalid presence byte {:#04x}", other))),
        }
    }
}

fn write_count<W: Write>(out: &mut W, value: usize, what: &str) -> Result<()> {
    let value = i32::try_from(value).map_err(|_| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} {} does not fit in a snapshot", what, value),
        ))
    })?;
    return value.encode(out);
}

fn read_count<R: Read>(input: &mut R, what: &str) -> Result<usize> {
    let value = i32::decode(input)?;
    return usize::try_from(value).map_err(|_| Error::corrupt(format!("negative {}: {}", what, value)));
}

impl<T: SnapshotElement> BlockList<T> {
    /// Write a snapshot of this list to `out`.
    pub fn write_snapshot<W: Write>(&self, out: &mut W) -> Result<()> {
        write_count(out, self.block_size, "block size")?;
        write_count(out, self.len, "length")?;

        let mut items = self.iter();
        let mut remaining = self.len;
        let mut blocks = 0usize;
        while remaining > 0 {
            let fill = remaining.min(self.block_size);
            write_count(out, fill, "fill count")?;
            for item in items.by_ref().take(fill) {
                item.encode(out)?;
            }
            remaining -= fill;
            blocks += 1;
        }

        debug!(block_size = self.block_size, len = self.len, blocks, "wrote snapshot");
        return Ok(());
    }

    /// Read a list back from a snapshot written by
    /// [`write_snapshot`](BlockList::write_snapshot).
    pub fn read_snapshot<R: Read>(input: &mut R) -> Result<BlockList<T>> {
        let block_size = read_count(input, "block size")?;
        if block_size == 0 {
            return Err(Error::corrupt("block size is zero"));
        }
        let len = read_count(input, "length")?;
        let block_count = len.div_ceil(block_size);

        let mut list = BlockList {
            blocks: Vec::with_capacity(block_count.min(MAX_PREALLOC)),
            spare: Vec::new(),
            block_size,
            initial_blocks: DEFAULT_BLOCK_COUNT,
            len: 0,
            revision: 0,
        };

        let mut total = 0usize;
        for _ in 0..block_count {
            let fill = read_count(input, "fill count")?;
            if fill > block_size {
                return Err(Error::corrupt(format!(
                    "fill count {} exceeds block size {}",
                    fill, block_size
                )));
            }
            if total + fill > len {
                return Err(Error::corrupt(format!(
                    "blocks hold more than the declared {} elements",
                    len
                )));
            }
            if fill == 0 {
                continue;
            }
            let mut block = Block::with_len_hint(block_size, fill.min(MAX_PREALLOC));
            for _ in 0..fill {
                block.push(T::decode(input)?);
            }
            total += fill;
            list.blocks.push(block);
        }

        if total != len {
            return Err(Error::corrupt(format!(
                "declared {} elements but blocks hold {}",
                len, total
            )));
        }
        if list.blocks.is_empty() {
            list.blocks.push(Block::with_len_hint(block_size, 0));
        }
        list.len = len;

        debug!(block_size, len, blocks = list.blocks.len(), "read snapshot");
        return Ok(list);
    }

    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_snapshot(&mut out)?;
        return Ok(out);
    }

    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<BlockList<T>> {
        let mut input = bytes;
        return BlockList::read_snapshot(&mut input);
    }
}
