//! Serde support, behind the `serde` feature.
//!
//! A list serializes as a plain sequence. Block layout is not part of the
//! serialized form; deserialized lists use the default configuration.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::ser::SerializeSeq;

use crate::list::BlockList;

impl<T: Serialize> Serialize for BlockList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        return seq.end();
    }
}

struct BlockListVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for BlockListVisitor<T> {
    type Value = BlockList<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str("a sequence");
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<BlockList<T>, A::Error> {
        let mut list = BlockList::new();
        while let Some(item) = seq.next_element()? {
            list.push(item);
        }
        return Ok(list);
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for BlockList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        return deserializer.deserialize_seq(BlockListVisitor {
            marker: PhantomData,
        });
    }
}
