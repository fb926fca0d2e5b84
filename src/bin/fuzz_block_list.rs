//! AFL Fuzz harness for BlockList
//!
//! Drives a BlockList and a Vec with the same operations and checks:
//! 1. Agreement: both hold the same sequence after every operation
//! 2. Layout: block fill counts sum to the length, none exceed the block
//!    size, and no block is empty unless the list is
//! 3. Snapshots: writing and reading back reproduces the list

use afl::fuzz;
use blocklist::BlockList;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Push { value: u8 },
    Insert { pos_frac: u8, value: u8 },
    Remove { pos_frac: u8 },
    Set { pos_frac: u8, value: u8 },
    /// Drop every element whose value is below the threshold
    Retain { threshold: u8 },
    RemoveValue { value: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 6;
        let rest = &bytes[1..];

        match op_type {
            0 if !rest.is_empty() => Some((FuzzOp::Push { value: rest[0] }, &rest[1..])),
            1 if rest.len() >= 2 => {
                let op = FuzzOp::Insert {
                    pos_frac: rest[0],
                    value: rest[1],
                };
                Some((op, &rest[2..]))
            }
            2 if !rest.is_empty() => Some((FuzzOp::Remove { pos_frac: rest[0] }, &rest[1..])),
            3 if rest.len() >= 2 => {
                let op = FuzzOp::Set {
                    pos_frac: rest[0],
                    value: rest[1],
                };
                Some((op, &rest[2..]))
            }
            4 if !rest.is_empty() => Some((FuzzOp::Retain { threshold: rest[0] / 16 }, &rest[1..])),
            5 if !rest.is_empty() => Some((FuzzOp::RemoveValue { value: rest[0] }, &rest[1..])),
            _ => None,
        }
    }
}

fn scale(pos_frac: u8, len: usize) -> usize {
    return (pos_frac as usize) * len / 256;
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.is_empty() {
            return;
        }
        // First byte picks a small block size so splits happen constantly.
        let block_size = (data[0] % 8) as usize + 1;
        let mut list: BlockList<u8> = match BlockList::with_block_size(block_size) {
            Ok(list) => list,
            Err(_) => return,
        };
        let mut model: Vec<u8> = Vec::new();
        let mut remaining = &data[1..];

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Push { value } => {
                    list.push(value);
                    model.push(value);
                }
                FuzzOp::Insert { pos_frac, value } => {
                    let pos = scale(pos_frac, model.len() + 1);
                    list.insert(pos, value).unwrap();
                    model.insert(pos, value);
                }
                FuzzOp::Remove { pos_frac } => {
                    if model.is_empty() {
                        assert!(list.remove(0).is_err());
                    } else {
                        let pos = scale(pos_frac, model.len());
                        assert_eq!(list.remove(pos).unwrap(), model.remove(pos));
                    }
                }
                FuzzOp::Set { pos_frac, value } => {
                    if !model.is_empty() {
                        let pos = scale(pos_frac, model.len());
                        let revision = list.revision();
                        let old = std::mem::replace(&mut model[pos], value);
                        assert_eq!(list.set(pos, value).unwrap(), old);
                        assert_eq!(list.revision(), revision);
                    }
                }
                FuzzOp::Retain { threshold } => {
                    let changed = list.retain(|&v| v >= threshold);
                    let before = model.len();
                    model.retain(|&v| v >= threshold);
                    assert_eq!(changed, model.len() != before);
                }
                FuzzOp::RemoveValue { value } => {
                    let found = list.remove_value(&value);
                    match model.iter().position(|&v| v == value) {
                        Some(pos) => {
                            assert!(found);
                            model.remove(pos);
                        }
                        None => assert!(!found),
                    }
                }
            }

            // CRITICAL INVARIANT: same sequence as the model
            assert_eq!(list.len(), model.len());
            assert!(list.iter().eq(model.iter()), "Sequence mismatch after {:?}", op);

            let lens: Vec<usize> = list.block_lens().collect();
            assert_eq!(lens.iter().sum::<usize>(), model.len(), "Fill count mismatch");
            assert!(lens.iter().all(|&n| n <= block_size), "Overfull block: {:?}", lens);
            if !model.is_empty() {
                assert!(lens.iter().all(|&n| n > 0), "Empty block: {:?}", lens);
            }
        }

        let bytes = list.to_snapshot_bytes().unwrap();
        let copy: BlockList<u8> = BlockList::from_snapshot_bytes(&bytes).unwrap();
        assert_eq!(copy, list, "Snapshot round trip mismatch");
    });
}
