//! Table-driven bit extraction.
//!
//! Layouts describe single-bit fields as data: a `(byte, bit)` position plus
//! either a setter (`BitField`) or a named flag (`FlagBit`). One walker per
//! kind tests each position, so the same physical bit can mean different
//! things in different tables without any hand-written shifts.
//!
//! Positions are relative to the slice handed to the walker, and a byte
//! beyond the slice reads as `false`.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A single bit bound to a setter on `T`.
pub struct BitField<T> {
    pub byte: usize,
    pub bit: u8,
    pub set: fn(&mut T, bool),
}

/// A single bit that, when set, adds `flag` to a `FlagSet`.
pub struct FlagBit<F> {
    pub byte: usize,
    pub bit: u8,
    pub flag: F,
}

/// A named capability or compliance code.
pub trait Flag: Copy + Eq {
    fn name(self) -> &'static str;
}

pub fn bit_is_set(raw: &[u8], byte: usize, bit: u8) -> bool {
    raw.get(byte).is_some_and(|value| value & (1 << bit) != 0)
}

/// Populate a `T` by invoking every setter in `table` with its bit value.
pub fn decode_fields<T: Default>(raw: &[u8], table: &[BitField<T>]) -> T {
    let mut target = T::default();
    for field in table {
        (field.set)(&mut target, bit_is_set(raw, field.byte, field.bit));
    }
    target
}

/// Collect the flags of `table` whose bit is set, in table order.
pub fn decode_flags<F: Flag>(raw: &[u8], table: &[FlagBit<F>]) -> FlagSet<F> {
    let flags = table
        .iter()
        .filter(|entry| bit_is_set(raw, entry.byte, entry.bit))
        .map(|entry| entry.flag)
        .collect();
    FlagSet { flags }
}

/// Ordered set of flags; serializes as the list of flag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet<F> {
    flags: Vec<F>,
}

impl<F> Default for FlagSet<F> {
    fn default() -> Self {
        Self { flags: Vec::new() }
    }
}

impl<F: Flag> FlagSet<F> {
    pub fn contains(&self, flag: F) -> bool {
        self.flags.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.flags.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(Flag::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }
}

impl<F: Flag> Serialize for FlagSet<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.flags.len()))?;
        for flag in &self.flags {
            seq.serialize_element(flag.name())?;
        }
        seq.end()
    }
}
