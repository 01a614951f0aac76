//! Caller activation-state fields and their packed bit representation.
//!
//! Built-in methods describe the caller state they touch as a bitmask. The
//! registry only ever sees that mask through a [`FrameFieldCodec`], so the bit
//! layout can change without touching the consumers.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

pub type FrameBits = u32;

pub type FrameFieldSet = BTreeSet<FrameField>;

/// One piece of caller state a callee may read or write.
///
/// Declaration order is bit order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FrameField {
    /// Last line read by `gets` and friends.
    LastLine,
    /// Last regular-expression match.
    BackRef,
    Visibility,
    Block,
    #[strum(serialize = "self")]
    #[serde(rename = "self")]
    SelfValue,
    MethodName,
    Line,
    JumpTarget,
    Class,
    Filename,
    /// The whole local-variable scope, e.g. captured by `binding`.
    Scope,
}

impl FrameField {
    pub const FRAME_FIELDS: &'static [FrameField] = &[
        FrameField::Visibility,
        FrameField::Block,
        FrameField::SelfValue,
        FrameField::MethodName,
        FrameField::Line,
        FrameField::JumpTarget,
        FrameField::Class,
        FrameField::Filename,
    ];

    pub const SCOPE_FIELDS: &'static [FrameField] =
        &[FrameField::LastLine, FrameField::BackRef, FrameField::Scope];

    pub const fn bit(self) -> FrameBits {
        1 << (self as u32)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_frame_field(self) -> bool {
        Self::FRAME_FIELDS.contains(&self)
    }

    pub fn is_scope_field(self) -> bool {
        Self::SCOPE_FIELDS.contains(&self)
    }
}

impl Display for FrameField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        FrameField::iter()
            .find(|field| field.name() == needle)
            .ok_or_else(|| Error::UnknownFrameField(s.to_string()))
    }
}

const fn mask_of(fields: &[FrameField]) -> FrameBits {
    let mut bits = 0;
    let mut i = 0;
    while i < fields.len() {
        bits |= fields[i].bit();
        i += 1;
    }
    bits
}

pub const FRAME_MASK: FrameBits = mask_of(FrameField::FRAME_FIELDS);
pub const SCOPE_MASK: FrameBits = mask_of(FrameField::SCOPE_FIELDS);

/// The bit-packing collaborator consumed by the frame-requirement registry.
pub trait FrameFieldCodec: Send + Sync {
    fn unpack(&self, bits: FrameBits) -> FrameFieldSet;
    fn pack(&self, fields: &[FrameField]) -> FrameBits;
    fn needs_frame(&self, bits: FrameBits) -> bool;
    fn needs_scope(&self, bits: FrameBits) -> bool;
}

/// Default codec: bit `i` is the `i`-th [`FrameField`]; unknown bits are ignored
/// by `unpack` and by both predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedFrameFields;

impl FrameFieldCodec for PackedFrameFields {
    fn unpack(&self, bits: FrameBits) -> FrameFieldSet {
        FrameField::iter()
            .filter(|field| bits & field.bit() != 0)
            .collect()
    }

    fn pack(&self, fields: &[FrameField]) -> FrameBits {
        fields.iter().fold(0, |bits, field| bits | field.bit())
    }

    fn needs_frame(&self, bits: FrameBits) -> bool {
        bits & FRAME_MASK != 0
    }

    fn needs_scope(&self, bits: FrameBits) -> bool {
        bits & SCOPE_MASK != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_and_scope_masks_partition_all_fields() {
        let all = mask_of(&FrameField::iter().collect::<Vec<_>>());
        assert_eq!(FRAME_MASK & SCOPE_MASK, 0);
        assert_eq!(FRAME_MASK | SCOPE_MASK, all);
    }

    #[test]
    fn unpack_ignores_unassigned_bits() {
        let codec = PackedFrameFields;
        let bits = FrameField::Block.bit() | (1 << 30);
        assert_eq!(codec.unpack(bits), FrameFieldSet::from([FrameField::Block]));
        assert!(!codec.needs_frame(1 << 30));
        assert!(!codec.needs_scope(1 << 30));
    }

    #[test]
    fn field_names_parse_back() {
        for field in FrameField::iter() {
            assert_eq!(field.name().parse::<FrameField>().unwrap(), field);
        }
        assert_eq!("SELF".parse::<FrameField>().unwrap(), FrameField::SelfValue);
        assert!(matches!(
            "frame".parse::<FrameField>(),
            Err(Error::UnknownFrameField(name)) if name == "frame"
        ));
    }
}
