//! Method-name ordinals from before call sites cached by name.
//!
//! Nothing in this crate reads them; they stay so older callers keep compiling.
#![allow(deprecated)]

use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum MethodNames {
    Dummy,
    OpEqual,
    Eql,
    Hash,
    OpCmp,
}

impl MethodNames {
    pub fn name(self) -> &'static str {
        METHOD_NAMES[self as usize]
    }
}

#[deprecated]
pub const NO_METHOD: usize = MethodNames::Dummy as usize;
#[deprecated]
pub const OP_EQUAL: usize = MethodNames::OpEqual as usize;
#[deprecated]
pub const EQL: usize = MethodNames::Eql as usize;
#[deprecated]
pub const HASH: usize = MethodNames::Hash as usize;
#[deprecated]
pub const OP_CMP: usize = MethodNames::OpCmp as usize;
#[deprecated]
pub const MAX_METHODS: usize = MethodNames::COUNT;

#[deprecated]
pub const METHOD_NAMES: [&str; MethodNames::COUNT] = ["", "==", "eql?", "hash", "<=>"];
