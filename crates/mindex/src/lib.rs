//! Call-site kind selection and per-method frame requirements for a
//! dynamic-language runtime.

pub mod callsite;
pub mod frame;
mod index;
pub mod legacy;

pub use callsite::{
    call_site, functional_call_site, select_call_site, super_call_site, variable_call_site,
    CallSiteFactory, CallSiteKind, FastOp, NumericKind,
};
pub use frame::{FieldUsage, FrameRequirementRegistry, FrameRequirements, RegistrySnapshot};
pub use index::MethodIndex;
pub use mindex_core::config::DispatchConfig;
pub use mindex_core::frame::{FrameBits, FrameField, FrameFieldCodec, FrameFieldSet};
