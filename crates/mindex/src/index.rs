use crate::callsite::{self, CallSiteFactory, CallSiteKind};
use crate::frame::{FrameRequirementRegistry, FrameRequirements};
use mindex_core::config::{self, DispatchConfig};
use mindex_core::frame::FrameFieldSet;
use std::sync::LazyLock;

/// Call-site selection and frame requirements for one runtime.
///
/// The process normally uses [`MethodIndex::global`]; separate instances are
/// handy when a test needs its own configuration or an empty registry.
pub struct MethodIndex {
    config: DispatchConfig,
    frames: FrameRequirementRegistry,
}

static GLOBAL: LazyLock<MethodIndex> = LazyLock::new(|| MethodIndex::new(*config::global()));

impl MethodIndex {
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_registry(config, FrameRequirementRegistry::new())
    }

    pub fn with_registry(config: DispatchConfig, frames: FrameRequirementRegistry) -> Self {
        Self { config, frames }
    }

    pub fn global() -> &'static MethodIndex {
        &GLOBAL
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Write access for bootstrap code registering built-in methods.
    pub fn frames(&self) -> &FrameRequirementRegistry {
        &self.frames
    }

    pub fn call_site(&self, name: &str) -> CallSiteKind {
        callsite::select_call_site(name, &self.config)
    }

    pub fn instantiate<F: CallSiteFactory>(&self, factory: &F, name: &str) -> F::CallSite {
        callsite::instantiate_call_site(factory, name, &self.config)
    }
}

impl FrameRequirements for MethodIndex {
    fn is_frame_aware(&self, name: &str) -> bool {
        self.frames.is_frame_aware(name)
    }

    fn is_scope_aware(&self, name: &str) -> bool {
        self.frames.is_scope_aware(name)
    }

    fn reads(&self, name: &str) -> FrameFieldSet {
        self.frames.reads(name)
    }

    fn writes(&self, name: &str) -> FrameFieldSet {
        self.frames.writes(name)
    }
}
