//! Which caller frame and scope fields each method touches.
//!
//! Built-in methods declare their needs while the runtime boots, possibly from
//! several threads at once. The compiler then asks whether a callee can observe
//! the caller's frame or scope before eliding it. Entries only ever grow.

mod snapshot;

use mindex_core::collections::{ConcurrentMap, ConcurrentSet};
use mindex_core::debug;
use mindex_core::frame::{FrameBits, FrameField, FrameFieldCodec, FrameFieldSet, PackedFrameFields};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub use snapshot::RegistrySnapshot;

/// Separator used by batched method-name registrations.
pub const METHOD_NAME_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldUsage {
    Read,
    Write,
}

impl Display for FieldUsage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldUsage::Read => f.write_str("read"),
            FieldUsage::Write => f.write_str("write"),
        }
    }
}

/// Read side of the registry, as consumed by the compiler.
pub trait FrameRequirements {
    fn is_frame_aware(&self, name: &str) -> bool;
    fn is_scope_aware(&self, name: &str) -> bool;
    /// Fields `name` reads; empty for unknown names.
    fn reads(&self, name: &str) -> FrameFieldSet;
    /// Fields `name` writes; empty for unknown names.
    fn writes(&self, name: &str) -> FrameFieldSet;

    fn fields(&self, name: &str, usage: FieldUsage) -> FrameFieldSet {
        match usage {
            FieldUsage::Read => self.reads(name),
            FieldUsage::Write => self.writes(name),
        }
    }
}

/// Splits a `;`-joined batch of method names.
///
/// Trailing empty segments are dropped, so a batch of only separators yields no
/// names; other empty segments are kept as-is. An empty batch is one empty name.
pub fn split_method_names(batch: &str) -> Vec<&str> {
    if batch.is_empty() {
        return vec![batch];
    }
    let mut names: Vec<&str> = batch.split(METHOD_NAME_SEPARATOR).collect();
    while names.last().is_some_and(|name| name.is_empty()) {
        names.pop();
    }
    names
}

pub struct FrameRequirementRegistry {
    codec: Arc<dyn FrameFieldCodec>,
    frame_aware: ConcurrentSet<String>,
    scope_aware: ConcurrentSet<String>,
    reads: ConcurrentMap<String, FrameFieldSet>,
    writes: ConcurrentMap<String, FrameFieldSet>,
}

impl Default for FrameRequirementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRequirementRegistry {
    pub fn new() -> Self {
        Self::with_codec(Arc::new(PackedFrameFields))
    }

    pub fn with_codec(codec: Arc<dyn FrameFieldCodec>) -> Self {
        Self {
            codec,
            frame_aware: ConcurrentSet::new(),
            scope_aware: ConcurrentSet::new(),
            reads: ConcurrentMap::new(),
            writes: ConcurrentMap::new(),
        }
    }

    /// Records that every method in `names` accesses the fields packed in `bits`.
    ///
    /// Registrations whose bits unpack to no field are dropped entirely, even if
    /// the codec reports that they need a frame or scope.
    pub fn register_field_usage(&self, names: &str, bits: FrameBits, usage: FieldUsage) {
        let fields = self.codec.unpack(bits);
        let needs_frame = self.codec.needs_frame(bits);
        let needs_scope = self.codec.needs_scope(bits);

        debug!(
            %usage,
            methods = names,
            ?fields,
            needs_frame,
            needs_scope,
            "adding method frame fields"
        );

        if fields.is_empty() {
            return;
        }

        let names = split_method_names(names);
        self.add_awareness(needs_frame, needs_scope, &names);

        let accesses = match usage {
            FieldUsage::Read => &self.reads,
            FieldUsage::Write => &self.writes,
        };
        for name in names {
            accesses.upsert_with(name.to_string(), |current| {
                current.extend(fields.iter().copied());
            });
        }
    }

    pub fn add_method_read_fields_packed(&self, bits: FrameBits, names: &str) {
        self.register_field_usage(names, bits, FieldUsage::Read);
    }

    pub fn add_method_write_fields_packed(&self, bits: FrameBits, names: &str) {
        self.register_field_usage(names, bits, FieldUsage::Write);
    }

    pub fn add_method_read_fields(&self, name: &str, reads: &[FrameField]) {
        self.add_method_read_fields_packed(self.codec.pack(reads), name);
    }

    pub fn add_method_write_fields(&self, name: &str, writes: &[FrameField]) {
        self.add_method_write_fields_packed(self.codec.pack(writes), name);
    }

    fn add_awareness(&self, needs_frame: bool, needs_scope: bool, names: &[&str]) {
        if needs_frame {
            self.frame_aware
                .extend(names.iter().map(|name| name.to_string()));
        }
        if needs_scope {
            self.scope_aware
                .extend(names.iter().map(|name| name.to_string()));
        }
    }

    /// Marks whole method names as frame-aware without recording any field.
    ///
    /// Coarser predecessor of [`Self::add_method_read_fields`]; shares its
    /// frame-aware set.
    #[deprecated(note = "register the fields read or written instead")]
    pub fn add_frame_aware_methods(&self, names: &[&str]) {
        debug!(?names, "adding frame-aware method names");
        self.frame_aware
            .extend(names.iter().map(|name| name.to_string()));
    }

    /// Scope counterpart of [`Self::add_frame_aware_methods`].
    #[deprecated(note = "register the fields read or written instead")]
    pub fn add_scope_aware_methods(&self, names: &[&str]) {
        debug!(?names, "adding scope-aware method names");
        self.scope_aware
            .extend(names.iter().map(|name| name.to_string()));
    }

    pub fn frame_aware_count(&self) -> usize {
        self.frame_aware.len()
    }

    pub fn scope_aware_count(&self) -> usize {
        self.scope_aware.len()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::capture(
            &self.frame_aware,
            &self.scope_aware,
            &self.reads,
            &self.writes,
        )
    }
}

impl FrameRequirements for FrameRequirementRegistry {
    fn is_frame_aware(&self, name: &str) -> bool {
        self.frame_aware.contains(name)
    }

    fn is_scope_aware(&self, name: &str) -> bool {
        self.scope_aware.contains(name)
    }

    fn reads(&self, name: &str) -> FrameFieldSet {
        self.reads.get_cloned(name).unwrap_or_default()
    }

    fn writes(&self, name: &str) -> FrameFieldSet {
        self.writes.get_cloned(name).unwrap_or_default()
    }
}
