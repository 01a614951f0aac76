use itertools::Itertools;
use mindex_core::collections::{ConcurrentMap, ConcurrentSet};
use mindex_core::frame::FrameFieldSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time, deterministically ordered copy of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub frame_aware: Vec<String>,
    pub scope_aware: Vec<String>,
    pub reads: BTreeMap<String, FrameFieldSet>,
    pub writes: BTreeMap<String, FrameFieldSet>,
}

impl RegistrySnapshot {
    pub(super) fn capture(
        frame_aware: &ConcurrentSet<String>,
        scope_aware: &ConcurrentSet<String>,
        reads: &ConcurrentMap<String, FrameFieldSet>,
        writes: &ConcurrentMap<String, FrameFieldSet>,
    ) -> Self {
        Self {
            frame_aware: sorted(frame_aware),
            scope_aware: sorted(scope_aware),
            reads: collect_map(reads),
            writes: collect_map(writes),
        }
    }

    pub fn to_json(&self) -> mindex_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn sorted(set: &ConcurrentSet<String>) -> Vec<String> {
    set.to_vec().into_iter().sorted_unstable().collect()
}

fn collect_map(map: &ConcurrentMap<String, FrameFieldSet>) -> BTreeMap<String, FrameFieldSet> {
    let mut out = BTreeMap::new();
    map.for_each(|name, fields| {
        out.insert(name.clone(), fields.clone());
    });
    out
}
