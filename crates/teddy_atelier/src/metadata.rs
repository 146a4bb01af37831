//! Reconciliation side table.

use rustc_hash::FxHashMap;
use teddy_canvas::HostId;
use teddy_relief::{InstanceId, Node};

/// What a placed-into host node was last given.
///
/// Its presence on a target is the only signal that switches `render`
/// from placement to update.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    /// The placed root was a component
    Component(InstanceId),
    /// The placed root was anything else
    Node(Node),
}

/// Side table keyed by host node identity.
#[derive(Debug, Default)]
pub(crate) struct MetadataTable {
    entries: FxHashMap<HostId, Metadata>,
}

impl MetadataTable {
    pub fn get(&self, host: HostId) -> Option<&Metadata> {
        self.entries.get(&host)
    }

    pub fn contains(&self, host: HostId) -> bool {
        self.entries.contains_key(&host)
    }

    pub fn insert(&mut self, host: HostId, metadata: Metadata) {
        self.entries.insert(host, metadata);
    }

    /// Drop the entries of host nodes that no longer exist.
    pub fn forget(&mut self, removed: &[HostId]) {
        for host in removed {
            self.entries.remove(host);
        }
    }
}
