// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched render damage drained by [`FeatureStore::take_damage`](crate::FeatureStore::take_damage).

use alloc::vec::Vec;

use crate::types::FeatureId;

/// Feature ids whose rendered state changed since the last drain.
///
/// The rendering collaborator re-renders each `updated` feature (keyed by
/// [`FeatureId::to_bits`] plus its fixed layer suffixes) and drops the layers
/// of each `removed` feature. Ids are deduplicated; an id removed after being
/// updated appears only in `removed`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometryDamage {
    /// Features whose geometry or properties changed.
    pub updated: Vec<FeatureId>,
    /// Features deleted from the store.
    pub removed: Vec<FeatureId>,
}

impl GeometryDamage {
    /// True if no damage was recorded.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }

    pub(crate) fn record_updated(&mut self, id: FeatureId) {
        if !self.updated.contains(&id) {
            self.updated.push(id);
        }
    }

    pub(crate) fn record_removed(&mut self, id: FeatureId) {
        self.updated.retain(|u| *u != id);
        if !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureId;

    #[test]
    fn updated_ids_are_deduplicated() {
        let mut d = GeometryDamage::default();
        let id = FeatureId::new(0, 1);
        d.record_updated(id);
        d.record_updated(id);
        assert_eq!(d.updated.len(), 1);
    }

    #[test]
    fn removal_supersedes_update() {
        let mut d = GeometryDamage::default();
        let id = FeatureId::new(0, 1);
        d.record_updated(id);
        d.record_removed(id);
        assert!(d.updated.is_empty());
        assert_eq!(d.removed, [id]);
    }
}
