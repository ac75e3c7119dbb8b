use ahash::HashSet;
use itertools::Itertools as _;

use super::DockManager;
use super::container::ContainerHost;
use super::split_tree::LayoutNode;
use super::types::{DockPos, PageContent};

impl<C: PageContent> DockManager<C> {
    /// Audit the registry, returning one line per broken invariant (empty when healthy).
    ///
    /// Checked:
    /// - the split tree is a tree (see [`super::SplitTree`]);
    /// - every docked container is a leaf exactly once, every leaf is a live docked container;
    /// - floating containers and floating hosts point at each other and are out of the tree;
    /// - the z-order lists every floating host once;
    /// - slot, maximize and drag references are live;
    /// - tab selections are in range.
    pub fn integrity_issues(&self) -> Vec<String> {
        let mut issues = self.tree.integrity_issues();

        let leaves: HashSet<_> = self.tree.containers().into_iter().collect();
        for &leaf in &leaves {
            match self.containers.get(&leaf).map(|c| c.host()) {
                None => issues.push(format!(
                    "integrity: tree leaf references missing container {}",
                    leaf.as_u64()
                )),
                Some(ContainerHost::Floating(f)) => issues.push(format!(
                    "integrity: floating container {} (host {}) is in the split tree",
                    leaf.as_u64(),
                    f.as_u64()
                )),
                Some(ContainerHost::Docked) => {}
            }
        }

        for (id, container) in &self.containers {
            if container.id() != *id {
                issues.push(format!(
                    "integrity: container keyed {} reports id {}",
                    id.as_u64(),
                    container.id().as_u64()
                ));
            }
            match container.host() {
                ContainerHost::Docked => {
                    if !leaves.contains(id) {
                        issues.push(format!(
                            "integrity: docked container {} is not in the split tree",
                            id.as_u64()
                        ));
                    }
                }
                ContainerHost::Floating(f) => {
                    if self.floating.get(&f).map(|h| h.container) != Some(*id) {
                        issues.push(format!(
                            "integrity: floating container {} has no host {}",
                            id.as_u64(),
                            f.as_u64()
                        ));
                    }
                }
            }

            let tabs = container.tabs();
            match tabs.active() {
                None if !tabs.is_empty() => issues.push(format!(
                    "integrity: container {} has {} page(s) but no selection",
                    id.as_u64(),
                    tabs.len()
                )),
                Some(active) if active >= tabs.len() => issues.push(format!(
                    "integrity: container {} selection {active} out of range {}",
                    id.as_u64(),
                    tabs.len()
                )),
                _ => {}
            }
        }

        // A root leaf is only fine if it is the center. Once the center slot is closed, closing
        // the rest may legitimately leave any one container alone at the root.
        if let Some(LayoutNode::Leaf(only)) = self.tree.root().and_then(|r| self.tree.get(r))
            && let Some(center) = self.slot(DockPos::Center)
            && *only != center
        {
            issues.push(format!(
                "integrity: container {} has no splitter ancestor",
                only.as_u64()
            ));
        }

        for (id, host) in &self.floating {
            if self.containers.get(&host.container).map(|c| c.host())
                != Some(ContainerHost::Floating(*id))
            {
                issues.push(format!(
                    "integrity: floating host {} points at container {} which is not hosted there",
                    id.as_u64(),
                    host.container.as_u64()
                ));
            }
            if !self.z_order.contains(id) {
                issues.push(format!(
                    "integrity: floating host {} missing from z-order",
                    id.as_u64()
                ));
            }
        }
        for id in self.z_order.iter().duplicates() {
            issues.push(format!(
                "integrity: floating host {} appears more than once in z-order",
                id.as_u64()
            ));
        }
        for id in &self.z_order {
            if !self.floating.contains_key(id) {
                issues.push(format!(
                    "integrity: z-order references missing floating host {}",
                    id.as_u64()
                ));
            }
        }

        for pos in DockPos::ALL {
            if let Some(id) = self.slots.get(pos)
                && self.containers.get(&id).is_some_and(|c| c.is_floating())
            {
                issues.push(format!(
                    "integrity: slot {pos:?} points at floating container {}",
                    id.as_u64()
                ));
            }
        }

        if let Some(id) = self.maximized
            && !leaves.contains(&id)
        {
            issues.push(format!(
                "integrity: maximized container {} is not docked",
                id.as_u64()
            ));
        }

        if let Some(session) = self.drag.session()
            && !self.containers.contains_key(&session.source)
        {
            issues.push(format!(
                "integrity: drag session {} source {} missing",
                session.id,
                session.source.as_u64()
            ));
        }

        issues
    }
}
