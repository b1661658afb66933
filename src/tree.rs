//! Group hierarchies.
//!
//! Tree endpoints return a forest of groups nested through `children`.
//! Listings and parent pickers want the flat form instead: depth-first
//! pre-order with each group's depth and parent filled in.
//!
//! TRADE-OFFS
//! ==========
//! The backend does not guarantee acyclic data. Every walk here tracks the ids
//! it has seen and skips repeats, so a malformed parent chain yields a
//! truncated result instead of an endless loop.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;

use std::collections::{HashMap, HashSet};

/// A group that can sit in a parent/child hierarchy.
pub trait TreeNode: Sized {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn parent_id(&self) -> Option<i64>;
    /// Detach and return the nested children.
    fn take_children(&mut self) -> Vec<Self>;
    /// Record where the node landed in the flattened order.
    fn place(&mut self, level: u32, parent_id: Option<i64>);
}

/// Flatten a forest into depth-first pre-order.
///
/// Roots get level `0` and no parent; each child is one level below the node
/// it was nested in. A node whose id was already emitted is dropped together
/// with its subtree.
pub fn flatten_tree<T: TreeNode>(roots: Vec<T>) -> Vec<T> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<(T, u32, Option<i64>)> = roots.into_iter().rev().map(|n| (n, 0, None)).collect();

    while let Some((mut node, level, parent)) = stack.pop() {
        if !seen.insert(node.id()) {
            tracing::warn!(id = node.id(), "group appears more than once in tree; skipping");
            continue;
        }
        let children = node.take_children();
        node.place(level, parent);
        let id = node.id();
        out.push(node);
        stack.extend(children.into_iter().rev().map(|child| (child, level + 1, Some(id))));
    }
    out
}

/// Map each group id to its parent's name, for groups whose parent is present.
pub fn link_parents<T: TreeNode>(nodes: &[T]) -> HashMap<i64, String> {
    let names: HashMap<i64, &str> = nodes.iter().map(|n| (n.id(), n.name())).collect();
    nodes
        .iter()
        .filter_map(|n| {
            let parent = n.parent_id()?;
            names.get(&parent).map(|name| (n.id(), (*name).to_owned()))
        })
        .collect()
}

/// Ids of every group below `root` in a flat list linked by `parent_id`.
pub fn descendant_ids<T: TreeNode>(nodes: &[T], root: i64) -> HashSet<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent_id() {
            children.entry(parent).or_default().push(node.id());
        }
    }

    let mut found = HashSet::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        for &child in children.get(&id).map_or(&[][..], Vec::as_slice) {
            if child != root && found.insert(child) {
                pending.push(child);
            }
        }
    }
    found
}

/// Groups that may become the parent of `editing` without creating a cycle:
/// everything except the group itself and its descendants.
pub fn parent_candidates<T: TreeNode>(nodes: &[T], editing: i64) -> Vec<&T> {
    let excluded = descendant_ids(nodes, editing);
    nodes
        .iter()
        .filter(|n| n.id() != editing && !excluded.contains(&n.id()))
        .collect()
}
