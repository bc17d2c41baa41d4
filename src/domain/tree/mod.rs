//! Component Tree
//!
//! Leaves and composites share one operation. Nodes live in an arena owned
//! by the [`ComponentTree`] and are addressed by [`NodeId`]; a node may be
//! the child of several composites, so the structure is a DAG. A single
//! lock guards the arena: mutations are exclusive with traversal, and the
//! cycle check and the insertion it guards happen atomically.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::capability::Capability;
use super::outcome::{Invocation, Outcome};
use crate::error::{KitError, KitResult};

/// Separator placed between a composite's label and its children's results.
pub const DEFAULT_SEPARATOR: &str = "\n";

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Handle to a node. Ids are unique across all trees in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Leaf or composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Composite(Vec<NodeId>),
}

#[derive(Debug)]
struct Node {
    label: String,
    kind: NodeKind,
}

type Arena = HashMap<NodeId, Node>;

/// Arena of component nodes.
#[derive(Debug)]
pub struct ComponentTree {
    nodes: RwLock<Arena>,
    separator: String,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn read(&self) -> RwLockReadGuard<'_, Arena> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arena> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn new_leaf(&self, label: impl Into<String>) -> NodeId {
        self.insert(label.into(), NodeKind::Leaf)
    }

    pub fn new_composite(&self, label: impl Into<String>) -> NodeId {
        self.insert(label.into(), NodeKind::Composite(Vec::new()))
    }

    fn insert(&self, label: String, kind: NodeKind) -> NodeId {
        let id = NodeId::next();
        self.write().insert(id, Node { label, kind });
        id
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&self, parent: NodeId, child: NodeId) -> KitResult<()> {
        let mut nodes = self.write();
        let child_label = lookup(&nodes, child)?.label.clone();
        let parent_node = lookup(&nodes, parent)?;

        if !matches!(parent_node.kind, NodeKind::Composite(_)) {
            return Err(KitError::NotComposite {
                label: parent_node.label.clone(),
            });
        }
        if reaches(&nodes, child, parent) {
            return Err(KitError::Cycle {
                parent: parent_node.label.clone(),
                child: child_label,
            });
        }

        if let Some(Node {
            kind: NodeKind::Composite(children),
            label,
        }) = nodes.get_mut(&parent)
        {
            debug!(parent = %label, child = %child_label, "adding child");
            children.push(child);
        }
        Ok(())
    }

    /// Remove the first occurrence of `child` from `parent`'s children.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> KitResult<()> {
        let mut nodes = self.write();
        let child_label = lookup(&nodes, child)?.label.clone();
        let node = nodes
            .get_mut(&parent)
            .ok_or_else(|| KitError::not_found("node", format!("{parent:?}")))?;

        let position = match &node.kind {
            NodeKind::Composite(children) => children.iter().position(|c| *c == child),
            NodeKind::Leaf => None,
        };
        match (position, &mut node.kind) {
            (Some(index), NodeKind::Composite(children)) => {
                children.remove(index);
                debug!(parent = %node.label, child = %child_label, "removed child");
                Ok(())
            }
            _ => Err(KitError::not_found("child", child_label)),
        }
    }

    /// Detach `node` from every parent and drop it from the arena, along with
    /// any descendants no surviving composite still holds. Returns the number
    /// of nodes freed.
    pub fn remove_node(&self, node: NodeId) -> KitResult<usize> {
        let mut nodes = self.write();
        lookup(&nodes, node)?;

        for other in nodes.values_mut() {
            if let NodeKind::Composite(children) = &mut other.kind {
                children.retain(|c| *c != node);
            }
        }

        let mut freed = 0;
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let held = nodes
                .values()
                .any(|n| matches!(&n.kind, NodeKind::Composite(c) if c.contains(&id)));
            if held {
                continue;
            }
            let Some(removed) = nodes.remove(&id) else {
                continue;
            };
            debug!(label = %removed.label, "freed node");
            freed += 1;
            if let NodeKind::Composite(children) = removed.kind {
                pending.extend(children);
            }
        }
        Ok(freed)
    }

    /// Leaf: its label. Composite: its label followed by each child's
    /// result, in insertion order, joined by the separator.
    pub fn operate(&self, node: NodeId) -> KitResult<String> {
        self.fold(
            node,
            |label| label.to_string(),
            |label, children| {
                std::iter::once(label.to_string())
                    .chain(children)
                    .collect::<Vec<_>>()
                    .join(&self.separator)
            },
        )
    }

    /// Depth-first, pre-order aggregation over a consistent snapshot.
    pub fn fold<R, L, C>(&self, node: NodeId, leaf: L, composite: C) -> KitResult<R>
    where
        L: Fn(&str) -> R,
        C: Fn(&str, Vec<R>) -> R,
    {
        let nodes = self.read();
        fold_node(&nodes, node, &leaf, &composite)
    }

    pub fn label(&self, node: NodeId) -> KitResult<String> {
        Ok(lookup(&self.read(), node)?.label.clone())
    }

    pub fn kind(&self, node: NodeId) -> KitResult<NodeKind> {
        Ok(lookup(&self.read(), node)?.kind.clone())
    }

    pub fn is_composite(&self, node: NodeId) -> KitResult<bool> {
        Ok(matches!(self.kind(node)?, NodeKind::Composite(_)))
    }

    /// Children in insertion order; empty for leaves.
    pub fn children(&self, node: NodeId) -> KitResult<Vec<NodeId>> {
        Ok(match self.kind(node)? {
            NodeKind::Composite(children) => children,
            NodeKind::Leaf => Vec::new(),
        })
    }

    /// Composites that hold `node` directly.
    pub fn parents(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.read();
        let mut parents: Vec<NodeId> = nodes
            .iter()
            .filter(|(_, n)| matches!(&n.kind, NodeKind::Composite(c) if c.contains(&node)))
            .map(|(id, _)| *id)
            .collect();
        parents.sort();
        parents
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.read().contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expose `node` as a capability so it can be wrapped or guarded.
    pub fn capability(self: &Arc<Self>, node: NodeId) -> NodeCapability {
        NodeCapability {
            tree: Arc::clone(self),
            node,
        }
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A tree node invoked through the capability surface.
pub struct NodeCapability {
    tree: Arc<ComponentTree>,
    node: NodeId,
}

impl NodeCapability {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Capability for NodeCapability {
    type Output = String;

    fn invoke(&self) -> Invocation<String> {
        Ok(Outcome::Delivered(self.tree.operate(self.node)?))
    }
}

fn lookup(nodes: &Arena, id: NodeId) -> KitResult<&Node> {
    nodes
        .get(&id)
        .ok_or_else(|| KitError::not_found("node", format!("{id:?}")))
}

/// Whether `target` is `from` or one of its descendants.
fn reaches(nodes: &Arena, from: NodeId, target: NodeId) -> bool {
    let mut stack = vec![from];
    let mut seen = HashSet::new();
    while let Some(id) = stack.pop() {
        if id == target {
            return true;
        }
        if !seen.insert(id) {
            continue;
        }
        if let Some(Node {
            kind: NodeKind::Composite(children),
            ..
        }) = nodes.get(&id)
        {
            stack.extend(children.iter().copied());
        }
    }
    false
}

fn fold_node<R, L, C>(nodes: &Arena, id: NodeId, leaf: &L, composite: &C) -> KitResult<R>
where
    L: Fn(&str) -> R,
    C: Fn(&str, Vec<R>) -> R,
{
    let node = lookup(nodes, id)?;
    match &node.kind {
        NodeKind::Leaf => Ok(leaf(&node.label)),
        NodeKind::Composite(children) => {
            let results = children
                .iter()
                .map(|child| fold_node(nodes, *child, leaf, composite))
                .collect::<KitResult<Vec<_>>>()?;
            Ok(composite(&node.label, results))
        }
    }
}
