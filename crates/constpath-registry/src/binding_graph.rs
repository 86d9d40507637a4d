//! Binding graph - entity arena plus an index of namespace-valued bindings.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `NamespaceEntity` (node index == `EntityId`, nodes are never removed)
//! - Edges: `ConstBinding` from the table owner to the bound entity
//!
//! Only live bindings whose value is a namespace entity have an edge. Plain
//! objects bound in constant tables never appear here.

use std::collections::VecDeque;

use constpath_core::{EntityId, ModuleName};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashSet;

use crate::entity::NamespaceEntity;

/// Edge weight: one constant binding `owner::name = child`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstBinding {
    /// Short constant name in the owner's table.
    pub name: String,
    /// Binding order across the whole graph. Smaller was bound earlier.
    pub seq: u64,
}

/// Entity arena and reverse binding index.
pub struct BindingGraph {
    graph: DiGraph<NamespaceEntity, ConstBinding>,
    root: EntityId,
    next_seq: u64,
}

#[inline]
fn node(id: EntityId) -> NodeIndex {
    NodeIndex::new(id.index() as usize)
}

#[inline]
fn entity_id(node: NodeIndex) -> EntityId {
    EntityId::new(node.index() as u32)
}

impl BindingGraph {
    /// Create a graph holding only the root, permanently named `root_name`.
    pub fn new(root_name: ModuleName) -> Self {
        let mut graph = DiGraph::new();
        let root = EntityId::new(0);
        graph.add_node(NamespaceEntity::root(root, root_name));
        Self {
            graph,
            root,
            next_seq: 0,
        }
    }

    /// The global root entity.
    #[inline]
    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Number of entities, root included.
    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live namespace-valued bindings.
    pub fn binding_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add an entity built from its freshly assigned id.
    pub fn add_entity(&mut self, build: impl FnOnce(EntityId) -> NamespaceEntity) -> EntityId {
        let id = entity_id(NodeIndex::new(self.graph.node_count()));
        let added = self.graph.add_node(build(id));
        debug_assert_eq!(entity_id(added), id);
        id
    }

    /// Check if `id` belongs to this graph.
    pub fn contains(&self, id: EntityId) -> bool {
        (id.index() as usize) < self.graph.node_count()
    }

    pub fn entity(&self, id: EntityId) -> Option<&NamespaceEntity> {
        self.graph.node_weight(node(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut NamespaceEntity> {
        self.graph.node_weight_mut(node(id))
    }

    /// Record `owner::name = child`, replacing any binding of `name` in `owner`.
    pub fn link(&mut self, owner: EntityId, name: &str, child: EntityId) {
        self.unlink(owner, name);
        if !self.contains(owner) || !self.contains(child) {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(
            node(owner),
            node(child),
            ConstBinding {
                name: name.to_string(),
                seq,
            },
        );
    }

    /// Forget the binding of `name` in `owner`. Returns the entity it held.
    pub fn unlink(&mut self, owner: EntityId, name: &str) -> Option<EntityId> {
        let edge = self.find_binding(owner, name)?;
        let (_, child) = self.graph.edge_endpoints(edge)?;
        self.graph.remove_edge(edge);
        Some(entity_id(child))
    }

    /// Find the edge for `owner::name`.
    pub fn find_binding(&self, owner: EntityId, name: &str) -> Option<EdgeIndex> {
        if !self.contains(owner) {
            return None;
        }
        self.graph
            .edges(node(owner))
            .find(|edge| edge.weight().name == name)
            .map(|edge| edge.id())
    }

    /// Every live binding of `id` as `(owner, short name)`, oldest first.
    pub fn bindings_of(&self, id: EntityId) -> Vec<(EntityId, &str)> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut incoming: Vec<_> = self
            .graph
            .edges_directed(node(id), Direction::Incoming)
            .map(|edge| {
                let binding = edge.weight();
                (binding.seq, entity_id(edge.source()), binding.name.as_str())
            })
            .collect();
        incoming.sort_unstable_by_key(|(seq, _, _)| *seq);
        incoming
            .into_iter()
            .map(|(_, owner, name)| (owner, name))
            .collect()
    }

    /// Pick the binding of `start` that lies on a shortest path to a
    /// permanently named entity.
    ///
    /// Breadth-first over incoming bindings. Within one distance the binding
    /// made earliest wins, nearest `start` first. Singleton classes never get
    /// a name, so paths through them are skipped. Returns `(owner, short name)`
    /// of the first hop, or `None` when no permanently named entity reaches
    /// `start`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn shortest_rooted_binding(&self, start: EntityId) -> Option<(EntityId, String)> {
        let first_hops = self.bindings_of(start);
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut queue = VecDeque::new();

        for (hop, &(owner, _)) in first_hops.iter().enumerate() {
            if self.is_singleton(owner) || !visited.insert(owner) {
                continue;
            }
            if self.is_anchor(owner) {
                return Some((owner, first_hops[hop].1.to_string()));
            }
            queue.push_back((owner, hop));
        }

        while let Some((current, hop)) = queue.pop_front() {
            for (owner, _) in self.bindings_of(current) {
                if self.is_singleton(owner) || !visited.insert(owner) {
                    continue;
                }
                if self.is_anchor(owner) {
                    let (first_owner, name) = first_hops[hop];
                    return Some((first_owner, name.to_string()));
                }
                queue.push_back((owner, hop));
            }
        }

        None
    }

    fn is_anchor(&self, id: EntityId) -> bool {
        self.entity(id)
            .is_some_and(|entity| entity.state().is_permanent())
    }

    fn is_singleton(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(NamespaceEntity::is_singleton)
    }
}
