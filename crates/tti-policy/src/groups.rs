//! Isolation groups (households, bubbles, …) with O(1) membership lookup.

use tti_core::{GroupId, NodeId, TtiError, TtiResult};

/// A partition of (some of) the nodes into disjoint groups.
///
/// Groups are stored as an arena; `group_of` maps each node to its group so
/// finding a node's groupmates costs O(1) + O(group size).
#[derive(Clone, Debug)]
pub struct IsolationGroups {
    members:  Vec<Vec<NodeId>>,
    group_of: Vec<GroupId>,
}

impl IsolationGroups {
    /// Index `groups` for a population of `node_count` nodes.
    ///
    /// Fails if a group names a node outside the population or a node
    /// appears in more than one group.  Nodes absent from every group are
    /// allowed.
    pub fn new(groups: Vec<Vec<NodeId>>, node_count: usize) -> TtiResult<Self> {
        let mut group_of = vec![GroupId::INVALID; node_count];
        for (g, members) in groups.iter().enumerate() {
            for &node in members {
                let Some(slot) = group_of.get_mut(node.index()) else {
                    return Err(TtiError::GroupNodeOutOfRange { group: g, node, node_count });
                };
                if *slot != GroupId::INVALID && slot.index() != g {
                    return Err(TtiError::NodeInMultipleGroups {
                        node,
                        first:  slot.index(),
                        second: g,
                    });
                }
                *slot = GroupId(g as u32);
            }
        }
        Ok(Self { members: groups, group_of })
    }

    pub fn group_count(&self) -> usize {
        self.members.len()
    }

    pub fn group_of(&self, node: NodeId) -> Option<GroupId> {
        self.group_of
            .get(node.index())
            .copied()
            .filter(|&g| g != GroupId::INVALID)
    }

    /// All members of `node`'s group, including `node`.  Empty when the node
    /// has no group.
    pub fn group_members(&self, node: NodeId) -> &[NodeId] {
        self.group_of(node)
            .and_then(|g| self.members.get(g.index()))
            .map_or(&[], Vec::as_slice)
    }

    /// Members of `node`'s group other than `node` itself.
    pub fn groupmates(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.group_members(node).iter().copied().filter(move |&m| m != node)
    }
}
