//! Expanding an isolating node to its groupmates.

use tti_core::NodeId;

use crate::{Compliance, IsolationGroups};

/// Why a node is being isolated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsolationCause {
    /// Self-isolation on symptoms, without a test.
    Symptomatic,
    /// Isolation after a positive test.
    Positive,
    /// Self-isolation after being named as a contact of a positive case.
    Contact,
}

impl IsolationCause {
    /// Symptomatic self-isolation only reaches groupmates when the
    /// symptomatic node itself complies.  The other causes propagate to
    /// groupmates regardless.
    #[inline]
    pub fn groupmates_require_individual(self) -> bool {
        matches!(self, Self::Symptomatic)
    }
}

/// Nodes to isolate for one triggering node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    /// The triggering node itself, if it isolates.
    pub individual: Option<NodeId>,
    /// Complying groupmates.
    pub groupmates: Vec<NodeId>,
}

impl Expansion {
    pub fn is_empty(&self) -> bool {
        self.individual.is_none() && self.groupmates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.individual.is_some() as usize + self.groupmates.len()
    }

    /// Append every node of the expansion to `out`, triggering node first.
    pub fn drain_into(self, out: &mut Vec<NodeId>) {
        out.extend(self.individual);
        out.extend(self.groupmates);
    }
}

/// Applies one cause's individual and groupmate compliance to a node.
#[derive(Clone, Copy, Debug)]
pub struct IsolationPropagator<'a> {
    cause:      IsolationCause,
    individual: &'a Compliance,
    groupmate:  &'a Compliance,
    groups:     Option<&'a IsolationGroups>,
}

impl<'a> IsolationPropagator<'a> {
    pub fn new(
        cause:      IsolationCause,
        individual: &'a Compliance,
        groupmate:  &'a Compliance,
        groups:     Option<&'a IsolationGroups>,
    ) -> Self {
        Self { cause, individual, groupmate, groups }
    }

    pub fn cause(&self) -> IsolationCause {
        self.cause
    }

    /// Whether this cause can isolate anyone at all.
    pub fn is_active(&self) -> bool {
        self.individual.is_enabled() || (self.groups.is_some() && self.groupmate.is_enabled())
    }

    /// Expand `node`.
    ///
    /// `eligible` is the cause-specific recheck on the node itself (e.g. a
    /// symptomatic candidate must still be symptomatic).  It gates only the
    /// node's own entry, never its groupmates.
    pub fn expand(&self, node: NodeId, eligible: bool) -> Expansion {
        let complies = self.individual.complies(node);
        let individual = (complies && eligible).then_some(node);

        let reach_groupmates = !self.cause.groupmates_require_individual() || complies;
        let groupmates = match self.groups {
            Some(groups) if reach_groupmates && self.groupmate.is_enabled() => groups
                .groupmates(node)
                .filter(|&m| self.groupmate.complies(m))
                .collect(),
            _ => Vec::new(),
        };

        Expansion { individual, groupmates }
    }
}
