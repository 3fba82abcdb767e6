//! Per-node compliance flags.

use tti_core::{NodeId, TtiError, TtiResult};

/// Whether a category of intervention applies, and to whom.
///
/// `Disabled` turns the whole category off without per-node work.  An
/// `Enabled` vector is indexed by [`NodeId`]; an all-false vector is
/// normalised to `Disabled` on construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Compliance {
    #[default]
    Disabled,
    Enabled(Vec<bool>),
}

impl Compliance {
    /// Build from per-node flags for a population of `node_count` nodes.
    ///
    /// The length is checked before an all-false vector is normalised, so a
    /// misaligned vector is rejected even when nobody complies.
    pub fn from_flags(what: &'static str, flags: Vec<bool>, node_count: usize) -> TtiResult<Self> {
        if flags.len() != node_count {
            return Err(TtiError::ComplianceLength { what, expected: node_count, got: flags.len() });
        }
        Ok(Self::normalised(flags))
    }

    fn normalised(flags: Vec<bool>) -> Self {
        if flags.iter().any(|&f| f) {
            Self::Enabled(flags)
        } else {
            Self::Disabled
        }
    }

    /// Every one of `node_count` nodes complies.
    pub fn all(node_count: usize) -> Self {
        Self::normalised(vec![true; node_count])
    }

    /// Exactly the listed nodes comply.
    pub fn only(node_count: usize, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut flags = vec![false; node_count];
        for node in nodes {
            if let Some(flag) = flags.get_mut(node.index()) {
                *flag = true;
            }
        }
        Self::normalised(flags)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Does `node` comply?  Always `false` when disabled or out of range.
    #[inline]
    pub fn complies(&self, node: NodeId) -> bool {
        match self {
            Self::Disabled => false,
            Self::Enabled(flags) => flags.get(node.index()).copied().unwrap_or(false),
        }
    }

    /// Check an enabled vector covers exactly `node_count` nodes.
    pub fn validate(&self, what: &'static str, node_count: usize) -> TtiResult<()> {
        match self {
            Self::Enabled(flags) if flags.len() != node_count => Err(TtiError::ComplianceLength {
                what,
                expected: node_count,
                got: flags.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Compliance vectors for every intervention category.
///
/// Every category defaults to [`Compliance::Disabled`].
#[derive(Clone, Debug, Default)]
pub struct ComplianceSet {
    /// Seeks a test when symptomatic.
    pub testing_symptomatic:  Compliance,
    /// Accepts a test when traced.
    pub testing_traced:       Compliance,
    /// Accepts a random surveillance test.
    pub testing_random:       Compliance,
    /// Names contacts after a positive test.
    pub tracing:              Compliance,

    pub isolation_symptomatic_individual:  Compliance,
    pub isolation_symptomatic_groupmate:   Compliance,
    pub isolation_positive_individual:     Compliance,
    pub isolation_positive_groupmate:      Compliance,
    pub isolation_contact_individual:      Compliance,
    pub isolation_contact_groupmate:       Compliance,
}

impl ComplianceSet {
    /// Check every enabled category against `node_count`.
    pub fn validate(&self, node_count: usize) -> TtiResult<()> {
        for (what, c) in self.categories() {
            c.validate(what, node_count)?;
        }
        Ok(())
    }

    fn categories(&self) -> [(&'static str, &Compliance); 10] {
        [
            ("testing_symptomatic",              &self.testing_symptomatic),
            ("testing_traced",                   &self.testing_traced),
            ("testing_random",                   &self.testing_random),
            ("tracing",                          &self.tracing),
            ("isolation_symptomatic_individual", &self.isolation_symptomatic_individual),
            ("isolation_symptomatic_groupmate",  &self.isolation_symptomatic_groupmate),
            ("isolation_positive_individual",    &self.isolation_positive_individual),
            ("isolation_positive_groupmate",     &self.isolation_positive_groupmate),
            ("isolation_contact_individual",     &self.isolation_contact_individual),
            ("isolation_contact_groupmate",      &self.isolation_contact_groupmate),
        ]
    }
}
