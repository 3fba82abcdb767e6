//! Node health states as exposed by the external epidemic model.

use std::fmt;

/// Compartment a node currently occupies.
///
/// The `Q*` variants are the quarantined counterparts of the free-living
/// compartments.  The model owns the transitions; the intervention loop only
/// reads the state and classifies it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    S,
    E,
    IPre,
    ISym,
    IAsym,
    H,
    R,
    F,
    QS,
    QE,
    QPre,
    QSym,
    QAsym,
    QR,
}

impl HealthState {
    pub const ALL: [HealthState; 14] = [
        HealthState::S,
        HealthState::E,
        HealthState::IPre,
        HealthState::ISym,
        HealthState::IAsym,
        HealthState::H,
        HealthState::R,
        HealthState::F,
        HealthState::QS,
        HealthState::QE,
        HealthState::QPre,
        HealthState::QSym,
        HealthState::QAsym,
        HealthState::QR,
    ];

    /// Tests on these states are negative without consulting the
    /// false-negative model: susceptible, or latent and not yet detectable.
    #[inline]
    pub fn is_test_negative(self) -> bool {
        matches!(self, Self::S | Self::QS | Self::E | Self::QE)
    }

    /// Infectious states a test can pick up, subject to false negatives.
    #[inline]
    pub fn is_detectable(self) -> bool {
        matches!(
            self,
            Self::IPre | Self::ISym | Self::IAsym | Self::QPre | Self::QSym | Self::QAsym
        )
    }

    /// Recovered, hospitalised or deceased nodes are never selected for
    /// traced or random tests.
    #[inline]
    pub fn is_screening_excluded(self) -> bool {
        matches!(self, Self::R | Self::QR | Self::H | Self::F)
    }

    /// Symptomatic, whether free-living or quarantined.
    #[inline]
    pub fn is_symptomatic(self) -> bool {
        matches!(self, Self::ISym | Self::QSym)
    }

    #[inline]
    pub fn is_quarantined(self) -> bool {
        matches!(
            self,
            Self::QS | Self::QE | Self::QPre | Self::QSym | Self::QAsym | Self::QR
        )
    }

    /// The quarantined counterpart of a free-living state.  `H`, `F` and
    /// states that are already quarantined map to themselves.
    pub fn quarantined(self) -> HealthState {
        match self {
            Self::S => Self::QS,
            Self::E => Self::QE,
            Self::IPre => Self::QPre,
            Self::ISym => Self::QSym,
            Self::IAsym => Self::QAsym,
            Self::R => Self::QR,
            other => other,
        }
    }

    /// Counted in the model's cumulative infected total.
    #[inline]
    pub fn is_infected(self) -> bool {
        !matches!(self, Self::S | Self::QS)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::S => "S",
            Self::E => "E",
            Self::IPre => "I_pre",
            Self::ISym => "I_sym",
            Self::IAsym => "I_asym",
            Self::H => "H",
            Self::R => "R",
            Self::F => "F",
            Self::QS => "Q_S",
            Self::QE => "Q_E",
            Self::QPre => "Q_pre",
            Self::QSym => "Q_sym",
            Self::QAsym => "Q_asym",
            Self::QR => "Q_R",
        };
        f.write_str(s)
    }
}
