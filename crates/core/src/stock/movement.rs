//! Stock movement type classification.

use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Adds to the on-hand balance.
    Inbound,
    /// Subtracts from the on-hand balance.
    Outbound,
}

/// The signed classification of a stock change.
///
/// Being a closed enum, an unknown movement type cannot be represented and
/// never reaches balance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Goods received from a purchase.
    In,
    /// Goods leaving stock (sale, consumption).
    Out,
    /// Stock count correction upward.
    AdjustmentIn,
    /// Stock count correction downward.
    AdjustmentOut,
    /// Goods returned into stock (e.g. from a project).
    ReturnIn,
    /// Goods returned out of stock (e.g. back to a supplier).
    ReturnOut,
    /// Goods issued to a project site.
    ProjectIssue,
    /// Unused goods coming back from a project site.
    ProjectReturn,
}

impl MovementType {
    /// Returns the direction this movement applies to the balance.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::In | Self::AdjustmentIn | Self::ReturnIn | Self::ProjectReturn => {
                Direction::Inbound
            }
            Self::Out | Self::AdjustmentOut | Self::ReturnOut | Self::ProjectIssue => {
                Direction::Outbound
            }
        }
    }

    /// Returns true if this movement may leave the balance negative.
    ///
    /// Only inbound receipts and upward count corrections are exempt from
    /// the non-negative balance rule.
    #[must_use]
    pub const fn allows_negative_balance(self) -> bool {
        matches!(self, Self::In | Self::AdjustmentIn)
    }

    /// Returns true if this movement should refresh the material's
    /// last-purchase price tracking (when a unit price is present).
    #[must_use]
    pub const fn tracks_purchase_price(self) -> bool {
        matches!(self, Self::In | Self::ReturnIn)
    }

    /// The storage string for this movement type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::AdjustmentIn => "ADJUSTMENT_IN",
            Self::AdjustmentOut => "ADJUSTMENT_OUT",
            Self::ReturnIn => "RETURN_IN",
            Self::ReturnOut => "RETURN_OUT",
            Self::ProjectIssue => "PROJECT_ISSUE",
            Self::ProjectReturn => "PROJECT_RETURN",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "ADJUSTMENT_IN" => Ok(Self::AdjustmentIn),
            "ADJUSTMENT_OUT" => Ok(Self::AdjustmentOut),
            "RETURN_IN" => Ok(Self::ReturnIn),
            "RETURN_OUT" => Ok(Self::ReturnOut),
            "PROJECT_ISSUE" => Ok(Self::ProjectIssue),
            "PROJECT_RETURN" => Ok(Self::ProjectReturn),
            _ => Err(format!("Unknown movement type: {s}")),
        }
    }
}
