//! Error taxonomy shared by every engine operation.

use thiserror::Error;

/// Which catalog an unknown id was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    Building,
    Upgrade,
    InnovationUpgrade,
}

impl IdKind {
    pub fn name(&self) -> &'static str {
        match self {
            IdKind::Building => "building",
            IdKind::Upgrade => "upgrade",
            IdKind::InnovationUpgrade => "innovation upgrade",
        }
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an upgrade (or a prestige) cannot be taken right now.
#[derive(Clone, Debug, PartialEq)]
pub enum IneligibleReason {
    AlreadyOwned,
    NeedsClicks { required: u64, current: u64 },
    NeedsLifetimeData { required: f64, current: f64 },
    NeedsBuilding { building: &'static str, required: u64, current: u64 },
    NothingToPrestige,
}

impl std::fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IneligibleReason::AlreadyOwned => write!(f, "already owned"),
            IneligibleReason::NeedsClicks { required, current } => {
                write!(f, "needs {required} clicks (have {current})")
            }
            IneligibleReason::NeedsLifetimeData { required, current } => {
                write!(f, "needs {required} lifetime data (have {current:.0})")
            }
            IneligibleReason::NeedsBuilding {
                building,
                required,
                current,
            } => write!(f, "needs {required} {building} (have {current})"),
            IneligibleReason::NothingToPrestige => write!(f, "no innovation points to gain"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("insufficient funds: need {needed:.0}, have {available:.0}")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("{id} is not eligible: {reason}")]
    Ineligible { id: String, reason: IneligibleReason },
    #[error("corrupt save: {0}")]
    CorruptSave(String),
    #[error("unknown {kind} id `{id}`")]
    UnknownId { kind: IdKind, id: String },
    #[error("buy amount must be 1, 10, 100 or -1 (got {0})")]
    InvalidBuyAmount(i64),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl EngineError {
    /// Errors the player can recover from by waiting or earning more.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::InsufficientFunds { .. } | EngineError::Ineligible { .. }
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        EngineError::CorruptSave(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let err = EngineError::UnknownId {
            kind: IdKind::Building,
            id: "rocket".into(),
        };
        assert_eq!(err.to_string(), "unknown building id `rocket`");

        let err = EngineError::Ineligible {
            id: "click_1".into(),
            reason: IneligibleReason::NeedsClicks {
                required: 100,
                current: 3,
            },
        };
        assert_eq!(err.to_string(), "click_1 is not eligible: needs 100 clicks (have 3)");
    }

    #[test]
    fn only_gameplay_refusals_are_recoverable() {
        assert!(EngineError::InsufficientFunds {
            needed: 10.0,
            available: 1.0
        }
        .is_recoverable());
        assert!(!EngineError::CorruptSave("bad".into()).is_recoverable());
    }

    #[test]
    fn json_errors_become_corrupt_save() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::CorruptSave(_)));
    }
}
