#![forbid(unsafe_code)]

//! Update-direction policy for bindings.

use std::fmt;
use std::str::FromStr;

/// Direction of a single value transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Model value is written into the target.
    ModelToTarget,
    /// Target value is written into the model.
    TargetToModel,
}

impl Direction {
    /// Stable identifier used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelToTarget => "model-to-target",
            Self::TargetToModel => "target-to-model",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronization policy between a model and its target.
///
/// The strategy decides two things independently:
///
/// 1. Whether the binding wires an automatic target→model listener
///    ([`listens_to_target`](Self::listens_to_target)).
/// 2. Which bulk sweeps on the context include the binding
///    ([`allows`](Self::allows)). `ModelToTarget` bindings never take part
///    in model updates; `TargetToModel` bindings never take part in target
///    updates, including the initial push at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum UpdateValueStrategy {
    /// One way, from model to target.
    ModelToTarget,
    /// One way, from target to model.
    TargetToModel,
    /// Both directions.
    #[default]
    Both,
}

impl UpdateValueStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 3] = [Self::ModelToTarget, Self::TargetToModel, Self::Both];

    /// Whether transfers in `direction` are permitted.
    #[must_use]
    pub const fn allows(self, direction: Direction) -> bool {
        match (self, direction) {
            (Self::Both, _) => true,
            (Self::ModelToTarget, Direction::ModelToTarget) => true,
            (Self::TargetToModel, Direction::TargetToModel) => true,
            _ => false,
        }
    }

    /// Whether a binding should register on the target's change signal.
    #[must_use]
    pub const fn listens_to_target(self) -> bool {
        self.allows(Direction::TargetToModel)
    }

    /// Stable identifier, also accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelToTarget => "model-to-target",
            Self::TargetToModel => "target-to-model",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for UpdateValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown update strategy '{input}' (expected model-to-target, target-to-model or both)")]
pub struct StrategyParseError {
    input: String,
}

impl StrategyParseError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for UpdateValueStrategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "model-to-target" | "model2target" => Ok(Self::ModelToTarget),
            "target-to-model" | "target2model" => Ok(Self::TargetToModel),
            "both" => Ok(Self::Both),
            _ => Err(StrategyParseError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_both() {
        assert_eq!(UpdateValueStrategy::default(), UpdateValueStrategy::Both);
    }

    #[test]
    fn listener_wiring_per_strategy() {
        assert!(UpdateValueStrategy::Both.listens_to_target());
        assert!(UpdateValueStrategy::TargetToModel.listens_to_target());
        assert!(!UpdateValueStrategy::ModelToTarget.listens_to_target());
    }

    #[test]
    fn sweep_inclusion_per_strategy() {
        use Direction::*;
        use UpdateValueStrategy as S;

        assert!(S::Both.allows(ModelToTarget));
        assert!(S::Both.allows(TargetToModel));
        assert!(S::ModelToTarget.allows(ModelToTarget));
        assert!(!S::ModelToTarget.allows(TargetToModel));
        assert!(!S::TargetToModel.allows(ModelToTarget));
        assert!(S::TargetToModel.allows(TargetToModel));
    }

    #[test]
    fn parse_round_trips_display() {
        for strategy in UpdateValueStrategy::ALL {
            let parsed: UpdateValueStrategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn parse_accepts_legacy_spellings() {
        assert_eq!(
            "model2Target".parse::<UpdateValueStrategy>(),
            Ok(UpdateValueStrategy::ModelToTarget)
        );
        assert_eq!(
            " TARGET_TO_MODEL ".parse::<UpdateValueStrategy>(),
            Ok(UpdateValueStrategy::TargetToModel)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "sideways".parse::<UpdateValueStrategy>().unwrap_err();
        assert_eq!(err.input(), "sideways");
        assert!(err.to_string().contains("sideways"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&UpdateValueStrategy::ModelToTarget).unwrap();
        assert_eq!(json, "\"model-to-target\"");
        let back: UpdateValueStrategy = serde_json::from_str("\"both\"").unwrap();
        assert_eq!(back, UpdateValueStrategy::Both);
    }
}
