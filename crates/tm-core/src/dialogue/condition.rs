//! Guard conditions gating choice visibility.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;
use crate::state::WorldState;

/// A guard evaluated against the world state.
///
/// Decoded once from a string token at load time:
///
/// | token          | condition              |
/// |----------------|------------------------|
/// | `has_<item>`   | `HasItem`              |
/// | `!has_<item>`  | `NotHasItem`           |
/// | `has<Item>`    | `HasItem` (lower-cased)|
/// | `flag_<flag>`  | `HasFlag`              |
/// | `!flag_<flag>` | `NotHasFlag`           |
/// | `acid_<flag>`  | `FlagWithTheme`        |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Condition {
    /// The player carries the item.
    HasItem(String),
    /// The player does not carry the item.
    NotHasItem(String),
    /// The quest flag is set.
    HasFlag(String),
    /// The quest flag is not set.
    NotHasFlag(String),
    /// The quest flag is set and the alternate theme is active.
    FlagWithTheme(String),
}

impl Condition {
    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, world: &WorldState) -> bool {
        match self {
            Condition::HasItem(item) => world.has_item(item),
            Condition::NotHasItem(item) => !world.has_item(item),
            Condition::HasFlag(flag) => world.has_flag(flag),
            Condition::NotHasFlag(flag) => !world.has_flag(flag),
            Condition::FlagWithTheme(flag) => world.has_flag(flag) && world.theme_active,
        }
    }

    /// Human-readable requirement, shown when a guard fails at confirmation.
    pub fn requirement(&self) -> String {
        match self {
            Condition::HasItem(item) => format!("you need: {item}"),
            Condition::NotHasItem(item) => format!("you must not carry: {item}"),
            Condition::HasFlag(flag) => format!("not yet: {flag}"),
            Condition::NotHasFlag(flag) => format!("already done: {flag}"),
            Condition::FlagWithTheme(flag) => format!("needs {flag} and the acid theme"),
        }
    }
}

fn token_arg(token: &str, rest: &str) -> Result<String, CoreError> {
    let arg = rest.trim().to_lowercase();
    if arg.is_empty() {
        return Err(CoreError::InvalidArgument {
            token: token.to_string(),
            reason: "missing name".to_string(),
        });
    }
    Ok(arg)
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let s = token.trim();
        if let Some(rest) = s.strip_prefix("!has_") {
            Ok(Condition::NotHasItem(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("!flag_") {
            Ok(Condition::NotHasFlag(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("has_") {
            Ok(Condition::HasItem(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("flag_") {
            Ok(Condition::HasFlag(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("acid_") {
            Ok(Condition::FlagWithTheme(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("!has") {
            Ok(Condition::NotHasItem(token_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("has") {
            Ok(Condition::HasItem(token_arg(token, rest)?))
        } else {
            Err(CoreError::UnknownCondition(token.to_string()))
        }
    }
}

impl TryFrom<String> for Condition {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::HasItem(item) => write!(f, "has_{item}"),
            Condition::NotHasItem(item) => write!(f, "!has_{item}"),
            Condition::HasFlag(flag) => write!(f, "flag_{flag}"),
            Condition::NotHasFlag(flag) => write!(f, "!flag_{flag}"),
            Condition::FlagWithTheme(flag) => write!(f, "acid_{flag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tokens() {
        assert_eq!(
            "has_key".parse::<Condition>().unwrap(),
            Condition::HasItem("key".to_string())
        );
        assert_eq!(
            "!has_key".parse::<Condition>().unwrap(),
            Condition::NotHasItem("key".to_string())
        );
        assert_eq!(
            "flag_met_dj".parse::<Condition>().unwrap(),
            Condition::HasFlag("met_dj".to_string())
        );
        assert_eq!(
            "!flag_met_dj".parse::<Condition>().unwrap(),
            Condition::NotHasFlag("met_dj".to_string())
        );
        assert_eq!(
            "acid_vision".parse::<Condition>().unwrap(),
            Condition::FlagWithTheme("vision".to_string())
        );
    }

    #[test]
    fn parse_legacy_camel_case() {
        assert_eq!(
            "hasKey".parse::<Condition>().unwrap(),
            Condition::HasItem("key".to_string())
        );
        assert_eq!(
            "!hasWristband".parse::<Condition>().unwrap(),
            Condition::NotHasItem("wristband".to_string())
        );
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert!(matches!(
            "owns_key".parse::<Condition>(),
            Err(CoreError::UnknownCondition(_))
        ));
        assert!(matches!(
            "has_".parse::<Condition>(),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for token in ["has_key", "!has_key", "flag_a", "!flag_a", "acid_a"] {
            let cond: Condition = token.parse().unwrap();
            assert_eq!(cond.to_string(), token);
        }
    }

    #[test]
    fn evaluate_items() {
        let mut world = WorldState::new();
        let has = Condition::HasItem("key".to_string());
        let lacks = Condition::NotHasItem("key".to_string());
        assert!(!has.evaluate(&world));
        assert!(lacks.evaluate(&world));

        world.give_item("key");
        assert!(has.evaluate(&world));
        assert!(!lacks.evaluate(&world));
    }

    #[test]
    fn evaluate_flags() {
        let mut world = WorldState::new();
        let has = Condition::HasFlag("met".to_string());
        let lacks = Condition::NotHasFlag("met".to_string());
        assert!(!has.evaluate(&world));
        assert!(lacks.evaluate(&world));

        world.set_flag("met");
        assert!(has.evaluate(&world));
        assert!(!lacks.evaluate(&world));
    }

    #[test]
    fn evaluate_flag_with_theme() {
        let mut world = WorldState::new();
        let cond = Condition::FlagWithTheme("vision".to_string());
        world.set_flag("vision");
        assert!(!cond.evaluate(&world));
        world.theme_active = true;
        assert!(cond.evaluate(&world));
    }

    #[test]
    fn deserialize_from_json_string() {
        let cond: Condition = serde_json::from_str("\"has_key\"").unwrap();
        assert_eq!(cond, Condition::HasItem("key".to_string()));
        assert!(serde_json::from_str::<Condition>("\"nonsense\"").is_err());
    }
}
