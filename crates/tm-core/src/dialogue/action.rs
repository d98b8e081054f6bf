//! Action tokens attached to dialogue choices.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;

/// A closed-vocabulary effect applied when a choice is confirmed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ActionSpec")]
pub enum Action {
    /// End the encounter.
    Close,
    /// Declare victory and end the encounter.
    WinGame,
    /// Add an item to the inventory.
    GiveItem(String),
    /// Remove an item from the inventory.
    RemoveItem(String),
    /// Set a quest flag.
    SetFlag(String),
    /// Switch on the alternate visual theme.
    ActivateTheme,
    /// Multiply the player's speed multiplier.
    ApplySpeedBoost(f32),
    /// Move the player to a position.
    Teleport {
        /// Target x.
        x: f32,
        /// Target y.
        y: f32,
    },
    /// Continue the conversation at another node.
    SwitchNode {
        /// Target location; `None` means the current one.
        location: Option<String>,
        /// Target node key.
        node: String,
    },
    /// Several steps applied in order.
    Sequence(Vec<Action>),
}

impl Action {
    /// Whether applying this action ends the encounter.
    ///
    /// Only node switches keep a conversation open. Inventory removals are
    /// neutral, so a trade step followed by a switch continues the dialogue.
    pub fn ends_session(&self) -> bool {
        let mut switches = false;
        for step in self.steps() {
            match step {
                Action::SwitchNode { .. } => switches = true,
                Action::RemoveItem(_) => {}
                _ => return true,
            }
        }
        !switches
    }

    /// Iterate over the individual steps of this action.
    pub fn steps(&self) -> Box<dyn Iterator<Item = &Action> + '_> {
        match self {
            Action::Sequence(steps) => Box::new(steps.iter().flat_map(Action::steps)),
            other => Box::new(std::iter::once(other)),
        }
    }
}

fn name_arg(token: &str, rest: &str) -> Result<String, CoreError> {
    let arg = rest.trim().to_lowercase();
    if arg.is_empty() {
        return Err(invalid(token, "missing name"));
    }
    Ok(arg)
}

fn number_arg(token: &str, raw: &str) -> Result<f32, CoreError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(token, &format!("\"{raw}\" is not a number")))
}

fn invalid(token: &str, reason: &str) -> CoreError {
    CoreError::InvalidArgument {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let s = token.trim();
        match s {
            "close" => return Ok(Action::Close),
            "win_game" => return Ok(Action::WinGame),
            "activate_theme" | "acid" => return Ok(Action::ActivateTheme),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("give_") {
            Ok(Action::GiveItem(name_arg(token, rest)?))
        } else if let Some(rest) = s
            .strip_prefix("take_")
            .or_else(|| s.strip_prefix("remove_"))
        {
            Ok(Action::RemoveItem(name_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("flag_") {
            Ok(Action::SetFlag(name_arg(token, rest)?))
        } else if let Some(rest) = s.strip_prefix("speed_boost_") {
            let multiplier = number_arg(token, rest)?;
            if multiplier <= 0.0 {
                return Err(invalid(token, "multiplier must be positive"));
            }
            Ok(Action::ApplySpeedBoost(multiplier))
        } else if let Some(rest) = s.strip_prefix("teleport_") {
            let (x, y) = rest
                .split_once('_')
                .ok_or_else(|| invalid(token, "expected teleport_<x>_<y>"))?;
            Ok(Action::Teleport {
                x: number_arg(token, x)?,
                y: number_arg(token, y)?,
            })
        } else if let Some(rest) = s.strip_prefix("goto_") {
            match rest.split_once(':') {
                Some((location, node)) if !location.is_empty() && !node.is_empty() => {
                    Ok(Action::SwitchNode {
                        location: Some(location.to_string()),
                        node: node.to_string(),
                    })
                }
                Some(_) => Err(invalid(token, "expected goto_<location>:<node>")),
                None if rest.is_empty() => Err(invalid(token, "missing node")),
                None => Ok(Action::SwitchNode {
                    location: None,
                    node: rest.to_string(),
                }),
            }
        } else if let Some(rest) = s.strip_prefix("trade_") {
            let (given, received) = rest
                .split_once("_for_")
                .ok_or_else(|| invalid(token, "expected trade_<item>_for_<item>"))?;
            Ok(Action::Sequence(vec![
                Action::RemoveItem(name_arg(token, given)?),
                Action::GiveItem(name_arg(token, received)?),
            ]))
        } else {
            Err(CoreError::UnknownAction(token.to_string()))
        }
    }
}

/// Raw JSON shape of an action: a single token or a list of tokens.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionSpec {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<ActionSpec> for Action {
    type Error = CoreError;

    fn try_from(spec: ActionSpec) -> Result<Self, Self::Error> {
        match spec {
            ActionSpec::One(token) => token.parse(),
            ActionSpec::Many(tokens) => {
                let mut steps = tokens
                    .iter()
                    .map(|t| t.parse::<Action>())
                    .collect::<Result<Vec<_>, _>>()?;
                if steps.len() == 1 {
                    Ok(steps.remove(0))
                } else {
                    Ok(Action::Sequence(steps))
                }
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Close => write!(f, "close"),
            Action::WinGame => write!(f, "win_game"),
            Action::GiveItem(item) => write!(f, "give_{item}"),
            Action::RemoveItem(item) => write!(f, "take_{item}"),
            Action::SetFlag(flag) => write!(f, "flag_{flag}"),
            Action::ActivateTheme => write!(f, "activate_theme"),
            Action::ApplySpeedBoost(m) => write!(f, "speed_boost_{m}"),
            Action::Teleport { x, y } => write!(f, "teleport_{x}_{y}"),
            Action::SwitchNode {
                location: Some(location),
                node,
            } => write!(f, "goto_{location}:{node}"),
            Action::SwitchNode { location: None, node } => write!(f, "goto_{node}"),
            Action::Sequence(steps) => {
                let parts: Vec<String> = steps.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_tokens() {
        assert_eq!("close".parse::<Action>().unwrap(), Action::Close);
        assert_eq!("win_game".parse::<Action>().unwrap(), Action::WinGame);
        assert_eq!("acid".parse::<Action>().unwrap(), Action::ActivateTheme);
        assert_eq!(
            "give_Wristband".parse::<Action>().unwrap(),
            Action::GiveItem("wristband".to_string())
        );
        assert_eq!(
            "take_key".parse::<Action>().unwrap(),
            Action::RemoveItem("key".to_string())
        );
        assert_eq!(
            "flag_met_dj".parse::<Action>().unwrap(),
            Action::SetFlag("met_dj".to_string())
        );
    }

    #[test]
    fn parse_numeric_tokens() {
        assert_eq!(
            "speed_boost_1.5".parse::<Action>().unwrap(),
            Action::ApplySpeedBoost(1.5)
        );
        assert_eq!(
            "teleport_200_350.5".parse::<Action>().unwrap(),
            Action::Teleport { x: 200.0, y: 350.5 }
        );
        assert!(matches!(
            "speed_boost_fast".parse::<Action>(),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "speed_boost_-2".parse::<Action>(),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "teleport_200".parse::<Action>(),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn parse_goto() {
        assert_eq!(
            "goto_second".parse::<Action>().unwrap(),
            Action::SwitchNode {
                location: None,
                node: "second".to_string()
            }
        );
        assert_eq!(
            "goto_Nest:secret".parse::<Action>().unwrap(),
            Action::SwitchNode {
                location: Some("Nest".to_string()),
                node: "secret".to_string()
            }
        );
        assert!("goto_".parse::<Action>().is_err());
        assert!("goto_Nest:".parse::<Action>().is_err());
    }

    #[test]
    fn parse_trade() {
        assert_eq!(
            "trade_token_for_beer".parse::<Action>().unwrap(),
            Action::Sequence(vec![
                Action::RemoveItem("token".to_string()),
                Action::GiveItem("beer".to_string()),
            ])
        );
        assert!("trade_token".parse::<Action>().is_err());
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(
            "dance".parse::<Action>(),
            Err(CoreError::UnknownAction(_))
        ));
    }

    #[test]
    fn deserialize_one_or_many() {
        let one: Action = serde_json::from_str("\"give_key\"").unwrap();
        assert_eq!(one, Action::GiveItem("key".to_string()));

        let many: Action = serde_json::from_str("[\"take_key\", \"flag_opened\"]").unwrap();
        assert_eq!(
            many,
            Action::Sequence(vec![
                Action::RemoveItem("key".to_string()),
                Action::SetFlag("opened".to_string()),
            ])
        );

        let single_list: Action = serde_json::from_str("[\"close\"]").unwrap();
        assert_eq!(single_list, Action::Close);

        assert!(serde_json::from_str::<Action>("[\"close\", \"bogus\"]").is_err());
    }

    #[test]
    fn session_ending() {
        assert!(Action::Close.ends_session());
        assert!(Action::ApplySpeedBoost(2.0).ends_session());
        let switch = Action::SwitchNode {
            location: None,
            node: "b".to_string(),
        };
        assert!(!switch.ends_session());
        assert!(
            !Action::Sequence(vec![Action::RemoveItem("a".into()), switch.clone()]).ends_session()
        );
        assert!(Action::Sequence(vec![switch, Action::Close]).ends_session());
        assert!(Action::Sequence(vec![Action::RemoveItem("a".into())]).ends_session());
    }

    #[test]
    fn steps_flatten_sequences() {
        let action: Action = "trade_a_for_b".parse().unwrap();
        assert_eq!(action.steps().count(), 2);
        assert_eq!(Action::Close.steps().count(), 1);
    }
}
