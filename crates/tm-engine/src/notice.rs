//! Player-facing messages produced while a game runs.

use std::fmt;

use serde::Serialize;

/// Something the presentation layer should tell the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A confirmed choice's guard no longer held; the encounter closed.
    RequirementNotMet {
        /// What was missing, e.g. `you need: key`.
        requirement: String,
    },
    /// An item was added to the inventory.
    ItemReceived {
        /// The item.
        item: String,
    },
    /// A quest flag was set.
    FlagSet {
        /// The flag.
        flag: String,
    },
    /// The alternate theme switched on.
    ThemeActivated,
    /// The speed multiplier grew.
    SpeedBoosted {
        /// The multiplier after the boost.
        multiplier: f32,
    },
    /// The player was moved.
    Teleported {
        /// Landing x.
        x: f32,
        /// Landing y.
        y: f32,
    },
    /// The game was won.
    Victory,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RequirementNotMet { requirement } => {
                write!(f, "Requirement not met ({requirement})")
            }
            Notice::ItemReceived { item } => write!(f, "Received {item}"),
            Notice::FlagSet { flag } => write!(f, "Quest updated: {flag}"),
            Notice::ThemeActivated => write!(f, "Everything looks different now..."),
            Notice::SpeedBoosted { multiplier } => write!(f, "Speed x{multiplier:.1}"),
            Notice::Teleported { x, y } => write!(f, "Teleported to ({x:.0}, {y:.0})"),
            Notice::Victory => write!(f, "Polytron 4000 activated. You win!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_display() {
        let notice = Notice::RequirementNotMet {
            requirement: "you need: key".to_string(),
        };
        assert_eq!(notice.to_string(), "Requirement not met (you need: key)");
        assert_eq!(
            Notice::SpeedBoosted { multiplier: 3.0 }.to_string(),
            "Speed x3.0"
        );
    }

    #[test]
    fn notice_serializes_tagged() {
        let json = serde_json::to_value(Notice::ItemReceived {
            item: "key".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "item_received");
        assert_eq!(json["item"], "key");
    }
}
