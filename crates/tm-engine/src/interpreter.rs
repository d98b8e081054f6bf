//! Applying confirmed choices to the world.

use tm_core::{Action, DialogueGraph, WorldState};
use tracing::{debug, info, warn};

use crate::kinematics::PlayerKinematics;
use crate::notice::Notice;
use crate::session::EncounterSession;

/// Mutable context an action is applied in.
///
/// Borrows every piece of game state an action may touch so the
/// interpreter stays free of ownership concerns.
pub struct ActionContext<'a> {
    /// Progression store.
    pub world: &'a mut WorldState,
    /// Quest content.
    pub graph: &'a DialogueGraph,
    /// The open encounter.
    pub session: &'a mut EncounterSession,
    /// The player token.
    pub kinematics: &'a mut PlayerKinematics,
    /// Item granted when the alternate theme activates.
    pub theme_marker: &'a str,
    /// Where player-facing messages go.
    pub notices: &'a mut Vec<Notice>,
}

impl ActionContext<'_> {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// What happens to the encounter after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The conversation goes on at the (possibly new) active node.
    Continue,
    /// The encounter ends.
    Close,
    /// The game is won; the encounter ends.
    Won,
}

/// Executes the closed action vocabulary against the world.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionInterpreter;

impl ActionInterpreter {
    /// Confirm the visible choice at `visible_index`.
    ///
    /// The choice's guard is checked again against the current world. If it
    /// fails, or the choice can no longer be resolved, nothing is applied, a
    /// [`Notice::RequirementNotMet`] is emitted, and the encounter closes.
    pub fn confirm(ctx: &mut ActionContext<'_>, visible_index: usize) -> Outcome {
        let graph = ctx.graph;
        let choice = ctx
            .session
            .choice_index(visible_index)
            .and_then(|i| ctx.session.node(graph)?.choices.get(i));
        let Some(choice) = choice else {
            warn!(visible_index, node = %ctx.session.active_node(), "confirmed choice vanished");
            ctx.notify(Notice::RequirementNotMet {
                requirement: "that choice is no longer available".to_string(),
            });
            return Outcome::Close;
        };

        if let Some(condition) = &choice.condition
            && !condition.evaluate(ctx.world)
        {
            warn!(%condition, choice = %choice.text, "requirement not met at confirmation");
            ctx.notify(Notice::RequirementNotMet {
                requirement: condition.requirement(),
            });
            return Outcome::Close;
        }

        debug!(choice = %choice.text, "choice confirmed");
        match &choice.action {
            Some(action) => Self::apply(ctx, action),
            None => Outcome::Close,
        }
    }

    /// Apply an action, step by step in order.
    pub fn apply(ctx: &mut ActionContext<'_>, action: &Action) -> Outcome {
        let mut won = false;
        for step in action.steps() {
            won |= Self::apply_step(ctx, step);
        }
        if won {
            Outcome::Won
        } else if action.ends_session() {
            Outcome::Close
        } else {
            Outcome::Continue
        }
    }

    /// Returns true if the step won the game.
    fn apply_step(ctx: &mut ActionContext<'_>, step: &Action) -> bool {
        match step {
            Action::Close | Action::Sequence(_) => {}
            Action::WinGame => {
                ctx.world.win = true;
                info!("victory");
                ctx.notify(Notice::Victory);
                return true;
            }
            Action::GiveItem(item) => {
                if ctx.world.give_item(item.as_str()) {
                    info!(%item, "item received");
                    ctx.notify(Notice::ItemReceived { item: item.clone() });
                }
            }
            Action::RemoveItem(item) => {
                if ctx.world.remove_item(item) {
                    debug!(%item, "item removed");
                }
            }
            Action::SetFlag(flag) => {
                if ctx.world.set_flag(flag.as_str()) {
                    info!(%flag, "quest flag set");
                    ctx.notify(Notice::FlagSet { flag: flag.clone() });
                }
            }
            Action::ActivateTheme => {
                ctx.world.theme_active = true;
                ctx.world.give_item(ctx.theme_marker);
                info!("theme activated");
                ctx.notify(Notice::ThemeActivated);
            }
            Action::ApplySpeedBoost(multiplier) => {
                let total = ctx.world.boost_speed(*multiplier);
                ctx.kinematics.set_speed_multiplier(total);
                info!(multiplier = total, "speed boosted");
                ctx.notify(Notice::SpeedBoosted { multiplier: total });
            }
            Action::Teleport { x, y } => {
                ctx.kinematics.teleport(*x, *y);
                let (x, y) = ctx.kinematics.position();
                info!(x, y, "teleported");
                ctx.notify(Notice::Teleported { x, y });
            }
            Action::SwitchNode { location, node } => {
                let target =
                    DialogueGraph::switch_target(ctx.session.active_node(), location.as_deref(), node);
                ctx.session.switch_to(target, ctx.graph, ctx.world);
            }
        }
        false
    }
}
