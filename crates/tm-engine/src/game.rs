//! The tick orchestrator.

use tm_core::{DialogueGraph, WorldState, ZoneMap};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::encounter::EncounterGate;
use crate::error::{EngineError, EngineResult};
use crate::input::{Axis, AxisInputMapper, Gesture, InputEvent, InputQueue, SelectionGesture};
use crate::interpreter::{ActionContext, ActionInterpreter, Outcome};
use crate::kinematics::PlayerKinematics;
use crate::layout::DialogueLayout;
use crate::notice::Notice;
use crate::session::EncounterSession;
use crate::snapshot::{ChoiceView, DialogueView, Snapshot};

/// Selection input gathered while draining the queue.
#[derive(Debug, Clone, Copy)]
enum SelectionInput {
    /// The axis had been silent long enough to drop a pending confirmation.
    Release,
    /// An accepted tap.
    Tap(Gesture),
}

#[derive(Debug, Clone, Copy)]
enum Click {
    Pointer(f32, f32),
    Controller(f32, f32),
}

#[derive(Debug, Default)]
struct TickInput {
    selection: Vec<SelectionInput>,
    clicks: Vec<Click>,
}

/// One playthrough: content, progression, and the per-tick update.
///
/// Each [`tick`](Game::tick) runs three phases in a fixed order:
///
/// 1. **Drain**: every queued event is applied in arrival order. Axis
///    samples update the mapper and, while a dialogue is open, are turned
///    into taps.
/// 2. **Update**: selection and confirmations while a dialogue is open,
///    otherwise movement; then corridor tracking (always) and the encounter
///    gate (only with no dialogue open).
/// 3. **Snapshot**: an immutable view for the presentation layer.
///
/// Once the game is won, gameplay freezes until [`restart`](Game::restart).
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    map: ZoneMap,
    graph: DialogueGraph,
    world: WorldState,
    kinematics: PlayerKinematics,
    mapper: AxisInputMapper,
    gesture: SelectionGesture,
    gate: EncounterGate,
    layout: DialogueLayout,
    session: Option<EncounterSession>,
    queue: InputQueue,
    notices: Vec<Notice>,
    pointer: Option<(f32, f32)>,
    on_corridor: bool,
}

impl Game {
    /// Start a playthrough over the given content.
    pub fn new(config: GameConfig, map: ZoneMap, graph: DialogueGraph) -> Self {
        info!(
            pois = map.points_of_interest().len(),
            locations = graph.len(),
            goal = %config.goal_location,
            "game created"
        );
        Self {
            kinematics: PlayerKinematics::new(&config),
            mapper: AxisInputMapper::new(&config.input),
            gesture: SelectionGesture::new(&config.input),
            gate: EncounterGate::new(),
            layout: DialogueLayout::new(config.width, config.height),
            world: WorldState::new(),
            session: None,
            queue: InputQueue::new(),
            notices: Vec::new(),
            pointer: None,
            on_corridor: false,
            config,
            map,
            graph,
        }
    }

    /// The run's configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The zone map.
    pub fn map(&self) -> &ZoneMap {
        &self.map
    }

    /// The dialogue content.
    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    /// The progression store.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The player token.
    pub fn kinematics(&self) -> &PlayerKinematics {
        &self.kinematics
    }

    /// The open encounter, if any.
    pub fn session(&self) -> Option<&EncounterSession> {
        self.session.as_ref()
    }

    /// The dialogue box geometry.
    pub fn layout(&self) -> &DialogueLayout {
        &self.layout
    }

    /// Queue an input event for the next tick.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Take the notices produced since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Run one tick at time `now` (seconds) and return the resulting view.
    pub fn tick(&mut self, now: f64) -> Snapshot {
        let input = self.drain_input();
        self.update(now, input);
        self.snapshot(now)
    }

    /// Confirm a visible choice of the open encounter directly.
    pub fn confirm_choice(&mut self, visible_index: usize) -> EngineResult<()> {
        if self.world.win {
            return Err(EngineError::NoEncounter);
        }
        let session = self.session.as_mut().ok_or(EngineError::NoEncounter)?;
        let len = session.visible_len();
        session
            .selection_mut()
            .click(visible_index, len)
            .ok_or(EngineError::InvalidChoice(visible_index))?;
        self.confirm_visible(visible_index);
        Ok(())
    }

    /// Return every mutable piece of state to how a new game starts.
    pub fn restart(&mut self) {
        self.world.reset();
        self.kinematics.reset();
        self.mapper.reset();
        self.gesture.reset();
        self.session = None;
        self.queue.clear();
        self.notices.clear();
        self.pointer = None;
        self.on_corridor = false;
        info!("game restarted");
    }

    fn drain_input(&mut self) -> TickInput {
        let mut input = TickInput::default();
        let dialogue_open = self.session.is_some() && !self.world.win;
        let click_threshold = self.config.input.click_threshold;
        let bounds = (self.config.width, self.config.height);

        for event in self.queue.drain() {
            match event {
                InputEvent::Axis(sample) => {
                    self.mapper.apply(&sample);
                    if !dialogue_open {
                        continue;
                    }
                    if self.gesture.is_paused(sample.timestamp) {
                        input.selection.push(SelectionInput::Release);
                    }
                    // Either axis keeps a pending confirmation alive; only Y taps.
                    if sample.axis != Axis::Y {
                        self.gesture.touch(sample.timestamp);
                        continue;
                    }
                    let zone = self.mapper.classify(sample.value);
                    if let Some(gesture) = self.gesture.observe(zone, sample.timestamp) {
                        input.selection.push(SelectionInput::Tap(gesture));
                    }
                }
                InputEvent::ControllerClick { value, .. } if value > click_threshold => {
                    let (x, y) = self.mapper.absolute_target(bounds.0, bounds.1);
                    input.clicks.push(Click::Controller(x, y));
                }
                InputEvent::ControllerClick { .. } => {}
                InputEvent::PointerClick { x, y } => input.clicks.push(Click::Pointer(x, y)),
                InputEvent::PointerMove { x, y } => self.pointer = Some((x, y)),
            }
        }
        input
    }

    fn update(&mut self, now: f64, input: TickInput) {
        if self.world.win {
            return;
        }

        if self.session.is_some() {
            self.update_dialogue(now, input);
        } else {
            self.update_movement(now, input);
        }

        let player = self.kinematics.player_rect();
        self.on_corridor = self.gate.track_corridor(&player, &self.map, &mut self.world);

        if self.session.is_none() && !self.world.win {
            let Some(location) = self.gate.maybe_trigger(&player, &self.map, &mut self.world)
            else {
                return;
            };
            let goal = self.config.goal_location.as_str();
            self.session = EncounterSession::start(&location, &self.graph, &mut self.world, goal);
            if self.session.is_some() {
                self.gesture.arm(now);
                self.update_hover();
            }
        }
    }

    fn update_dialogue(&mut self, now: f64, input: TickInput) {
        for item in input.selection {
            if self.session.is_none() {
                return;
            }
            match item {
                SelectionInput::Release => self.release_selection(),
                SelectionInput::Tap(gesture) => self.handle_gesture(gesture),
            }
        }

        for click in input.clicks {
            let Click::Pointer(x, y) = click else {
                continue;
            };
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let len = session.visible_len();
            let Some(index) = self.layout.hit_test(x, y, len) else {
                continue;
            };
            if session.selection_mut().click(index, len).is_some() {
                debug!(index, "choice confirmed by click");
                self.confirm_visible(index);
            }
        }

        if self.gesture.is_paused(now) {
            self.release_selection();
        }
        self.update_hover();
    }

    fn update_movement(&mut self, now: f64, input: TickInput) {
        if let Some(click) = input.clicks.last() {
            let (Click::Pointer(x, y) | Click::Controller(x, y)) = *click;
            debug!(x, y, "move target set");
            self.kinematics.set_target(x, y);
        }

        let (dx, dy) = self.mapper.movement(now);
        if dx != 0.0 || dy != 0.0 {
            self.kinematics.apply_axis(dx, dy);
        } else {
            self.kinematics.step_toward_target();
        }
    }

    fn handle_gesture(&mut self, gesture: Gesture) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let len = session.visible_len();
        if len == 0 {
            debug!(node = %session.active_node(), "encounter dismissed");
            self.session = None;
            return;
        }
        if let Some(index) = session.selection_mut().on_gesture(gesture, len) {
            self.confirm_visible(index);
        }
    }

    fn release_selection(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.selection_mut().release();
        }
    }

    fn confirm_visible(&mut self, visible_index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let mut ctx = ActionContext {
            world: &mut self.world,
            graph: &self.graph,
            session,
            kinematics: &mut self.kinematics,
            theme_marker: &self.config.theme_marker_item,
            notices: &mut self.notices,
        };
        match ActionInterpreter::confirm(&mut ctx, visible_index) {
            Outcome::Continue => {
                if let Some(session) = self.session.as_mut() {
                    session.refresh(&self.graph, &self.world);
                }
            }
            Outcome::Close => {
                debug!("encounter closed");
                self.session = None;
            }
            Outcome::Won => {
                info!("game won, freezing");
                self.session = None;
            }
        }
    }

    fn update_hover(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let len = session.visible_len();
        let hovered = self
            .pointer
            .and_then(|(x, y)| self.layout.hit_test(x, y, len));
        session.set_hovered(hovered);
    }

    /// Build the view of the current state without advancing time.
    pub fn snapshot(&self, now: f64) -> Snapshot {
        let player = self.kinematics.player_rect();
        Snapshot {
            time: now,
            position: self.kinematics.position(),
            player,
            move_target: self.kinematics.move_target(),
            on_corridor: self.on_corridor,
            in_access: self.map.is_in_access(&player),
            current_poi: self.map.poi_overlapping(&player).map(|p| p.name.clone()),
            dialogue: self.dialogue_view(),
            inventory: self.world.inventory.iter().cloned().collect(),
            quest_flags: self.world.quest_flags.iter().cloned().collect(),
            speed_multiplier: self.world.speed_multiplier,
            theme_active: self.world.theme_active,
            win: self.world.win,
        }
    }

    fn dialogue_view(&self) -> Option<DialogueView> {
        let session = self.session.as_ref()?;
        let node = session.node(&self.graph)?;
        let choices = session
            .visible()
            .iter()
            .enumerate()
            .filter_map(|(visible, &index)| {
                node.choices.get(index).map(|choice| ChoiceView {
                    text: choice.text.clone(),
                    region: self.layout.choice_rect(visible),
                })
            })
            .collect();
        Some(DialogueView {
            node: session.active_node().clone(),
            text: node.text.clone(),
            choices,
            selected_index: session.selection().selected_index(),
            phase: session.selection().phase(),
            hovered: session.hovered(),
        })
    }
}
