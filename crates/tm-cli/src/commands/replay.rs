use std::fs;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use tm_engine::{Axis, AxisSample, Game, InputEvent, Notice, Snapshot};

use crate::AssetArgs;

fn default_tick_rate() -> f64 {
    60.0
}

/// A recorded input session.
#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default = "default_tick_rate")]
    tick_rate: f64,
    duration: Option<f64>,
    #[serde(default)]
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
struct ScriptEvent {
    at: f64,
    #[serde(flatten)]
    input: ScriptInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScriptInput {
    Axis { axis: Axis, value: i32 },
    Click { value: i32 },
    Pointer { x: f32, y: f32 },
    Hover { x: f32, y: f32 },
}

impl ScriptEvent {
    fn to_input(&self) -> InputEvent {
        match self.input {
            ScriptInput::Axis { axis, value } => {
                InputEvent::Axis(AxisSample::new(axis, value, self.at))
            }
            ScriptInput::Click { value } => InputEvent::ControllerClick {
                value,
                timestamp: self.at,
            },
            ScriptInput::Pointer { x, y } => InputEvent::PointerClick { x, y },
            ScriptInput::Hover { x, y } => InputEvent::PointerMove { x, y },
        }
    }
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    ticks: u64,
    snapshot: &'a Snapshot,
    notices: &'a [Notice],
}

fn load_script(path: &Path) -> Result<Script, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read script {}: {e}", path.display()))?;
    let mut script: Script = serde_json::from_str(&text)
        .map_err(|e| format!("invalid script {}: {e}", path.display()))?;
    if !script.tick_rate.is_finite() || script.tick_rate <= 0.0 {
        return Err(format!("tick_rate must be positive, got {}", script.tick_rate));
    }
    script.events.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(script)
}

pub fn run(assets: &AssetArgs, script_path: &Path, json: bool) -> Result<(), String> {
    let config = super::load_config(assets)?;
    let script = load_script(script_path)?;
    let (map, graph) = super::load_lenient(assets, &config);
    let mut game = Game::new(config, map, graph);

    let last_event = script.events.last().map_or(0.0, |e| e.at);
    let duration = script.duration.unwrap_or(last_event + 1.0).max(0.0);
    let ticks = (duration * script.tick_rate).ceil() as u64;

    let mut pending = script.events.iter().peekable();
    let mut notices = Vec::new();
    let mut snapshot = game.snapshot(0.0);
    for tick in 0..=ticks {
        let now = tick as f64 / script.tick_rate;
        while let Some(event) = pending.next_if(|e| e.at <= now) {
            game.push(event.to_input());
        }
        snapshot = game.tick(now);
        notices.extend(game.drain_notices());
    }

    if json {
        let output = ReplayOutput {
            ticks: ticks + 1,
            snapshot: &snapshot,
            notices: &notices,
        };
        let text = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    print_summary(&snapshot, ticks + 1);
    if !notices.is_empty() {
        println!();
        println!("  {}", "Notices".bold().underline());
        for notice in &notices {
            println!("  {}", colorize_notice(notice));
        }
    }
    Ok(())
}

fn print_summary(snapshot: &Snapshot, ticks: u64) {
    println!(
        "  {} {}",
        "Replay".bold(),
        format!("({ticks} ticks, {:.2}s)", snapshot.time).dimmed()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let (x, y) = snapshot.position;
    let dialogue = snapshot
        .dialogue
        .as_ref()
        .map(|d| d.node.to_string())
        .unwrap_or_else(|| "—".to_string());
    let rows = [
        ("Position", format!("({x:.1}, {y:.1})")),
        (
            "POI",
            snapshot.current_poi.clone().unwrap_or_else(|| "—".to_string()),
        ),
        ("Dialogue", dialogue),
        ("Inventory", join_or_dash(&snapshot.inventory)),
        ("Flags", join_or_dash(&snapshot.quest_flags)),
        ("Speed", format!("x{:.2}", snapshot.speed_multiplier)),
        ("Theme", snapshot.theme_active.to_string()),
        ("Win", snapshot.win.to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    println!("{table}");
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}

fn colorize_notice(notice: &Notice) -> String {
    let text = notice.to_string();
    match notice {
        Notice::Victory => text.green().bold().to_string(),
        Notice::RequirementNotMet { .. } => text.red().to_string(),
        Notice::ItemReceived { .. } | Notice::FlagSet { .. } => text.cyan().to_string(),
        _ => text.yellow().to_string(),
    }
}
