//! Drawing a snapshot: the map, the player, the dialogue box, and the HUD.

use macroquad::prelude::*;
use tm_core::Rect as MapRect;
use tm_core::ZoneMap;
use tm_engine::{DialogueLayout, DialogueView, SelectionPhase, Snapshot};

use crate::app::{AppState, ShownNotice};
use crate::theme::{self, BANNER_SIZE, Palette, TEXT_SIZE};

/// Rough glyph width of the default font at [`TEXT_SIZE`].
const GLYPH_W: f32 = TEXT_SIZE * 0.5;
/// Line advance for wrapped text.
const LINE_H: f32 = TEXT_SIZE + 2.0;

/// Draw one frame.
pub fn draw(app: &AppState) {
    let snapshot = &app.snapshot;
    let palette = theme::palette(snapshot.theme_active);
    let (width, height) = app.canvas();

    clear_background(palette.background);
    theme::setup_virtual_canvas(width, height);
    draw_rectangle(0.0, 0.0, width, height, palette.background);

    draw_map(app.game.map(), snapshot, palette);
    draw_player(snapshot, palette);
    draw_hud(snapshot, palette);
    draw_notices(&app.notices, height, palette);

    if let Some(dialogue) = &snapshot.dialogue {
        draw_dialogue(app.game.layout(), dialogue, palette);
    }
    if snapshot.win {
        draw_victory(width, height, palette);
    }
}

fn outline(rect: &MapRect, thickness: f32, color: Color) {
    draw_rectangle_lines(rect.x, rect.y, rect.width, rect.height, thickness, color);
}

fn fill(rect: &MapRect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.width, rect.height, color);
}

fn draw_map(map: &ZoneMap, snapshot: &Snapshot, palette: &Palette) {
    for corridor in map.corridors() {
        fill(corridor, palette.corridor);
    }
    for access in map.access() {
        outline(access, 1.0, palette.access);
    }
    for poi in map.points_of_interest() {
        let active = snapshot.current_poi.as_deref() == Some(poi.name.as_str());
        let color = if active { palette.poi_active } else { palette.poi };
        outline(&poi.rect, if active { 3.0 } else { 2.0 }, color);
        draw_text(&poi.name, poi.rect.x + 4.0, poi.rect.y - 4.0, TEXT_SIZE * 0.8, color);
    }
}

fn draw_player(snapshot: &Snapshot, palette: &Palette) {
    if let Some((tx, ty)) = snapshot.move_target {
        draw_line(tx - 4.0, ty - 4.0, tx + 4.0, ty + 4.0, 1.0, palette.dim);
        draw_line(tx - 4.0, ty + 4.0, tx + 4.0, ty - 4.0, 1.0, palette.dim);
    }
    fill(&snapshot.player, palette.player);
    if snapshot.on_corridor {
        outline(&snapshot.player.inset(-2.0), 1.0, palette.dim);
    }
}

fn draw_hud(snapshot: &Snapshot, palette: &Palette) {
    let items = if snapshot.inventory.is_empty() {
        "-".to_string()
    } else {
        snapshot.inventory.join(", ")
    };
    let lines = [
        format!("Inventory: {items}"),
        format!("Speed x{:.1}", snapshot.speed_multiplier),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 8.0, 20.0 + i as f32 * LINE_H, TEXT_SIZE, palette.text);
    }
}

fn draw_notices(notices: &[ShownNotice], height: f32, palette: &Palette) {
    let bottom = height - 12.0;
    for (i, shown) in notices.iter().rev().enumerate() {
        let text = shown.notice.to_string();
        draw_text(&text, 8.0, bottom - i as f32 * LINE_H, TEXT_SIZE, palette.text);
    }
}

fn draw_dialogue(layout: &DialogueLayout, dialogue: &DialogueView, palette: &Palette) {
    let frame = layout.frame();
    fill(&frame, palette.panel);
    outline(&frame, 2.0, palette.text);
    draw_text(
        &dialogue.node.location,
        frame.x + 8.0,
        frame.y - 6.0,
        TEXT_SIZE,
        palette.text,
    );

    let area = layout.text_area();
    let max_chars = (area.width / GLYPH_W).max(1.0) as usize;
    let max_lines = (area.height / LINE_H).max(1.0) as usize;
    for (i, line) in wrap_text(&dialogue.text, max_chars)
        .iter()
        .take(max_lines)
        .enumerate()
    {
        draw_text(line, area.x, area.y + TEXT_SIZE + i as f32 * LINE_H, TEXT_SIZE, palette.text);
    }

    for (i, choice) in dialogue.choices.iter().enumerate() {
        let row = &choice.region;
        if i == dialogue.selected_index {
            let color = match dialogue.phase {
                SelectionPhase::Selecting => palette.selected,
                SelectionPhase::Confirming => palette.confirming,
            };
            fill(row, color);
        }
        if dialogue.hovered == Some(i) {
            outline(row, 1.0, palette.dim);
        }
        let marker = if i == dialogue.selected_index { ">" } else { " " };
        let text = format!("{marker} {}", choice.text);
        draw_text(&text, row.x + 4.0, row.bottom() - 7.0, TEXT_SIZE, palette.text);
    }
}

fn draw_victory(width: f32, height: f32, palette: &Palette) {
    draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.6));
    let banner = "YOU WIN";
    let hint = "Press R to play again";
    let size = measure_text(banner, None, BANNER_SIZE as u16, 1.0);
    draw_text(
        banner,
        (width - size.width) / 2.0,
        height / 2.0,
        BANNER_SIZE,
        palette.poi_active,
    );
    let size = measure_text(hint, None, TEXT_SIZE as u16, 1.0);
    draw_text(
        hint,
        (width - size.width) / 2.0,
        height / 2.0 + LINE_H * 2.0,
        TEXT_SIZE,
        palette.text,
    );
}

/// Word-wrap text into lines of at most `max_chars` characters.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();
            if current.is_empty() {
                current = word.to_string();
            } else if current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
            // Force-break words longer than a line
            while current.chars().count() > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                let tail: String = current.chars().skip(max_chars).collect();
                lines.push(head);
                current = tail;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
