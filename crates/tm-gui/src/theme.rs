//! Visual theme: CRT palettes and virtual canvas scaling.

use macroquad::prelude::*;

/// Font size for dialogue and HUD text.
pub const TEXT_SIZE: f32 = 20.0;
/// Font size for the victory banner.
pub const BANNER_SIZE: f32 = 48.0;

/// Named colors for everything the view draws.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Letterbox and screen background.
    pub background: Color,
    /// Corridor fill.
    pub corridor: Color,
    /// Access zone outline.
    pub access: Color,
    /// Point of interest outline.
    pub poi: Color,
    /// The point of interest the player stands on.
    pub poi_active: Color,
    /// Player token.
    pub player: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text and borders.
    pub dim: Color,
    /// Selected choice row.
    pub selected: Color,
    /// Selected row awaiting confirmation.
    pub confirming: Color,
    /// Dialogue box fill.
    pub panel: Color,
}

/// Green phosphor, the normal look.
pub const CRT: Palette = Palette {
    background: Color::new(0.02, 0.05, 0.02, 1.0),
    corridor: Color::new(0.05, 0.22, 0.08, 1.0),
    access: Color::new(0.20, 0.55, 0.25, 1.0),
    poi: Color::new(0.30, 0.85, 0.35, 1.0),
    poi_active: Color::new(0.75, 1.0, 0.55, 1.0),
    player: Color::new(1.0, 0.75, 0.20, 1.0),
    text: Color::new(0.55, 1.0, 0.55, 1.0),
    dim: Color::new(0.25, 0.55, 0.28, 1.0),
    selected: Color::new(0.12, 0.40, 0.15, 1.0),
    confirming: Color::new(0.55, 0.45, 0.08, 1.0),
    panel: Color::new(0.0, 0.08, 0.02, 0.92),
};

/// The palette once the theme item has been activated.
pub const ACID: Palette = Palette {
    background: Color::new(0.08, 0.0, 0.12, 1.0),
    corridor: Color::new(0.30, 0.0, 0.35, 1.0),
    access: Color::new(0.0, 0.85, 0.85, 1.0),
    poi: Color::new(1.0, 0.20, 0.75, 1.0),
    poi_active: Color::new(1.0, 0.95, 0.20, 1.0),
    player: Color::new(0.20, 1.0, 0.60, 1.0),
    text: Color::new(1.0, 0.85, 1.0, 1.0),
    dim: Color::new(0.65, 0.35, 0.80, 1.0),
    selected: Color::new(0.35, 0.05, 0.45, 1.0),
    confirming: Color::new(0.0, 0.45, 0.50, 1.0),
    panel: Color::new(0.06, 0.0, 0.10, 0.92),
};

/// Palette for the current theme flag.
pub fn palette(theme_active: bool) -> &'static Palette {
    if theme_active { &ACID } else { &CRT }
}

/// Scale and letterbox offset that fit a `width`×`height` canvas in the window.
fn viewport(width: f32, height: f32) -> (f32, f32, f32) {
    let scale = (screen_width() / width).min(screen_height() / height);
    let offset_x = (screen_width() - width * scale) / 2.0;
    let offset_y = (screen_height() - height * scale) / 2.0;
    (scale, offset_x, offset_y)
}

/// Set up a `Camera2D` that maps map coordinates onto the current window.
pub fn setup_virtual_canvas(width: f32, height: f32) {
    let (scale, offset_x, offset_y) = viewport(width, height);
    set_camera(&Camera2D {
        zoom: vec2(2.0 / width, 2.0 / height),
        target: vec2(width / 2.0, height / 2.0),
        viewport: Some((
            offset_x as i32,
            offset_y as i32,
            (width * scale) as i32,
            (height * scale) as i32,
        )),
        ..Default::default()
    });
}

/// Convert the window-space mouse position to map coordinates.
pub fn mouse_canvas_position(width: f32, height: f32) -> (f32, f32) {
    let (mx, my) = mouse_position();
    let (scale, offset_x, offset_y) = viewport(width, height);
    ((mx - offset_x) / scale, (my - offset_y) / scale)
}
