//! Retro CRT GUI for Tarmac: macroquad entry point.

use clap::Parser;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tm_gui::app::{AppState, Args};
use tm_gui::view;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tarmac".to_owned(),
        window_width: 1024,
        window_height: 768,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tm_engine=info,tm_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut app = AppState::load(&args);

    loop {
        app.update(get_time());
        if app.should_quit {
            break;
        }
        view::draw(&app);
        next_frame().await;
    }
}
