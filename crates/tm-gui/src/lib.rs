//! Retro CRT GUI for Tarmac.
//!
//! A macroquad front end that emulates the two-axis controller from the
//! keyboard, forwards mouse input as pointer events, and draws each engine
//! snapshot on a green phosphor screen. The engine owns all game rules; this
//! crate only pushes input and paints what it gets back.

pub mod app;
pub mod input;
pub mod theme;
pub mod view;
