//! Hand-pinch media toggle.
//!
//! Webcam frames go through a hand landmark detector; the thumb-to-little-finger
//! pose is tested per frame, debounced, and each confirmed pinch fires one
//! play/pause action.

pub mod action;
pub mod args;
pub mod camera;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod detector;
pub mod font;
pub mod geometry;
pub mod hud;
pub mod output;
pub mod probe;
pub mod types;

mod geometry_tests;
