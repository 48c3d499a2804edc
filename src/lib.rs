//! Handheld Snake - Snake for a 128x64 button-driven handheld
//!
//! This library provides:
//! - Core game logic (game module)
//! - Hardware collaborator traits and a terminal emulation of them (device module)
//! - Projection of the game state onto the display (render module)
//! - The frame loop tying them together (console module)

pub mod console;
pub mod device;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
