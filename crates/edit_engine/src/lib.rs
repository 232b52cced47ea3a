//! Edit Engine - interaction controller, commands and undo/redo
//!
//! This crate implements the template designer's gesture state machine
//! (drag, resize, marquee), discrete editing actions, and the command-based
//! undo/redo history behind them.

mod command;
mod config;
mod controller;
mod element_commands;
mod error;
mod gesture;
mod input;
mod undo;
mod view;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use element_commands::*;
pub use error::*;
pub use gesture::*;
pub use hit_test::*;
pub use input::*;
pub use undo::*;
pub use view::*;
