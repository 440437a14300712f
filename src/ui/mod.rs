//! UI Module - egui integration and AppController
//!
//! The window is four debugger panels around a toolbar: memory map (projects),
//! disassembly (selected project), hex viewer (its tech stack) and stack
//! frames (skills). Panels render from the controller and report clicks back
//! as `SelectionAction`s.

pub mod controller;
pub mod app;
pub mod palette;
pub mod widgets;
pub mod toolbar;
pub mod memory_map;
pub mod disassembly;
pub mod hex_viewer;
pub mod stack_frames;
pub mod settings;

pub use controller::{AppController, SelectionAction, SelectionState};
pub use app::{AppUI, UIState};
