#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod cursor;
pub mod data_paths;
pub mod error;
pub mod game;
pub mod i18n;
pub mod interact;
pub mod item;
pub mod registry;
pub mod render;
pub mod repl;
pub mod resources;
pub mod result;
pub mod scene;
pub mod scenes;
pub mod sound;
pub mod spinners;
pub mod style;
pub mod thing;
pub mod world;

// Re-exports for convenience
pub use error::ContentError;
pub use game::Game;
pub use interact::Interact;
pub use item::{Inventory, Item, ItemHolder};
pub use registry::Content;
pub use repl::run_repl;
pub use result::{InteractResult, Message, MessageStyle, Outcome};
pub use scene::Scene;
pub use sentence_data::{Point, Rect, Size, Value};
pub use thing::Thing;
pub use world::World;
