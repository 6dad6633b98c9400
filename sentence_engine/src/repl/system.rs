//! `repl::system` module
//!
//! Contains repl loop handlers for the in-game menu, help and developer commands.

use colored::Colorize;

use crate::command::MenuCommand;
use crate::game::Game;
use crate::repl::ReplControl;
use crate::spinners::SpinnerType;
use crate::style::GameStyle;

use anyhow::{Context, Result};
use log::{info, warn};

type MenuHandler = fn(&Game) -> ReplControl;

/// What each menu entry does.
const MENU_HANDLERS: [(MenuCommand, MenuHandler); 3] = [
    (MenuCommand::Hide, menu_hide),
    (MenuCommand::MainMenu, menu_leave),
    (MenuCommand::Quit, menu_leave),
];

fn menu_hide(_game: &Game) -> ReplControl {
    println!("{}", "Menu closed.".dimmed());
    ReplControl::Continue
}

fn menu_leave(game: &Game) -> ReplControl {
    info!(
        "leaving from '{}' (ended: {}) holding {:?}",
        game.world().active_scene(),
        game.is_ended(),
        game.world().inventory().items()
    );
    println!("{}", SpinnerType::QuitMsg.spin().italic());
    ReplControl::Quit
}

/// Run a menu entry.
pub fn menu_handler(game: &Game, entry: MenuCommand) -> ReplControl {
    match MENU_HANDLERS.iter().find(|(command, _)| *command == entry) {
        Some((_, handler)) => handler(game),
        None => {
            warn!("menu entry '{}' has no handler", entry.label());
            ReplControl::Continue
        },
    }
}

/// Quit the game.
pub fn quit_handler(game: &Game) -> ReplControl {
    menu_handler(game, MenuCommand::Quit)
}

/// Show available commands.
pub fn help_handler() -> ReplControl {
    println!("{}", "Commands".subheading_style());
    for (usage, what) in HELP {
        println!("  {:<22} {}", usage.bold(), what);
    }
    let entries: Vec<&str> = MENU_HANDLERS.iter().map(|(command, _)| command.label()).collect();
    println!("  {:<22} {}", "menu <entry>".bold(), entries.join(", "));
    ReplControl::Continue
}

const HELP: &[(&str, &str)] = &[
    ("click X Y", "click the scene at X,Y"),
    ("hover X Y", "move the pointer to X,Y"),
    ("tool ITEM", "hold an inventory item"),
    ("hand", "put the held item down"),
    ("use ITEM", "click an inventory item"),
    ("inventory", "list what you carry"),
    ("look", "list what's in the scene"),
    ("tick [N]", "let N animation frames pass"),
    ("draw", "list what is drawn on screen"),
    ("close", "leave a close-up view"),
    ("quit", "leave the game"),
];

/// Print the whole world state as RON (dev).
///
/// # Errors
/// Returns an error if the state can't be serialized.
pub fn state_handler(game: &Game) -> Result<ReplControl> {
    let text = ron::ser::to_string_pretty(game.world(), ron::ser::PrettyConfig::default())
        .context("error converting World to 'ron' format")?;
    println!("{text}");
    Ok(ReplControl::Continue)
}

/// Jump straight to a scene (dev).
pub fn scene_handler(game: &mut Game, name: &str) -> ReplControl {
    match game.change_scene(name) {
        Ok(()) => {
            info!("dev jump to scene '{name}'");
            println!("Now in the {}.", name.scene_style());
        },
        Err(e) => println!("{}", format!("{e:#}").error_style()),
    }
    ReplControl::Continue
}
