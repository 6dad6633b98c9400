//! `repl::inventory` module
//!
//! Contains repl loop handlers for commands that use the inventory bar.

use crate::error::ContentError;
use crate::game::Game;
use crate::repl::ReplControl;
use crate::style::GameStyle;

use anyhow::Result;
use log::info;

/// Pick up an item as the tool, or put the tool down with `None`.
///
/// # Errors
/// Naming an item the player doesn't hold only prints a note.
pub fn tool_handler(game: &mut Game, item: Option<&str>) -> Result<ReplControl> {
    let Some(item) = item else {
        game.set_tool(None)?;
        println!("You put down what you were holding.");
        return Ok(ReplControl::Continue);
    };
    match game.set_tool(Some(item)) {
        Ok(()) => {
            info!("player holds '{item}'");
            println!("You are holding the {}.", item.tool_style());
        },
        Err(e) if is_not_held(&e) => {
            println!("You don't have {}.", item.error_style());
        },
        Err(e) => return Err(e),
    }
    Ok(ReplControl::Continue)
}

/// Click an inventory item: hold it, or use the held tool on it.
///
/// # Errors
/// Returns an error if a combination handler fails.
pub fn combine_handler(game: &mut Game, item: &str) -> Result<ReplControl> {
    let tool = game.world().tool().map(str::to_string);
    match game.interact_inventory(item) {
        Ok(outcome) => {
            if let Some(tool) = tool {
                if outcome.is_empty() && tool != item {
                    println!("The {} doesn't do anything to the {}.", tool.tool_style(), item.item_style());
                }
            } else if let Some(held) = game.world().tool() {
                println!("You are holding the {}.", held.tool_style());
            }
        },
        Err(e) if is_not_held(&e) => println!("You don't have {}.", item.error_style()),
        Err(e) => return Err(e),
    }
    Ok(ReplControl::Continue)
}

/// Show the inventory bar, marking the current tool.
pub fn inv_handler(game: &Game) -> ReplControl {
    let inventory = game.world().inventory();
    if inventory.is_empty() {
        println!("You're not carrying anything.");
        return ReplControl::Continue;
    }
    println!("{}", "Inventory".subheading_style());
    for name in inventory.items() {
        if inventory.tool() == Some(name.as_str()) {
            println!(" * {}", name.tool_style());
        } else {
            println!(" - {}", name.item_style());
        }
    }
    ReplControl::Continue
}

fn is_not_held(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<ContentError>(),
        Some(ContentError::NotInInventory(_) | ContentError::UnknownItem(_))
    )
}
