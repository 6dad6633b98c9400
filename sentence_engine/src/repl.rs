//! REPL and command handling utilities.
//!
//! The terminal front end runs in a read-eval-print loop. Each command stands
//! in for a mouse or menu event and is handed to a handler in one of the
//! submodules, which drives the [`Game`] and prints what happened.

mod input;
pub mod inventory;
pub mod look;
pub mod pointer;
pub mod system;

pub use inventory::*;
pub use look::*;
pub use pointer::*;
pub use system::*;

use crate::command::{Command, parse_command};
use crate::game::Game;
use crate::result::{Message, MessageStyle};
use crate::spinners::SpinnerType;
use crate::style::GameStyle;

use anyhow::Result;
use colored::Colorize;
use log::{info, warn};
use textwrap::{fill, termwidth};

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the player quits.
///
/// Handles prompting, command parsing and dispatching to the handler modules.
/// Returns when a handler signals `Quit`.
///
/// # Errors
/// - Propagates failures from handlers, such as a broken content reference.
pub fn run_repl(game: &mut Game) -> Result<()> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    let mut input_manager = InputManager::new();
    let mut announced_end = false;
    loop {
        let prompt = format!("\n[{}|{}]>> ", game.world().active_scene(), tool_label(game))
            .as_str()
            .prompt_style()
            .to_string();

        let input_event = if let Ok(event) = input_manager.read_line(&prompt) {
            event
        } else {
            println!("{}", "Failed to read input. Try again.".error_style());
            continue;
        };

        let input = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                println!("Command canceled.");
                continue;
            },
        };

        let command = parse_command(&input);
        let control = match &command {
            Click(point) => click_handler(game, *point)?,
            Hover(point) => hover_handler(game, *point)?,
            Tool(item) => tool_handler(game, Some(item.as_str()))?,
            Hand => tool_handler(game, None)?,
            Combine(item) => combine_handler(game, item)?,
            Inventory => inv_handler(game),
            Tick(ticks) => tick_handler(game, *ticks),
            Draw => draw_handler(game)?,
            Close => close_handler(game)?,
            Look => look_handler(game)?,
            Menu(entry) => menu_handler(game, *entry),
            State => state_handler(game)?,
            Scene(name) => scene_handler(game, name),
            Help => help_handler(),
            Quit => quit_handler(game),
            Unknown => {
                warn!("unrecognized command: {}", input.trim());
                println!("{}", SpinnerType::UnrecognizedCommand.spin().italic());
                ReplControl::Continue
            },
        };

        show_messages(game);
        if game.is_ended() && !announced_end {
            announced_end = true;
            info!("game over in '{}'", game.world().active_scene());
            println!(
                "\n{}",
                "The ship turns away from the penal colony. Your sentence is suspended."
                    .ended_style()
            );
            println!("{}", "(menu quit to leave)".dimmed());
        }
        if let ReplControl::Quit = control {
            break;
        }
    }
    Ok(())
}

fn tool_label(game: &Game) -> String {
    game.world().tool().unwrap_or("hand").to_string()
}

/// Print and drain the game's message queue.
pub fn show_messages(game: &mut Game) {
    for message in game.take_messages() {
        println!("{}", format_message(&message));
    }
}

fn format_message(message: &Message) -> String {
    let wrapped = fill(&message.text, termwidth().saturating_sub(4).max(20));
    match message.style {
        MessageStyle::Plain => wrapped.message_style().to_string(),
        MessageStyle::Jim => format!("{} {}", "JIM:".bold().bright_blue(), wrapped.jim_style()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jim_messages_are_labelled() {
        let message = Message {
            text: "Prisoner. Step away.".into(),
            style: MessageStyle::Jim,
        };
        assert!(format_message(&message).contains("JIM:"));
    }

    #[test]
    fn plain_messages_keep_text() {
        let message = Message {
            text: "The safe is locked.".into(),
            style: MessageStyle::Plain,
        };
        assert!(format_message(&message).contains("The safe is locked."));
    }
}
