//! Command module
//!
//! Describes the commands the terminal front end accepts. Each one stands in for
//! a mouse or menu event of a graphical front end.
use variantly::Variantly;

use sentence_data::Point;

/// Actions available from the in-game menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum MenuCommand {
    /// Close the menu and return to the game.
    Hide,
    /// Leave the game for the main menu.
    MainMenu,
    Quit,
}

impl MenuCommand {
    /// Every menu entry with the label it is shown under.
    pub const TABLE: [(&'static str, MenuCommand); 3] = [
        ("hide", MenuCommand::Hide),
        ("main menu", MenuCommand::MainMenu),
        ("quit", MenuCommand::Quit),
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, command)| *command)
    }

    pub fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, command)| *command == self)
            .map_or("", |(name, _)| name)
    }
}

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    /// Click at a screen position.
    Click(Point),
    /// Move the pointer.
    Hover(Point),
    /// Pick an inventory item up as the tool.
    Tool(String),
    /// Put the tool down.
    Hand,
    /// Click an inventory item, using the tool on it if one is held.
    Combine(String),
    Inventory,
    /// Advance animations.
    Tick(u32),
    Draw,
    Close,
    Look,
    Menu(MenuCommand),
    /// Dump the world state (dev).
    State,
    /// Jump to a scene (dev).
    Scene(String),
    Help,
    Quit,
    Unknown,
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        ["combine" | "use" | "click", "item", item] | ["combine" | "use", item] => {
            Command::Combine((*item).to_string())
        },
        ["click" | "c", x, y] => parse_point(x, y).map_or(Command::Unknown, Command::Click),
        ["hover" | "h" | "move", x, y] => parse_point(x, y).map_or(Command::Unknown, Command::Hover),
        ["tool" | "hold" | "select", item] => Command::Tool((*item).to_string()),
        ["hand" | "drop"] => Command::Hand,
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["tick" | "t"] => Command::Tick(1),
        ["tick" | "t", n] => n.parse().map_or(Command::Unknown, Command::Tick),
        ["draw" | "screen"] => Command::Draw,
        ["close" | "back"] => Command::Close,
        ["look" | "l"] => Command::Look,
        ["menu"] => Command::Menu(MenuCommand::Hide),
        ["menu", rest @ ..] => MenuCommand::from_label(&rest.join(" ")).map_or(Command::Unknown, Command::Menu),
        [":state"] => Command::State,
        [":scene" | ":port", scene] => Command::Scene((*scene).to_string()),
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    }
}

fn parse_point(x: &str, y: &str) -> Option<Point> {
    Some(Point::new(x.parse().ok()?, y.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pointer_commands() {
        assert_eq!(parse_command("click 460 250"), Command::Click(Point::new(460, 250)));
        assert_eq!(parse_command("  hover 10 -5 "), Command::Hover(Point::new(10, -5)));
        assert_eq!(parse_command("click ten 5"), Command::Unknown);
    }

    #[test]
    fn parses_inventory_commands() {
        assert_eq!(parse_command("tool stethoscope"), Command::Tool("stethoscope".into()));
        assert_eq!(parse_command("use duct_tape"), Command::Combine("duct_tape".into()));
        assert_eq!(parse_command("click item fishbowl"), Command::Combine("fishbowl".into()));
        assert_eq!(parse_command("hand"), Command::Hand);
    }

    #[test]
    fn parses_ticks_and_menu() {
        assert_eq!(parse_command("tick"), Command::Tick(1));
        assert_eq!(parse_command("tick 30"), Command::Tick(30));
        assert_eq!(parse_command("menu main menu"), Command::Menu(MenuCommand::MainMenu));
        assert_eq!(parse_command("menu"), Command::Menu(MenuCommand::Hide));
        assert_eq!(parse_command("menu dance"), Command::Unknown);
    }

    #[test]
    fn menu_labels_round_trip_through_the_table() {
        for (label, command) in MenuCommand::TABLE {
            assert_eq!(command.label(), label);
            assert_eq!(MenuCommand::from_label(label), Some(command));
        }
    }
}
