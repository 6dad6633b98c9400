//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn scene_style(&self) -> ColoredString;
    fn scene_titlebar_style(&self) -> ColoredString;
    fn thing_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn tool_style(&self) -> ColoredString;
    fn message_style(&self) -> ColoredString;
    fn jim_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn sound_style(&self) -> ColoredString;
    fn ended_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn scene_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn scene_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn thing_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60)
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn tool_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40).bold().underline()
    }
    fn message_style(&self) -> ColoredString {
        self.truecolor(230, 230, 230)
    }
    fn jim_style(&self) -> ColoredString {
        self.italic().truecolor(75, 180, 255)
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn sound_style(&self) -> ColoredString {
        self.dimmed().truecolor(80, 80, 230)
    }
    fn ended_style(&self) -> ColoredString {
        self.bold().truecolor(220, 40, 220)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
}

impl GameStyle for String {
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn scene_style(&self) -> ColoredString {
        self.as_str().scene_style()
    }
    fn scene_titlebar_style(&self) -> ColoredString {
        self.as_str().scene_titlebar_style()
    }
    fn thing_style(&self) -> ColoredString {
        self.as_str().thing_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn tool_style(&self) -> ColoredString {
        self.as_str().tool_style()
    }
    fn message_style(&self) -> ColoredString {
        self.as_str().message_style()
    }
    fn jim_style(&self) -> ColoredString {
        self.as_str().jim_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn sound_style(&self) -> ColoredString {
        self.as_str().sound_style()
    }
    fn ended_style(&self) -> ColoredString {
        self.as_str().ended_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
}
