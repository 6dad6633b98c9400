//! Random flavour text.

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinnerType {
    /// The chained cryo door, poked with the wrong tool.
    DoorRefusal,
    BlinkingLights,
    NothingThere,
    QuitMsg,
    UnrecognizedCommand,
}

impl SpinnerType {
    pub fn wedges(self) -> &'static [&'static str] {
        match self {
            SpinnerType::DoorRefusal => &[
                "Sadly, this isn't that sort of game.",
                "Your valiant efforts are foiled by the Evil Game Designer.",
                "The door resists. Try something else, perhaps?",
            ],
            SpinnerType::BlinkingLights => &[
                "The lights flash in interesting patterns.",
                "The flashing lights don't mean anything to you.",
                "The console lights flash and flicker.",
            ],
            SpinnerType::NothingThere => &[
                "Nothing happens.",
                "There's nothing interesting there.",
                "You poke at thin air.",
            ],
            SpinnerType::QuitMsg => &[
                "The ship drifts on without you.",
                "Your sentence remains suspended.",
                "JIM will keep the lights on.",
            ],
            SpinnerType::UnrecognizedCommand => &[
                "Didn't quite catch that?",
                "That's not something you can do here.",
                "Try 'help' for a list of commands.",
            ],
        }
    }

    pub fn spinner(self) -> Spinner<&'static str> {
        Spinner::from_strs(self.wedges())
    }

    /// A random line of this type.
    pub fn spin(self) -> &'static str {
        self.spinner().spin().unwrap_or_default()
    }
}

pub trait SpinnerExt {
    fn from_strs(words: &[&'static str]) -> Self;
}
impl SpinnerExt for Spinner<&'static str> {
    fn from_strs(words: &[&'static str]) -> Self {
        let wedges = words.iter().map(|w| Wedge::new(*w)).collect::<Vec<_>>();
        Spinner::new(wedges)
    }
}
