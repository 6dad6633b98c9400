//! Interaction results.
//!
//! Every handler answers with an [`Outcome`]: zero or more [`InteractResult`]s
//! that the game applies in order once the handler returns.

use serde::{Deserialize, Serialize};

/// How a message is presented to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageStyle {
    #[default]
    Plain,
    /// Spoken by the ship's AI.
    Jim,
}

/// A message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

/// One effect produced by an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractResult {
    pub message: Option<String>,
    pub style: MessageStyle,
    pub sound: Option<String>,
    /// Open this detail view.
    pub detail_view: Option<String>,
    pub close_detail: bool,
    pub end_game: bool,
}

impl InteractResult {
    /// A plain message.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    /// A line of dialog from JIM.
    pub fn jim(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            style: MessageStyle::Jim,
            ..Self::default()
        }
    }

    pub fn sound(name: impl Into<String>) -> Self {
        Self {
            sound: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn detail_view(name: impl Into<String>) -> Self {
        Self {
            detail_view: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn close_detail() -> Self {
        Self {
            close_detail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sound(mut self, name: impl Into<String>) -> Self {
        self.sound = Some(name.into());
        self
    }

    #[must_use]
    pub fn ending_game(mut self) -> Self {
        self.end_game = true;
        self
    }

    /// The queued form of this result's message, if it has one.
    pub fn to_message(&self) -> Option<Message> {
        self.message.as_ref().map(|text| Message {
            text: text.clone(),
            style: self.style,
        })
    }
}

/// The ordered results of one interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome(pub Vec<InteractResult>);

impl Outcome {
    /// Nothing happened.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, result: InteractResult) {
        self.0.push(result);
    }

    /// Append a result if there is one; handy for dialog that only some states produce.
    #[must_use]
    pub fn and(mut self, result: impl Into<Option<InteractResult>>) -> Self {
        if let Some(result) = result.into() {
            self.0.push(result);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractResult> {
        self.0.iter()
    }

    /// All message texts, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|r| r.message.as_deref())
    }

    pub fn ends_game(&self) -> bool {
        self.0.iter().any(|r| r.end_game)
    }
}

impl From<InteractResult> for Outcome {
    fn from(result: InteractResult) -> Self {
        Self(vec![result])
    }
}

impl From<Option<InteractResult>> for Outcome {
    fn from(result: Option<InteractResult>) -> Self {
        Self(result.into_iter().collect())
    }
}

impl From<Vec<InteractResult>> for Outcome {
    fn from(results: Vec<InteractResult>) -> Self {
        Self(results)
    }
}

impl IntoIterator for Outcome {
    type Item = InteractResult;
    type IntoIter = std::vec::IntoIter<InteractResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Outcome {
    type Item = &'a InteractResult;
    type IntoIter = std::slice::Iter<'a, InteractResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_skips_missing_results() {
        let outcome = Outcome::from(InteractResult::message("first"))
            .and(None)
            .and(InteractResult::jim("second"));
        assert_eq!(outcome.messages().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(outcome.0[1].style, MessageStyle::Jim);
    }

    #[test]
    fn ending_result_marks_outcome() {
        let outcome: Outcome = InteractResult::message("bye").with_sound("beep550.ogg").ending_game().into();
        assert!(outcome.ends_game());
        assert_eq!(outcome.0[0].sound.as_deref(), Some("beep550.ogg"));
    }

    #[test]
    fn message_style_serializes_in_camel_case() {
        let json = serde_json::to_string(&MessageStyle::Jim).expect("serialize");
        assert_eq!(json, "\"jim\"");
    }
}
