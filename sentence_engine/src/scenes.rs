//! The Suspended Sentence game content.
//!
//! Each room lives in its own module and exposes builder functions returning
//! [`Scene`] definitions. [`build_content`] registers all of them.

use anyhow::{Context, Result};

use crate::registry::Content;
use crate::scene::Scene;

pub mod bridge;
pub mod crew_quarters;
pub mod cryo;
pub mod engine;
pub mod map;
pub mod mess;
pub mod widgets;

pub const START_SCENE: &str = cryo::NAME;

/// Every scene and detail view of the game, in registration order.
pub fn all_scenes() -> Vec<Scene> {
    vec![
        cryo::scene(),
        map::scene(),
        bridge::scene(),
        bridge::chair_detail(),
        bridge::computer_detail(),
        crew_quarters::scene(),
        mess::scene(),
        engine::scene(),
    ]
}

/// Register the whole game, starting in `start`.
///
/// # Errors
/// Fails if any scene, thing or item refers to something that doesn't exist.
pub fn build_content(start: &str) -> Result<Content> {
    Content::build(start, all_scenes()).with_context(|| format!("while building game content starting in '{start}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_content_validates() {
        let content = build_content(START_SCENE).expect("content should validate");
        assert_eq!(content.start_scene(), "cryo");
        assert!(content.detail_view(bridge::COMPUTER).is_ok());
        assert!(content.detail_view(bridge::CHAIR_DETAIL).is_ok());
        assert!(content.item("taped_superconductor").is_ok());
    }

    #[test]
    fn unknown_start_scene_is_rejected() {
        assert!(build_content("airlock").is_err());
    }

    #[test]
    fn thing_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for scene in all_scenes() {
            for thing in scene.things() {
                assert!(seen.insert(thing.name().to_string()), "duplicate thing {}", thing.name());
            }
        }
    }
}
