//! Building blocks shared by several scenes: doors, cameras, scenery and JIM.

use std::fmt;

use anyhow::Result;
use sentence_data::LinkKind;

use crate::interact::Interact;
use crate::result::{InteractResult, Outcome};
use crate::thing::Thing;
use crate::world::World;

pub const PLAYER_ID: &str = "3-000-1337-2008";

pub const BRIDGE: &str = "bridge";
pub const AI_STATUS: &str = "ai status";

/// State of the ship's AI, kept in the bridge's data bag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiStatus {
    #[default]
    Online,
    /// Stuck reconstructing an impossible poster.
    Looping,
    Dead,
}

impl AiStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AiStatus::Online => "online",
            AiStatus::Looping => "looping",
            AiStatus::Dead => "dead",
        }
    }

    fn parse(text: Option<&str>) -> Self {
        match text {
            Some("looping") => AiStatus::Looping,
            Some("dead") => AiStatus::Dead,
            _ => AiStatus::Online,
        }
    }
}

impl fmt::Display for AiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn ai_status(world: &World) -> Result<AiStatus> {
    Ok(AiStatus::parse(world.scene_text(BRIDGE, AI_STATUS)?))
}

pub fn set_ai_status(world: &mut World, status: AiStatus) -> Result<()> {
    Ok(world.set_scene_data(BRIDGE, AI_STATUS, status.as_str())?)
}

/// A line from JIM. JIM only speaks while online.
pub fn jim_dialog(world: &World, text: impl Into<String>) -> Result<Option<InteractResult>> {
    Ok((ai_status(world)? == AiStatus::Online).then(|| InteractResult::jim(text)))
}

/// A doorway that moves the player to `target`.
pub fn door(name: &str, rect: (i32, i32, i32, i32), target: &str) -> Thing {
    let (x, y, w, h) = rect;
    let target = target.to_string();
    Thing::new(name)
        .interact("door", Interact::no_image(x, y, w, h))
        .describe("An open doorway leads to the rest of the ship.")
        .link(LinkKind::Scene, target.clone())
        .without(move |ctx| {
            ctx.world.change_scene(&target)?;
            Ok(Outcome::none())
        })
}

/// A security camera reporting to JIM.
///
/// `image` names the base image; the `_gray` variant is shown once JIM is dead
/// and both alternate while JIM is looping.
pub fn camera(name: &str, x: i32, y: i32, image: &str) -> Thing {
    let live = format!("{image}.png");
    let gray = format!("{image}_gray.png");
    Thing::new(name)
        .interact(AiStatus::Online.as_str(), Interact::image(x, y, &live))
        .interact(AiStatus::Dead.as_str(), Interact::image(x, y, &gray))
        .interact(AiStatus::Looping.as_str(), Interact::animated(x, y, [live, gray], 15))
        .initial(AiStatus::Online.as_str())
        .describe("A security camera watches over the room.")
        .select_with(|view| Ok(Some(ai_status(view.world)?.as_str().to_string())))
        .with_item("escher_poster", |ctx| {
            if ai_status(ctx.world)? != AiStatus::Online {
                return Ok(Outcome::none());
            }
            let dialog = jim_dialog(
                ctx.world,
                "3D scene reconstruction failed. Critical error. Entering emergency shutdown.",
            )?;
            set_ai_status(ctx.world, AiStatus::Looping)?;
            Ok(Outcome::from(dialog))
        })
}

/// Scenery that only describes itself.
pub fn generic_desc_thing(name: &str, index: usize, description: &str, rects: &[(i32, i32, i32, i32)]) -> Thing {
    Thing::new(name)
        .interact("description", Interact::rect_union(rects))
        .describe(description)
        .never_interactive()
        .debug_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ai_states_read_as_online() {
        assert_eq!(AiStatus::parse(None), AiStatus::Online);
        assert_eq!(AiStatus::parse(Some("dead")), AiStatus::Dead);
        assert_eq!(AiStatus::Looping.to_string(), "looping");
    }
}
