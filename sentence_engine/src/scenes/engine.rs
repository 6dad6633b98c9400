//! Engine room. The engine needs a working superconductor.

use crate::interact::Interact;
use crate::result::{InteractResult, Outcome};
use crate::scene::Scene;
use crate::thing::Thing;

use super::widgets::door;

pub const NAME: &str = "engine";
pub const ENGINE_ONLINE: &str = "engine online";

pub fn scene() -> Scene {
    Scene::new(NAME)
        .background("engine_room.png")
        .offset(0, -50)
        .data(ENGINE_ONLINE, false)
        .thing(door("engine.to_map", (650, 260, 110, 220), "map"))
        .thing(socket())
}

fn socket() -> Thing {
    Thing::new("engine.socket")
        .interact("empty", Interact::no_image(300, 300, 90, 60))
        .interact("connected", Interact::no_image(300, 300, 90, 60))
        .initial("empty")
        .describe_with(|view| {
            Ok(Some(if view.interact()? == "connected" {
                "The superconductor hums along nicely.".to_string()
            } else {
                "An empty socket. Something high-powered used to plug in here.".to_string()
            }))
        })
        .with_item("taped_superconductor", |ctx| {
            if ctx.interact()? == "connected" {
                return Ok(Outcome::none());
            }
            ctx.world.remove_inventory_item("taped_superconductor")?;
            ctx.world.set_scene_data(NAME, ENGINE_ONLINE, true)?;
            ctx.set_interact("connected")?;
            Ok(InteractResult::message(
                "The superconductor slides into place. Deep below, the engines rumble back to life.",
            )
            .into())
        })
        .with_item("superconductor", |_| {
            Ok(InteractResult::message(
                "The bare superconductor sparks and shorts out against the casing. \
                 It needs some insulation.",
            )
            .into())
        })
        .without(|ctx| {
            if ctx.interact()? == "connected" {
                return Ok(InteractResult::message("Best not to touch it while it's running.").into());
            }
            Ok(InteractResult::message("You could put your hand in there, but you'd regret it.").into())
        })
}
