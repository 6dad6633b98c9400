//! Cryo room where the prisoner starts out.

use sentence_data::LinkKind;

use crate::interact::Interact;
use crate::item::Item;
use crate::result::{InteractResult, Outcome};
use crate::scene::Scene;
use crate::spinners::SpinnerType;
use crate::thing::Thing;

pub const NAME: &str = "cryo";

pub fn scene() -> Scene {
    Scene::new(NAME)
        .background("cryo_room.png")
        .data("accessible", true)
        .item(Item::new("titanium_leg", "titanium_leg.png"))
        .thing(cryo_unit())
        .thing(door())
}

/// The cryo unit next to the player's, with a piratical occupant.
fn cryo_unit() -> Thing {
    Thing::new("cryo.unit.1")
        .interact("unit", Interact::no_image(20, 20, 400, 500))
        .data("has_leg", true)
        .link(LinkKind::Item, "titanium_leg")
        .describe_with(|view| {
            Ok(Some(if view.flag("has_leg")? {
                "A cryo unit. Its occupant, a long-dead pirate, sports a shiny titanium leg.".to_string()
            } else {
                "A cryo unit. Its occupant is now somewhat lopsided.".to_string()
            }))
        })
        .without(|ctx| {
            if !ctx.flag("has_leg")? {
                return Ok(InteractResult::message("The corpse has nothing more to offer.").into());
            }
            ctx.set_data("has_leg", false)?;
            ctx.world.add_inventory_item("titanium_leg")?;
            Ok(InteractResult::message(
                "You wrench the titanium leg off the corpse. It's unlikely to be missed.",
            )
            .into())
        })
}

/// Chained shut until the titanium leg breaks the chain.
fn door() -> Thing {
    Thing::new("cryo.door")
        .interact("shut", Interact::no_image(480, 160, 160, 300))
        .interact("open", Interact::no_image(480, 160, 160, 300))
        .initial("shut")
        .link(LinkKind::Scene, "map")
        .describe_with(|view| {
            Ok(Some(if view.interact()? == "open" {
                "The door stands open. The rest of the ship lies beyond.".to_string()
            } else {
                "A heavy door. Something on the other side keeps it from opening.".to_string()
            }))
        })
        .with_item("titanium_leg", |ctx| {
            if ctx.interact()? == "open" {
                return Ok(InteractResult::message("The chain is already broken.").into());
            }
            ctx.set_interact("open")?;
            Ok(InteractResult::message(
                "You wedge the titanium leg into the chain and twist. With a satisfying *snap*, \
                 the chain breaks and the door opens.",
            )
            .into())
        })
        .with_default(|ctx| {
            if ctx.interact()? == "open" {
                return Ok(Outcome::none());
            }
            Ok(InteractResult::message(SpinnerType::DoorRefusal.spin()).into())
        })
        .without(|ctx| {
            if ctx.interact()? == "open" {
                ctx.world.change_scene("map")?;
                return Ok(Outcome::none());
            }
            Ok(InteractResult::message(
                "It moves slightly and then stops. A chain on the other side is preventing it \
                 from opening completely.",
            )
            .into())
        })
}
