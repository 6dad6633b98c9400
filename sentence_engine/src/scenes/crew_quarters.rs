//! Crew quarters.

use sentence_data::LinkKind;

use crate::interact::Interact;
use crate::item::Item;
use crate::result::{InteractResult, Outcome};
use crate::scene::Scene;
use crate::thing::Thing;

use super::widgets::{PLAYER_ID, camera, door, generic_desc_thing, jim_dialog};

pub const NAME: &str = "crew_quarters";

pub fn scene() -> Scene {
    Scene::new(NAME)
        .background("crew_quarters.png")
        .offset(0, -50)
        .thing(door("crew.to_map", (233, 252, 125, 181), "map"))
        .thing(safe())
        .thing(fishbowl_thing())
        .item(fishbowl())
        .item(Item::new("duct_tape", "duct_tape.png"))
        .item(Item::new("escher_poster", "triangle_poster.png"))
        .item(Item::new("helmet", "fishbowl_helmet.png"))
        .thing(poster())
        .thing(camera("crew.camera", 85, 97, "camera_medium"))
        .thing(generic_desc_thing(
            "crew.plant",
            1,
            "The plant is doing surprisingly well for centuries of neglect",
            &[(624, 215, 61, 108)],
        ))
        .thing(generic_desc_thing(
            "crew.cat",
            2,
            "A picture of a cat labelled 'Clementine'",
            &[(722, 382, 66, 72)],
        ))
}

/// A safe, for keeping things safe.
fn safe() -> Thing {
    Thing::new("crew.safe")
        .interact("safe", Interact::no_image(447, 238, 72, 73))
        .interact("full_safe", Interact::image(445, 227, "open_safe_full.png"))
        .interact("empty_safe", Interact::image(445, 227, "open_safe_empty.png"))
        .initial("safe")
        .data("is_cracked", false)
        .data("has_tape", true)
        .link(LinkKind::Item, "duct_tape")
        .describe("Ah, a vintage Knoxx & Co. model QR3. Quaint, but reasonably secure.")
        .without(|ctx| {
            if !ctx.flag("is_cracked")? {
                return Ok(InteractResult::message(
                    "The safe is locked. This might be an interesting challenge, \
                     if suitable equipment can be found.",
                )
                .into());
            }
            if !ctx.flag("has_tape")? {
                return Ok(InteractResult::message(
                    "The perfectly balanced door swings frictionlessly to and fro. What craftsmanship!",
                )
                .into());
            }
            ctx.set_data("has_tape", false)?;
            ctx.world.add_inventory_item("duct_tape")?;
            ctx.set_interact("empty_safe")?;
            Ok(InteractResult::message("Duct tape. It'll stick to everything except ducts, apparently.").into())
        })
        .with_item("stethoscope", |ctx| {
            if ctx.flag("is_cracked")? {
                return Ok(InteractResult::message("It's already unlocked. There's no more challenge.").into());
            }
            ctx.set_data("is_cracked", true)?;
            ctx.set_interact("full_safe")?;
            let dialog = jim_dialog(
                ctx.world,
                format!(
                    "Prisoner {PLAYER_ID}, you have been observed committing a felony violation. \
                     This will go onto your permanent record, and your sentence may be extended \
                     by up to twenty years."
                ),
            )?;
            Ok(Outcome::from(InteractResult::message(
                "Even after centuries of neglect, the tumblers slide almost silently into place. \
                 Turns out the combination was '1 2 3 4 5'. An idiot must keep his luggage in here.",
            ))
            .and(dialog))
        })
}

fn fishbowl_thing() -> Thing {
    Thing::new("crew.fishbowl")
        .interact("fishbowl", Interact::image(356, 495, "fishbowl_on_table.png"))
        .interact("fish_no_bowl", Interact::image(372, 517, "fish_minus_bowl.png"))
        .initial("fishbowl")
        .data("has_bowl", true)
        .link(LinkKind::Item, "fishbowl")
        .describe_with(|view| {
            Ok(Some(if view.flag("has_bowl")? {
                "This fishbowl looks exactly like an old science fiction space helmet.".to_string()
            } else {
                "An evicted dead fish and some sand lie forlornly on the table".to_string()
            }))
        })
        .without(|ctx| {
            if !ctx.flag("has_bowl")? {
                return Ok(InteractResult::message(
                    "What's the point of lugging around a very dead fish and a kilogram or so of sand?",
                )
                .into());
            }
            ctx.set_interact("fish_no_bowl")?;
            ctx.set_data("has_bowl", false)?;
            ctx.world.add_inventory_item("fishbowl")?;
            Ok(InteractResult::message("The fishbowl is useful, but its contents aren't.").into())
        })
}

/// A bowl. Sans fish.
fn fishbowl() -> Item {
    Item::new("fishbowl", "fishbowl.png")
        .link(LinkKind::Item, "helmet")
        .on_item("duct_tape", |combo| {
            combo.replace_self("helmet")?;
            Ok(InteractResult::message(
                "You duct tape the edges of the helmet. The seal is crude, but it will serve \
                 as a workable helmet if needed.",
            )
            .into())
        })
}

/// An innocent poster on the wall.
fn poster() -> Thing {
    Thing::new("crew.poster")
        .interact("poster", Interact::image(29, 166, "triangle_poster.png"))
        .link(LinkKind::Item, "escher_poster")
        .describe("A paradoxical poster hangs below the security camera.")
        .without(|ctx| {
            ctx.world.add_inventory_item("escher_poster")?;
            ctx.remove()?;
            Ok(InteractResult::message("This poster will go nicely on your bedroom wall.").into())
        })
}
