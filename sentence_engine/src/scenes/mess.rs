//! Mess hall, with the leaking life support pipes.

use crate::interact::Interact;
use crate::item::Item;
use crate::result::InteractResult;
use crate::scene::Scene;
use crate::thing::Thing;

use super::widgets::{camera, door};

pub const NAME: &str = "mess";
pub const LIFE_SUPPORT: &str = "life support status";

pub fn scene() -> Scene {
    Scene::new(NAME)
        .background("mess_hall.png")
        .offset(0, -50)
        .data(LIFE_SUPPORT, "broken")
        .item(Item::new("machete", "machete.png"))
        .thing(door("mess.to_map", (20, 250, 100, 230), "map"))
        .thing(pipes())
        .thing(machete())
        .thing(camera("mess.camera", 420, 90, "camera_small"))
}

fn status(text: Option<&str>) -> &str {
    text.unwrap_or("broken")
}

/// Life support pipes: broken, then replaced, then fixed, one strip of tape at a time.
fn pipes() -> Thing {
    let (x, y, w, h) = (200, 120, 180, 90);
    Thing::new("mess.pipes")
        .interact("broken", Interact::no_image(x, y, w, h))
        .interact("replaced", Interact::no_image(x, y, w, h))
        .interact("fixed", Interact::no_image(x, y, w, h))
        .initial("broken")
        .select_with(|view| Ok(Some(status(view.world.scene_text(NAME, LIFE_SUPPORT)?).to_string())))
        .describe_with(|view| {
            let text = match status(view.world.scene_text(NAME, LIFE_SUPPORT)?) {
                "broken" => "The pipes hiss and leak. This is part of the life support system.",
                "replaced" => "The pipes are taped up, but still leaking a little.",
                _ => "The pipes are sealed tight with duct tape.",
            };
            Ok(Some(text.to_string()))
        })
        .with_item("duct_tape", |ctx| {
            let (next, message) = match status(ctx.world.scene_text(NAME, LIFE_SUPPORT)?) {
                "broken" => (
                    "replaced",
                    "You tape over the worst of the leaks. The life support system wheezes a little less.",
                ),
                "replaced" => (
                    "fixed",
                    "A few more strips of tape and the pipes are sealed. Life support is fully operational.",
                ),
                _ => return Ok(InteractResult::message("The pipes are already sealed tight.").into()),
            };
            ctx.world.set_scene_data(NAME, LIFE_SUPPORT, next)?;
            ctx.set_interact(next)?;
            Ok(InteractResult::message(message).into())
        })
        .without(|_| Ok(InteractResult::message("You can feel air escaping from the pipes.").into()))
}

fn machete() -> Thing {
    Thing::new("mess.machete")
        .interact("machete", Interact::image(540, 110, "machete_hanging.png"))
        .gives("machete")
        .describe("A large machete hangs on the wall, as if it belongs there.")
        .without(|ctx| {
            ctx.take()?;
            Ok(InteractResult::message("You take the machete. It's surprisingly well balanced.").into())
        })
}
