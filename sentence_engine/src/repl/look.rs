//! Observation handlers.
//!
//! A terminal player can't see the screen, so `look` lists what the active
//! scene contains, with each thing's hit box and whether it would react.

use crate::game::Game;
use crate::repl::ReplControl;
use crate::style::GameStyle;
use crate::thing::ThingView;

use anyhow::Result;
use colored::Colorize;
use log::info;

/// Describe the active scene and the things in it.
///
/// # Errors
/// Returns an error if a description or predicate callback fails.
pub fn look_handler(game: &Game) -> Result<ReplControl> {
    let world = game.world();
    let content = game.content();
    let scene = world.active_scene();
    println!("{}", scene.scene_titlebar_style());
    if let Some(detail) = world.detail_view() {
        println!("{}", format!("(detail view over {})", world.current_scene()).dimmed());
        info!("player looked at detail view '{detail}'");
    } else {
        info!("player looked around '{scene}'");
    }

    for name in world.scene_things(scene)? {
        let thing = content.thing(name)?;
        let view = ThingView {
            thing,
            world,
            tool: world.tool(),
        };
        let marker = if thing.is_interactive(&view)? { "*" } else { "-" };
        let state = world.thing_state(name)?;
        let bounds = thing
            .interact_named(&state.interact)
            .map(|interact| interact.regions())
            .unwrap_or_default()
            .iter()
            .chain(&state.extra_regions)
            .map(|r| format!("{},{} {}x{}", r.x, r.y, r.w, r.h))
            .collect::<Vec<_>>()
            .join("; ");
        print!(" {marker} {} {}", name.as_str().thing_style(), format!("[{bounds}]").dimmed());
        match thing.description(&view)? {
            Some(text) => println!(": {}", text.description_style()),
            None => println!(),
        }
    }
    Ok(ReplControl::Continue)
}
