//! `repl::pointer` module
//!
//! Handlers standing in for the mouse: clicks, pointer movement, animation
//! ticks and a textual dump of what would be drawn.

use crate::game::Game;
use crate::render::{DrawList, DrawOp};
use crate::repl::ReplControl;
use crate::spinners::SpinnerType;
use crate::style::GameStyle;

use anyhow::Result;
use colored::Colorize;
use log::info;
use sentence_data::Point;

/// Click at a scene position.
///
/// # Errors
/// Returns an error if a handler refers to content that doesn't exist.
pub fn click_handler(game: &mut Game, point: Point) -> Result<ReplControl> {
    let outcome = game.interact(point)?;
    if outcome.is_empty() {
        println!("{}", "Nothing happens.".dimmed());
    }
    if let Some(sound) = outcome.iter().find_map(|result| result.sound.as_deref()) {
        println!("{}", format!("*{sound}*").as_str().sound_style());
    }
    Ok(ReplControl::Continue)
}

/// Move the pointer and report what is under it.
///
/// # Errors
/// Returns an error if a description callback fails.
pub fn hover_handler(game: &mut Game, point: Point) -> Result<ReplControl> {
    game.mouse_move(point)?;
    let hover = game.hover();
    match (&hover.thing, &hover.description) {
        (Some(thing), Some(description)) => {
            println!("{} {}", thing.thing_style(), description.description_style());
        },
        (Some(thing), None) => println!("{}", thing.thing_style()),
        (None, _) => println!("{}", SpinnerType::NothingThere.spin().dimmed()),
    }
    let cursor = game.cursor_at(point)?;
    let highlight = if cursor.highlighted { " (highlighted)" } else { "" };
    println!(
        "{}",
        format!("cursor {} at {},{}{highlight}", cursor.image.name, cursor.top_left.x, cursor.top_left.y).dimmed()
    );
    Ok(ReplControl::Continue)
}

/// Advance animations by `ticks` frames.
pub fn tick_handler(game: &mut Game, ticks: u32) -> ReplControl {
    let changed = (0..ticks).filter(|_| game.animate()).count();
    info!("advanced {ticks} ticks, {changed} with visible changes");
    println!("{}", format!("{ticks} ticks, {changed} redraws").dimmed());
    ReplControl::Continue
}

/// Print every draw operation for the current frame.
///
/// # Errors
/// Returns an error if a backdrop callback fails.
pub fn draw_handler(game: &Game) -> Result<ReplControl> {
    let mut list = DrawList::new();
    game.draw(&mut list)?;
    for op in &list.ops {
        match op {
            DrawOp::Blit { image, at } => println!("blit {}/{} at {},{}", image.folder, image.name, at.x, at.y),
            DrawOp::Text { text, area, style } => {
                println!("text {:?} in {},{} {}x{} ({})", text, area.x, area.y, area.w, area.h, style.color);
            },
            DrawOp::Outline { rect, color } => {
                println!("outline {},{} {}x{} ({color})", rect.x, rect.y, rect.w, rect.h);
            },
        }
    }
    Ok(ReplControl::Continue)
}

/// Close the open detail view, if any.
///
/// # Errors
/// Returns an error if a leave hook fails.
pub fn close_handler(game: &mut Game) -> Result<ReplControl> {
    if game.world().detail_view().is_none() {
        println!("{}", "There's nothing to close.".dimmed());
    } else {
        game.close_detail()?;
        println!("Back to the {}.", game.world().active_scene().scene_style());
    }
    Ok(ReplControl::Continue)
}
