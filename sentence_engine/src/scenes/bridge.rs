//! Bridge where the final showdown with the AI occurs, plus its two detail
//! views: the captain's chair and the main computer.

use anyhow::Result;
use sentence_data::{LinkKind, Point, Value};

use crate::cursor::CursorSprite;
use crate::i18n::tr;
use crate::interact::{Interact, make_reversible_list};
use crate::item::Item;
use crate::render::{Background, TextStyle};
use crate::result::{InteractResult, Outcome};
use crate::scene::{Scene, SceneView};
use crate::spinners::SpinnerType;
use crate::thing::{Interaction, Thing};
use crate::world::World;

use super::engine::{self, ENGINE_ONLINE};
use super::mess::{self, LIFE_SUPPORT};
use super::widgets::{AI_STATUS, AiStatus, BRIDGE, PLAYER_ID, ai_status, camera, door, generic_desc_thing, jim_dialog, set_ai_status};

pub const CHAIR_DETAIL: &str = "chair_detail";
pub const COMPUTER: &str = "bridge_comp_detail";

const AI_PANEL: &str = "ai panel";
const CHAIR_BASE: &str = "bridge.massagechair_base";
const SKELETON: &str = "bridge.skel";
const BEEP: &str = "beep550.ogg";

const MUSIC: &[&str] = &[
    "beep1.ogg",
    "beep2.ogg",
    "beep880.ogg",
    "beep660.ogg",
    "beep3.ogg",
    "silent.ogg",
    "creaking.ogg",
    "silent.ogg",
];

pub fn scene() -> Scene {
    Scene::new(BRIDGE)
        .background("bridge.png")
        .offset(0, -50)
        .data(AI_STATUS, AiStatus::Online.as_str())
        .data(AI_PANEL, "closed")
        .item(Item::new("superconductor", "superconductor_fixed.png").on_item("duct_tape", |combo| {
            combo.replace_self("taped_superconductor")?;
            Ok(InteractResult::message(
                "You rip off a piece of duct tape and stick it on the superconductor. It almost \
                 sticks to itself, but you successfully avoid disaster.",
            )
            .into())
        }))
        .item(
            Item::new("taped_superconductor", "superconductor_taped.png")
                .cursor(CursorSprite::new("superconductor_taped_cursor.png")),
        )
        .item(Item::new("stethoscope", "stethoscope.png"))
        .thing(door("bridge.to_map", (707, 344, 84, 245), "map"))
        .thing(camera("bridge.camera", 33, 192, "camera_small"))
        .thing(massage_chair())
        .thing(massage_chair_base())
        .thing(stethoscope())
        .thing(computer())
        .thing(blinking_lights(
            "bridge.lights.1",
            176,
            337,
            ["bridge_lights_1_1.png", "bridge_lights_1_2.png", "bridge_lights_1_3.png", "bridge_lights_1_2.png"],
        ))
        .thing(blinking_lights(
            "bridge.lights.2",
            559,
            332,
            ["bridge_lights_2_1.png", "bridge_lights_2_2.png", "bridge_lights_2_3.png", "bridge_lights_2_2.png"],
        ))
        .thing(jim_panel())
        .thing(star_field())
        .thing(generic_desc_thing(
            "bridge.wires",
            1,
            "The brightly coloured wires contrast with the drab walls.",
            &[(46, 4, 711, 143)],
        ))
        .thing(generic_desc_thing(
            "bridge.note",
            2,
            "\"Dammit JIM, I'm a doctor, not an engineer!\"",
            &[(491, 494, 194, 105), (422, 533, 71, 66)],
        ))
        .thing(generic_desc_thing(
            SKELETON,
            3,
            "A skeleton hangs improbably from the wires.",
            &[(632, 148, 40, 29), (683, 176, 30, 101), (652, 274, 45, 96), (639, 180, 11, 95)],
        ))
        .on_enter(|ctx| {
            let playlist = ctx.sound.get_playlist(MUSIC, true, true);
            ctx.sound.change_playlist(Some(playlist));
            Ok(())
        })
        .on_leave(|ctx| {
            ctx.sound.change_playlist(None);
            Ok(())
        })
}

fn computer() -> Thing {
    Thing::new("bridge.comp")
        .interact("screen", Interact::no_image(338, 296, 123, 74))
        .link(LinkKind::DetailView, COMPUTER)
        .describe("The main bridge computer screen.")
        .without(|_| Ok(InteractResult::detail_view(COMPUTER).into()))
        .with_item("titanium_leg", |_| {
            Ok(InteractResult::message("You can't break the duraplastic screen.").into())
        })
        .with_item("machete", |_| Ok(InteractResult::message("Scratching the screen won't help you.").into()))
}

fn chair_description(world: &World) -> Result<Option<String>> {
    let text = if world.thing_flag(CHAIR_BASE, "contains_superconductor")? {
        "A top of the line Massage-o-Matic Captain's Executive Command Chair. It's massaging a skeleton."
    } else {
        "The chair won't work any more, it has no power."
    };
    Ok(Some(text.to_string()))
}

/// The captain's massage chair. Only the base reacts to clicks.
fn massage_chair() -> Thing {
    Thing::new("bridge.massagechair")
        .interact(
            "chair",
            Interact::rect_union(&[
                (148, 418, 77, 68),
                (69, 363, 80, 156),
                (104, 514, 18, 40),
                (147, 487, 106, 32),
                (220, 518, 83, 49),
                (196, 502, 75, 34),
                (207, 534, 69, 51),
            ]),
        )
        .link(LinkKind::Thing, CHAIR_BASE)
        .describe_with(|view| chair_description(view.world))
        .never_interactive()
}

fn massage_chair_base() -> Thing {
    Thing::new(CHAIR_BASE)
        .interact("chair", Interact::no_image(127, 518, 69, 64))
        .data("contains_superconductor", true)
        .link(LinkKind::DetailView, CHAIR_DETAIL)
        .describe_with(|view| chair_description(view.world))
        .without(|_| Ok(InteractResult::detail_view(CHAIR_DETAIL).into()))
}

/// Stethoscope on the doctor. Taking it leaves its outline to the skeleton.
fn stethoscope() -> Thing {
    Thing::new("bridge.stethoscope")
        .interact("stethoscope", Interact::image(650, 178, "hanging_stethoscope.png"))
        .gives("stethoscope")
        .link(LinkKind::Thing, SKELETON)
        .describe("A stethoscope hangs from the neck of the skeleton.")
        .without(|ctx| {
            let regions = ctx.regions()?;
            ctx.take()?;
            for rect in regions {
                ctx.world.extend_region(SKELETON, rect)?;
            }
            Ok(InteractResult::message(
                "You pick up the stethoscope and verify that the doctor's heart has stopped. \
                 Probably a while ago.",
            )
            .into())
        })
}

fn star_field() -> Thing {
    let frames = make_reversible_list(&["stars_1.png", "stars_2.png", "stars_3.png"]);
    Thing::new("bridge.stars")
        .interact("stars", Interact::animated(190, 145, frames, 30))
        .never_interactive()
}

/// Console lights. Each visit rolls a new description.
fn blinking_lights(name: &str, x: i32, y: i32, frames: [&str; 4]) -> Thing {
    Thing::new(name)
        .interact("lights", Interact::animated(x, y, frames, 5))
        .data("description", SpinnerType::BlinkingLights.spin())
        .never_interactive()
        .describe_with(|view| Ok(view.data("description")?.and_then(Value::as_text).map(str::to_string)))
        .on_leave(|ctx| ctx.set_data("description", SpinnerType::BlinkingLights.spin()))
}

// ----- JIM's panel -----

fn panel_state(world: &World) -> Result<String> {
    Ok(world.scene_text(BRIDGE, AI_PANEL)?.unwrap_or("closed").to_string())
}

fn set_panel(ctx: &mut Interaction<'_>, state: &str) -> Result<()> {
    ctx.world.set_scene_data(BRIDGE, AI_PANEL, state)?;
    ctx.set_interact(state)
}

fn shock(world: &World) -> Result<Outcome> {
    let dialog = jim_dialog(
        world,
        format!("Prisoner {PLAYER_ID}. Please step away from the panel. You are not an authorized technician."),
    )?;
    Ok(Outcome::from(InteractResult::message("You feel a shock from the panel.")).and(dialog))
}

/// The panel to JIM's internals.
fn jim_panel() -> Thing {
    Thing::new("jim_panel")
        .interact("closed", Interact::no_image(506, 430, 137, 47))
        .interact("open", Interact::image(500, 427, "jim_panel_open.png"))
        .interact("broken", Interact::image(488, 412, "jim_panel_destroyed.png"))
        .initial("closed")
        .select_with(|view| panel_state(view.world).map(Some))
        .describe_with(|view| {
            Ok((panel_state(view.world)? == "closed")
                .then(|| "The sign reads 'Warning: Authorized Techinicians Only'.".to_string()))
        })
        .without(|ctx| {
            if ai_status(ctx.world)? == AiStatus::Online {
                return shock(ctx.world);
            }
            match panel_state(ctx.world)?.as_str() {
                "closed" => Ok(InteractResult::message("You are unable to open the panel with your bare hands.").into()),
                "open" => {
                    set_panel(ctx, "broken")?;
                    set_ai_status(ctx.world, AiStatus::Dead)?;
                    Ok(InteractResult::message("You unplug various important-looking wires.").into())
                },
                _ => Ok(Outcome::none()),
            }
        })
        .with_item("machete", |ctx| {
            if ai_status(ctx.world)? == AiStatus::Online {
                return shock(ctx.world);
            }
            match panel_state(ctx.world)?.as_str() {
                "closed" => {
                    set_panel(ctx, "open")?;
                    Ok(InteractResult::message("Using the machete, you lever the panel off.").into())
                },
                "open" => {
                    set_panel(ctx, "broken")?;
                    set_ai_status(ctx.world, AiStatus::Dead)?;
                    Ok(InteractResult::message("You smash various delicate components with the machete.").into())
                },
                _ => Ok(Outcome::none()),
            }
        })
        .with_default(|ctx| {
            if ai_status(ctx.world)? == AiStatus::Online {
                return shock(ctx.world);
            }
            Ok(Outcome::none())
        })
}

// ----- chair detail -----

pub fn chair_detail() -> Scene {
    Scene::detail_view(CHAIR_DETAIL)
        .folder(BRIDGE)
        .background("chair_detail.png")
        .thing(superconductor())
}

/// Superconductor from the massage chair.
fn superconductor() -> Thing {
    Thing::new("bridge.superconductor")
        .interact("superconductor", Interact::image(158, 138, "superconductor.png"))
        .gives("superconductor")
        .link(LinkKind::Thing, CHAIR_BASE)
        .without(|ctx| {
            ctx.world.set_thing_data(CHAIR_BASE, "contains_superconductor", false)?;
            ctx.take()?;
            let dialog = jim_dialog(
                ctx.world,
                format!(
                    "Prisoner {PLAYER_ID}. That chair you've destroyed was property of the ship's \
                     captain. You will surely be punished."
                ),
            )?;
            Ok(Outcome::from(InteractResult::message("The superconductor module unclips easily.")).and(dialog))
        })
}

// ----- computer detail -----

const ALERT_BASE: &str = "comp_alert_base.png";
const LOG_BACKGROUND: &str = "comp_log_start.png";
const NAVIGATION: &str = "bridge_nav_base.png";

const ALERT_OFFSET: Point = Point::new(16, 100);
const ALERT_SPACING: i32 = 4;
const LINE_SIZE: (i32, i32) = (600, 25);

const LOGS: &[&str] = &["<Error: Log corrupted. Unable to open Log>"];

const NAV_ENGINE_OFFLINE: &[&str] = &["Engine Offline: Navigation Disabled"];
const NAV_LIFE_SUPPORT: &[&str] = &[
    "Life Support Marginal.",
    "Emergency Navigation Protocol Engaged.",
    "",
    "Destination locked to:",
    "Bounty Penal Colony Space Port, New South Australia",
];

/// Destination lines: number, top edge, whether JIM blocks it, text.
const DESTINATIONS: [(usize, i32, bool, &str); 5] = [
    (1, 99, false, "1. Bounty Penal Colony Space Port, New South Australia (397 days)"),
    (2, 135, true, "2. Hedonia Space Station (782 days)"),
    (3, 167, true, "3. Spinosa Health Resort, Prunus Secundus (1231 days)"),
    (4, 203, true, "4. Achene Space Port, Indica Prspinosame (1621 days)"),
    (5, 239, true, "5. Opioid Space Port, Gelatinosa Prime (1963 days)"),
];

fn nav_line_name(number: usize) -> String {
    format!("bridge_comp.nav_line{number}")
}

fn current_tab(world: &World) -> Result<String> {
    Ok(world.scene_text(COMPUTER, "tab")?.unwrap_or("alert").to_string())
}

fn engine_online(world: &World) -> Result<bool> {
    Ok(world.scene_flag(engine::NAME, ENGINE_ONLINE)?)
}

fn life_support(world: &World) -> Result<String> {
    Ok(world.scene_text(mess::NAME, LIFE_SUPPORT)?.unwrap_or_default().to_string())
}

/// Destination lines are part of the screen only while the destination list is shown.
fn sync_nav_lines(world: &mut World) -> Result<()> {
    let show = current_tab(world)? == "nav" && engine_online(world)? && life_support(world)? == "fixed";
    for (number, ..) in DESTINATIONS {
        let name = nav_line_name(number);
        if show {
            world.restore_thing(&name)?;
        } else {
            world.remove_thing(&name)?;
        }
    }
    Ok(())
}

pub fn computer_detail() -> Scene {
    let mut detail = Scene::detail_view(COMPUTER)
        .folder(BRIDGE)
        .background(ALERT_BASE)
        .data("tab", "alert")
        .data("log page", 0_i64)
        .data("max page", i64::try_from(LOGS.len()).unwrap_or(i64::MAX))
        .link(LinkKind::Scene, engine::NAME)
        .link(LinkKind::Scene, mess::NAME)
        .thing(tab("bridge_comp.screen", "log", "log tab", (100, 53, 94, 37), "Logs", "lightgreen"))
        .thing(tab("bridge_comp.alert_tab", "alert", "alert tab", (12, 53, 88, 37), "Alerts", "orange"))
        .thing(tab("bridge_comp.nav_tab", "nav", "nav tab", (197, 53, 126, 37), "Navigation", "darkblue"));
    for (number, top, ai_blocked, text) in DESTINATIONS {
        detail = detail.thing(nav_line(number, top, ai_blocked, text));
    }
    detail
        .on_enter(|ctx| {
            ctx.sound.stash_playlist(COMPUTER);
            sync_nav_lines(ctx.world)
        })
        .on_leave(|ctx| {
            ctx.sound.restore_playlist(COMPUTER);
            Ok(())
        })
        .backdrop(computer_backdrop)
}

fn tab(name: &str, key: &'static str, interact: &str, rect: (i32, i32, i32, i32), label: &str, color: &str) -> Thing {
    let (x, y, w, h) = rect;
    Thing::new(name)
        .interact(
            interact,
            Interact::text(x, y, w, h, label, TextStyle::new(color, 20).centred()),
        )
        .interactive_when(move |view| Ok(current_tab(view.world)? != key))
        .without(move |ctx| {
            ctx.world.set_scene_data(COMPUTER, "tab", key)?;
            sync_nav_lines(ctx.world)?;
            Ok(InteractResult::sound(BEEP).into())
        })
}

fn nav_line(number: usize, top: i32, ai_blocked: bool, text: &str) -> Thing {
    let (w, h) = (610, 25);
    Thing::new(nav_line_name(number))
        .interact("line", Interact::text(12, top, w, h, text, TextStyle::new("darkblue", 16)))
        .dormant()
        .debug_index(number)
        .interactive_when(|view| Ok(current_tab(view.world)? == "nav"))
        .without(move |ctx| {
            let status = ai_status(ctx.world)?;
            if status == AiStatus::Online {
                return Ok(Outcome::from(jim_dialog(
                    ctx.world,
                    "You are not authorized to change the destination.",
                )?));
            }
            if !ai_blocked {
                return Ok(
                    InteractResult::message("There's no good reason to choose to go to the penal colony.").into(),
                );
            }
            match status {
                AiStatus::Looping => Ok(InteractResult::message(
                    "You could change the destination, but when JIM recovers, it'll just get reset.",
                )
                .into()),
                AiStatus::Dead => Ok(InteractResult::message("You change the destination.")
                    .with_sound(BEEP)
                    .ending_game()
                    .into()),
                AiStatus::Online => Ok(Outcome::none()),
            }
        })
}

fn text_lines(background: &mut Background, texts: &[&str], color: &str) {
    let translated: Vec<String> = texts.iter().map(|text| tr(text)).collect();
    background.push_lines(
        translated.iter().map(String::as_str),
        ALERT_OFFSET,
        LINE_SIZE,
        ALERT_SPACING,
        &TextStyle::new(color, 18),
    );
}

fn computer_backdrop(view: &SceneView<'_>) -> Result<Background> {
    let world = view.world;
    match current_tab(world)?.as_str() {
        "log" => {
            let page = world.scene_data(COMPUTER, "log page")?.and_then(Value::as_int).unwrap_or(0);
            let text = usize::try_from(page).ok().and_then(|p| LOGS.get(p)).copied().unwrap_or_default();
            let mut background = Background::image(BRIDGE, LOG_BACKGROUND);
            text_lines(&mut background, &[text], "lightgreen");
            Ok(background)
        },
        "nav" => {
            let mut background = Background::image(BRIDGE, NAVIGATION);
            if !engine_online(world)? {
                text_lines(&mut background, NAV_ENGINE_OFFLINE, "darkblue");
            } else if life_support(world)? != "fixed" {
                text_lines(&mut background, NAV_LIFE_SUPPORT, "darkblue");
            }
            Ok(background)
        },
        _ => {
            let mut background = Background::image(BRIDGE, ALERT_BASE);
            text_lines(&mut background, &alerts(world)?, "orange");
            Ok(background)
        },
    }
}

/// Active alerts, most serious first.
fn alerts(world: &World) -> Result<Vec<&'static str>> {
    let mut alerts = vec!["Hull breach detected: Engine Room"];
    match ai_status(world)? {
        AiStatus::Looping => alerts.push("AI Status: 3D scene reconstruction failed. Recovery in progress"),
        AiStatus::Dead => alerts.push("AI System Offline"),
        AiStatus::Online => {},
    }
    if !engine_online(world)? {
        alerts.push("Engine Offline");
    }
    match life_support(world)?.as_str() {
        "broken" => alerts.push("Life Support System: 20% operational"),
        "replaced" => alerts.push("Life Support System: 40% operational"),
        _ => {},
    }
    Ok(alerts)
}
