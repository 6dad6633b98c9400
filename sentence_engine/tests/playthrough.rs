use se::render::DrawList;
use se::resources::FixedResources;
use se::scenes::bridge::{CHAIR_DETAIL, COMPUTER};
use se::scenes::engine::ENGINE_ONLINE;
use se::scenes::mess::LIFE_SUPPORT;
use se::scenes::widgets::{AiStatus, ai_status, set_ai_status};
use se::scenes::{START_SCENE, build_content};
use se::sound::Sound;
use se::spinners::SpinnerType;
use se::*;
use sentence_engine as se;

fn new_game() -> Game {
    let content = build_content(START_SCENE).expect("content validates");
    Game::new(content, &FixedResources::new(Size::new(64, 64)), Sound::disabled()).expect("game starts")
}

fn drawn_texts(game: &Game) -> Vec<String> {
    let mut list = DrawList::new();
    game.draw(&mut list).expect("draw");
    list.texts().map(str::to_string).collect()
}

#[test]
fn starts_in_cryo_with_empty_inventory() {
    let game = new_game();
    assert_eq!(game.world().current_scene(), "cryo");
    assert!(game.world().inventory().is_empty());
    assert!(!game.is_ended());
}

#[test]
fn safe_needs_the_stethoscope() {
    let mut game = new_game();
    game.change_scene("crew_quarters").unwrap();

    let outcome = game.interact(Point::new(460, 250)).unwrap();
    assert_eq!(outcome.len(), 1);
    assert!(outcome.messages().next().unwrap().starts_with("The safe is locked."));

    game.add_inventory_item("stethoscope").unwrap();
    game.set_tool(Some("stethoscope")).unwrap();
    let outcome = game.interact(Point::new(460, 250)).unwrap();
    assert_eq!(outcome.len(), 2);
    assert!(game.world().thing_flag("crew.safe", "is_cracked").unwrap());
    assert_eq!(game.world().interact_of("crew.safe").unwrap(), "full_safe");
    assert_eq!(outcome.iter().nth(1).unwrap().style, MessageStyle::Jim);

    game.set_tool(None).unwrap();
    game.interact(Point::new(460, 250)).unwrap();
    assert!(game.world().inventory().contains_item("duct_tape"));
    assert_eq!(game.world().interact_of("crew.safe").unwrap(), "empty_safe");
}

#[test]
fn cracking_the_safe_is_quiet_once_jim_is_down() {
    let mut game = new_game();
    set_ai_status(game.world_mut(), AiStatus::Looping).unwrap();
    game.change_scene("crew_quarters").unwrap();
    game.add_inventory_item("stethoscope").unwrap();
    game.set_tool(Some("stethoscope")).unwrap();
    let outcome = game.interact(Point::new(460, 250)).unwrap();
    assert_eq!(outcome.len(), 1);
}

#[test]
fn jim_panel_shocks_while_the_ai_is_online() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    let outcome = game.interact(Point::new(520, 440)).unwrap();
    let messages: Vec<&str> = outcome.messages().collect();
    assert_eq!(messages[0], "You feel a shock from the panel.");
    assert!(messages[1].contains("You are not an authorized technician."));
    assert_eq!(game.world().interact_of("jim_panel").unwrap(), "closed");
}

#[test]
fn machete_opens_then_breaks_the_panel() {
    let mut game = new_game();
    set_ai_status(game.world_mut(), AiStatus::Looping).unwrap();
    game.change_scene("bridge").unwrap();
    game.add_inventory_item("machete").unwrap();
    game.set_tool(Some("machete")).unwrap();

    game.interact(Point::new(520, 440)).unwrap();
    assert_eq!(game.world().interact_of("jim_panel").unwrap(), "open");
    game.interact(Point::new(520, 440)).unwrap();
    assert_eq!(game.world().interact_of("jim_panel").unwrap(), "broken");
    assert_eq!(ai_status(game.world()).unwrap(), AiStatus::Dead);
}

#[test]
fn alerts_follow_ship_state() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    game.show_detail(COMPUTER).unwrap();
    let texts = drawn_texts(&game);
    assert!(texts.iter().any(|t| t == "Hull breach detected: Engine Room"));
    assert!(texts.iter().any(|t| t == "Engine Offline"));
    assert!(texts.iter().any(|t| t == "Life Support System: 20% operational"));
    assert!(!texts.iter().any(|t| t == "AI System Offline"));
}

#[test]
fn navigation_is_disabled_while_the_engine_is_offline() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    game.show_detail(COMPUTER).unwrap();
    game.interact(Point::new(250, 70)).unwrap();
    assert_eq!(game.world().scene_text(COMPUTER, "tab").unwrap(), Some("nav"));

    let texts = drawn_texts(&game);
    assert!(texts.iter().any(|t| t == "Engine Offline: Navigation Disabled"));
    assert!(!game.world().is_present("bridge_comp.nav_line2"));
}

#[test]
fn navigation_reports_marginal_life_support_once_the_engine_runs() {
    let mut game = new_game();
    game.add_inventory_item("superconductor").unwrap();
    game.add_inventory_item("duct_tape").unwrap();
    game.interact_inventory("duct_tape").unwrap();
    game.interact_inventory("superconductor").unwrap();
    game.set_tool(None).unwrap();

    game.change_scene("engine").unwrap();
    game.interact_inventory("taped_superconductor").unwrap();
    game.interact(Point::new(340, 330)).unwrap();
    assert!(game.world().scene_flag("engine", ENGINE_ONLINE).unwrap());

    game.change_scene("bridge").unwrap();
    game.interact(Point::new(400, 330)).unwrap();
    assert_eq!(game.world().detail_view(), Some(COMPUTER));
    game.interact(Point::new(250, 70)).unwrap();

    let texts = drawn_texts(&game);
    assert!(texts.iter().any(|t| t == "Life Support Marginal."));
    assert!(texts.iter().any(|t| t == "Destination locked to:"));
    assert!(!texts.iter().any(|t| t == "Engine Offline: Navigation Disabled"));
    assert!(!game.world().is_present("bridge_comp.nav_line1"));
    assert!(!game.world().is_present("bridge_comp.nav_line2"));
}

#[test]
fn changing_destination_ends_the_game() {
    let mut game = new_game();
    {
        let world = game.world_mut();
        set_ai_status(world, AiStatus::Dead).unwrap();
        world.set_scene_data("engine", "engine online", true).unwrap();
        world.set_scene_data("mess", LIFE_SUPPORT, "fixed").unwrap();
    }
    game.change_scene("bridge").unwrap();
    game.show_detail(COMPUTER).unwrap();
    game.interact(Point::new(250, 70)).unwrap();
    assert!(game.world().is_present("bridge_comp.nav_line2"));

    let outcome = game.interact(Point::new(100, 145)).unwrap();
    assert!(outcome.ends_game());
    assert!(game.is_ended());

    assert!(game.interact(Point::new(100, 145)).unwrap().is_empty());
    assert!(game.interact_inventory("machete").unwrap().is_empty());
}

#[test]
fn penal_colony_is_not_a_choice() {
    let mut game = new_game();
    {
        let world = game.world_mut();
        set_ai_status(world, AiStatus::Dead).unwrap();
        world.set_scene_data("engine", "engine online", true).unwrap();
        world.set_scene_data("mess", LIFE_SUPPORT, "fixed").unwrap();
    }
    game.change_scene("bridge").unwrap();
    game.show_detail(COMPUTER).unwrap();
    game.interact(Point::new(250, 70)).unwrap();
    let outcome = game.interact(Point::new(100, 105)).unwrap();
    assert!(!outcome.ends_game());
    assert!(!game.is_ended());
}

#[test]
fn holding_one_tool_at_a_time() {
    let mut game = new_game();
    game.add_inventory_item("machete").unwrap();
    game.add_inventory_item("stethoscope").unwrap();
    game.interact_inventory("machete").unwrap();
    assert_eq!(game.world().tool(), Some("machete"));
    game.set_tool(Some("stethoscope")).unwrap();
    assert_eq!(game.world().tool(), Some("stethoscope"));
    assert!(game.set_tool(Some("helmet")).is_err());
    assert_eq!(game.world().tool(), Some("stethoscope"));
}

#[test]
fn duct_tape_turns_the_fishbowl_into_a_helmet() {
    let mut game = new_game();
    game.add_inventory_item("fishbowl").unwrap();
    game.add_inventory_item("duct_tape").unwrap();
    game.interact_inventory("duct_tape").unwrap();
    let outcome = game.interact_inventory("fishbowl").unwrap();
    assert_eq!(outcome.len(), 1);
    let items = game.world().inventory().items();
    assert_eq!(items, ["helmet".to_string(), "duct_tape".to_string()]);
    assert_eq!(game.world().tool(), Some("duct_tape"));
}

#[test]
fn superconductor_leaves_the_chair_unpowered() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    game.interact(Point::new(140, 530)).unwrap();
    assert_eq!(game.world().detail_view(), Some(CHAIR_DETAIL));

    let outcome = game.interact(Point::new(170, 150)).unwrap();
    assert_eq!(outcome.len(), 2);
    assert!(game.world().inventory().contains_item("superconductor"));
    assert!(!game.world().thing_flag("bridge.massagechair_base", "contains_superconductor").unwrap());

    game.close_detail().unwrap();
    game.mouse_move(Point::new(140, 530)).unwrap();
    assert_eq!(
        game.hover().description.as_deref(),
        Some("The chair won't work any more, it has no power.")
    );
}

#[test]
fn set_interact_is_idempotent() {
    let mut game = new_game();
    let world = game.world_mut();
    world.set_interact("crew.safe", "full_safe").unwrap();
    let before = world.thing_state("crew.safe").unwrap().clone();
    world.set_interact("crew.safe", "full_safe").unwrap();
    assert_eq!(world.thing_state("crew.safe").unwrap(), &before);
    assert!(world.set_interact("crew.safe", "exploded").is_err());
}

#[test]
fn scenery_describes_but_never_reacts() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    game.mouse_move(Point::new(400, 50)).unwrap();
    assert_eq!(game.hover().thing.as_deref(), Some("bridge.wires"));
    assert!(!game.hover().highlight);
    assert!(game.interact(Point::new(400, 50)).unwrap().is_empty());
}

#[test]
fn taking_the_stethoscope_extends_the_skeleton() {
    let mut game = new_game();
    game.change_scene("bridge").unwrap();
    game.interact(Point::new(660, 190)).unwrap();
    assert!(game.world().inventory().contains_item("stethoscope"));
    assert!(!game.world().is_present("bridge.stethoscope"));
    assert!(!game.world().thing_state("bridge.skel").unwrap().extra_regions.is_empty());
    game.mouse_move(Point::new(660, 190)).unwrap();
    assert_eq!(game.hover().thing.as_deref(), Some("bridge.skel"));
    assert!(!game.hover().highlight);
}

#[test]
fn titanium_leg_breaks_the_cryo_chain() {
    let mut game = new_game();
    let chain = "It moves slightly and then stops. A chain on the other side is preventing it \
                 from opening completely.";

    game.interact(Point::new(100, 100)).unwrap();
    assert!(game.world().inventory().contains_item("titanium_leg"));

    game.add_inventory_item("machete").unwrap();
    game.interact_inventory("machete").unwrap();
    let outcome = game.interact(Point::new(500, 200)).unwrap();
    let refusal = outcome.messages().next().unwrap();
    assert!(SpinnerType::DoorRefusal.wedges().iter().any(|line| *line == refusal));
    assert_eq!(game.world().interact_of("cryo.door").unwrap(), "shut");

    game.set_tool(None).unwrap();
    let outcome = game.interact(Point::new(500, 200)).unwrap();
    assert_eq!(outcome.messages().collect::<Vec<_>>(), vec![chain]);
    assert_eq!(game.world().current_scene(), "cryo");

    game.interact_inventory("titanium_leg").unwrap();
    let outcome = game.interact(Point::new(500, 200)).unwrap();
    assert!(outcome.messages().next().unwrap().contains("the chain breaks and the door opens"));
    assert_eq!(game.world().interact_of("cryo.door").unwrap(), "open");

    game.set_tool(None).unwrap();
    assert!(game.interact(Point::new(500, 200)).unwrap().is_empty());
    assert_eq!(game.world().current_scene(), "map");
}

#[test]
fn only_the_taped_superconductor_starts_the_engine() {
    let mut game = new_game();
    game.change_scene("engine").unwrap();
    game.add_inventory_item("superconductor").unwrap();
    game.add_inventory_item("duct_tape").unwrap();

    game.interact_inventory("superconductor").unwrap();
    let outcome = game.interact(Point::new(340, 330)).unwrap();
    assert!(outcome.messages().next().unwrap().starts_with("The bare superconductor sparks and shorts out"));
    assert!(!game.world().scene_flag("engine", ENGINE_ONLINE).unwrap());
    assert_eq!(game.world().interact_of("engine.socket").unwrap(), "empty");

    // taping the held superconductor empties the hand
    game.interact_inventory("duct_tape").unwrap();
    assert_eq!(game.world().tool(), None);
    game.interact_inventory("taped_superconductor").unwrap();
    let outcome = game.interact(Point::new(340, 330)).unwrap();
    assert_eq!(
        outcome.messages().collect::<Vec<_>>(),
        vec!["The superconductor slides into place. Deep below, the engines rumble back to life."]
    );
    assert!(game.world().scene_flag("engine", ENGINE_ONLINE).unwrap());
    assert_eq!(game.world().interact_of("engine.socket").unwrap(), "connected");
    assert!(!game.world().inventory().contains_item("taped_superconductor"));
    assert_eq!(game.world().tool(), None);
}

#[test]
fn duct_tape_fixes_the_pipes_in_two_passes() {
    let mut game = new_game();
    game.change_scene("mess").unwrap();
    game.add_inventory_item("duct_tape").unwrap();
    game.interact_inventory("duct_tape").unwrap();
    assert_eq!(game.world().interact_of("mess.pipes").unwrap(), "broken");

    let outcome = game.interact(Point::new(250, 150)).unwrap();
    assert!(outcome.messages().next().unwrap().starts_with("You tape over the worst of the leaks."));
    assert_eq!(game.world().scene_text("mess", LIFE_SUPPORT).unwrap(), Some("replaced"));
    assert_eq!(game.world().interact_of("mess.pipes").unwrap(), "replaced");

    let outcome = game.interact(Point::new(250, 150)).unwrap();
    assert!(outcome.messages().next().unwrap().starts_with("A few more strips of tape"));
    assert_eq!(game.world().scene_text("mess", LIFE_SUPPORT).unwrap(), Some("fixed"));
    assert_eq!(game.world().interact_of("mess.pipes").unwrap(), "fixed");

    let outcome = game.interact(Point::new(250, 150)).unwrap();
    assert_eq!(outcome.messages().collect::<Vec<_>>(), vec!["The pipes are already sealed tight."]);
    assert_eq!(game.world().interact_of("mess.pipes").unwrap(), "fixed");

    game.mouse_move(Point::new(250, 150)).unwrap();
    assert_eq!(
        game.hover().description.as_deref(),
        Some("The pipes are sealed tight with duct tape.")
    );
}

#[test]
fn escher_poster_sends_the_cameras_looping() {
    let mut game = new_game();
    game.change_scene("crew_quarters").unwrap();
    game.interact(Point::new(40, 180)).unwrap();
    assert!(game.world().inventory().contains_item("escher_poster"));
    assert!(!game.world().is_present("crew.poster"));

    game.interact_inventory("escher_poster").unwrap();
    let outcome = game.interact(Point::new(100, 110)).unwrap();
    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.iter().next().unwrap().style, MessageStyle::Jim);
    assert_eq!(ai_status(game.world()).unwrap(), AiStatus::Looping);
    assert_eq!(game.world().interact_of("crew.camera").unwrap(), "looping");
    assert!((0..16).filter(|_| game.animate()).count() >= 1);

    // JIM is already stuck, so a second showing does nothing
    assert!(game.interact(Point::new(100, 110)).unwrap().is_empty());

    game.change_scene("mess").unwrap();
    assert_eq!(game.world().interact_of("mess.camera").unwrap(), "looping");
}

#[test]
fn taped_superconductor_keeps_its_inventory_slot() {
    let mut game = new_game();
    game.add_inventory_item("machete").unwrap();
    game.add_inventory_item("superconductor").unwrap();
    game.add_inventory_item("duct_tape").unwrap();

    game.interact_inventory("duct_tape").unwrap();
    let outcome = game.interact_inventory("superconductor").unwrap();
    assert!(outcome.messages().next().unwrap().starts_with("You rip off a piece of duct tape"));
    let items = game.world().inventory().items();
    assert_eq!(items, ["machete", "taped_superconductor", "duct_tape"].map(String::from));
    assert_eq!(game.world().tool(), Some("duct_tape"));
}
