//! The root resolver.
//!
//! [`Game`] ties content, world state and sound together. It turns clicks,
//! inventory clicks, mouse movement and animation ticks into handler calls,
//! applies the resulting [`Outcome`]s and keeps the scene stack consistent:
//! one current scene plus at most one open detail view, until the game ends.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use sentence_data::{Point, SceneKind};

use crate::cursor::{CursorDraw, CursorSprite};
use crate::error::ContentError;
use crate::i18n::tr;
use crate::item::{ItemHolder, combine};
use crate::registry::Content;
use crate::render::{Surface, draw_background, draw_interact, lookup_debug_color};
use crate::resources::ResourceLookup;
use crate::result::{Message, Outcome};
use crate::sound::Sound;
use crate::thing::{Interaction, Thing, ThingView};
use crate::world::World;

/// What the pointer is over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    pub thing: Option<String>,
    pub description: Option<String>,
    /// The hovered thing would react to a click.
    pub highlight: bool,
}

#[derive(Debug)]
pub struct Game {
    content: Content,
    world: World,
    sound: Sound,
    messages: Vec<Message>,
    hover: Hover,
    debug_rects: bool,
}

/// First thing in `scene` containing `point`, in registration order.
fn hit_test<'c>(
    content: &'c Content,
    world: &World,
    scene: &str,
    point: Point,
    interactive_only: bool,
) -> Result<Option<&'c Thing>> {
    let tool = world.tool();
    for name in world.scene_things(scene)? {
        let thing = content.thing(name)?;
        if !thing.contains(world.thing_state(name)?, point) {
            continue;
        }
        if interactive_only && !thing.is_interactive(&ThingView { thing, world, tool })? {
            continue;
        }
        return Ok(Some(thing));
    }
    Ok(None)
}

impl Game {
    /// Start a session in the content's start scene.
    pub fn new(mut content: Content, resources: &dyn ResourceLookup, sound: Sound) -> Result<Self> {
        content.resolve_geometry(resources);
        let world = content.initial_world();
        let mut game = Self {
            content,
            world,
            sound,
            messages: Vec::new(),
            hover: Hover::default(),
            debug_rects: false,
        };
        let start = game.world.current_scene().to_string();
        game.enter_scene(&start)
            .with_context(|| format!("while entering start scene '{start}'"))?;
        info!("game started in '{start}'");
        Ok(game)
    }

    #[must_use]
    pub fn with_debug_rects(mut self, enabled: bool) -> Self {
        self.debug_rects = enabled;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sound(&self) -> &Sound {
        &self.sound
    }

    pub fn is_ended(&self) -> bool {
        self.world.is_ended()
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drain the message queue.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    // ----- input -----

    /// Resolve a click in the active scene.
    pub fn interact(&mut self, point: Point) -> Result<Outcome> {
        if self.world.is_ended() {
            debug!("click at {point:?} ignored: game over");
            return Ok(Outcome::none());
        }
        let scene = self.world.active_scene().to_string();
        let tool = self.world.tool().map(str::to_string);
        let Some(thing) = hit_test(&self.content, &self.world, &scene, point, true)? else {
            debug!("click at {point:?} in '{scene}' hit nothing");
            return Ok(Outcome::none());
        };
        let outcome = thing
            .dispatch(&mut Interaction {
                thing,
                world: &mut self.world,
                tool: tool.as_deref(),
            })
            .with_context(|| format!("while interacting with '{}'", thing.name()))?;
        self.apply(&outcome)?;
        Ok(outcome)
    }

    /// Click on an inventory item.
    ///
    /// With an empty hand the item becomes the tool. Otherwise the held tool is
    /// used on the clicked item.
    pub fn interact_inventory(&mut self, name: &str) -> Result<Outcome> {
        if self.world.is_ended() {
            return Ok(Outcome::none());
        }
        let target = self.content.item(name)?;
        if !self.world.inventory().contains_item(name) {
            return Err(ContentError::NotInInventory(name.to_string()).into());
        }
        let Some(tool) = self.world.tool().map(str::to_string) else {
            self.world.set_tool(Some(name))?;
            return Ok(Outcome::none());
        };
        if tool == name {
            return Ok(Outcome::none());
        }
        let tool_item = self.content.item(&tool)?;
        let outcome = combine(target, tool_item, &mut self.world)
            .with_context(|| format!("while combining '{tool}' with '{name}'"))?;
        self.apply(&outcome)?;
        Ok(outcome)
    }

    /// Track the pointer. Returns true if the description or highlight changed.
    pub fn mouse_move(&mut self, point: Point) -> Result<bool> {
        if self.world.is_ended() {
            return Ok(false);
        }
        let scene = self.world.active_scene();
        let interactive = hit_test(&self.content, &self.world, scene, point, true)?;
        let highlight = interactive.is_some();
        let hovered = match interactive {
            Some(thing) => Some(thing),
            None => hit_test(&self.content, &self.world, scene, point, false)?,
        };
        let description = match hovered {
            Some(thing) => thing
                .description(&ThingView {
                    thing,
                    world: &self.world,
                    tool: self.world.tool(),
                })?
                .map(|text| tr(&text)),
            None => None,
        };
        let hover = Hover {
            thing: hovered.map(|t| t.name().to_string()),
            description,
            highlight,
        };
        let changed = hover.description != self.hover.description || hover.highlight != self.hover.highlight;
        self.hover = hover;
        Ok(changed)
    }

    /// The cursor to draw with the pointer at `point`.
    pub fn cursor_at(&self, point: Point) -> Result<CursorDraw> {
        let hand = CursorSprite::hand();
        let sprite = match self.world.tool() {
            Some(tool) => self.content.item(tool)?.cursor_sprite(),
            None => &hand,
        };
        let highlighted = !self.world.is_ended()
            && hit_test(&self.content, &self.world, self.world.active_scene(), point, true)?.is_some();
        Ok(sprite.place(point, highlighted))
    }

    // ----- inventory -----

    pub fn add_inventory_item(&mut self, name: &str) -> Result<()> {
        Ok(self.world.add_inventory_item(name)?)
    }

    pub fn remove_inventory_item(&mut self, name: &str) -> Result<bool> {
        Ok(self.world.remove_inventory_item(name)?)
    }

    pub fn replace_inventory_item(&mut self, old: &str, new: &str) -> Result<bool> {
        Ok(self.world.replace_inventory_item(old, new)?)
    }

    pub fn set_tool(&mut self, name: Option<&str>) -> Result<()> {
        Ok(self.world.set_tool(name)?)
    }

    // ----- time -----

    /// Advance animations on screen by one tick. Returns true if anything needs redrawing.
    pub fn animate(&mut self) -> bool {
        let mut changed = false;
        for scene in self.world.displayed_scenes() {
            let members = match self.world.scene_things(&scene) {
                Ok(members) => members.to_vec(),
                Err(e) => {
                    warn!("animate: skipping scene '{scene}': {e}");
                    continue;
                },
            };
            for name in members {
                let thing = match self.content.thing(&name) {
                    Ok(thing) => thing,
                    Err(e) => {
                        warn!("animate: skipping '{name}' in '{scene}': {e}");
                        continue;
                    },
                };
                let state = match self.world.thing_state_mut(&name) {
                    Ok(state) => state,
                    Err(e) => {
                        warn!("animate: '{name}' has no state: {e}");
                        continue;
                    },
                };
                match thing.interact_named(&state.interact) {
                    Some(interact) if interact.is_animated() => changed |= interact.advance(&mut state.anim),
                    Some(_) => {},
                    None => warn!("animate: '{name}' shows unknown interact '{}'", state.interact),
                }
            }
        }
        changed
    }

    // ----- scene stack -----

    /// Leave the current scene (and any detail view) for another scene.
    pub fn change_scene(&mut self, name: &str) -> Result<()> {
        if self.world.scene_kind(name)? == SceneKind::DetailView {
            return Err(ContentError::NotAScene(name.to_string()).into());
        }
        self.close_detail()?;
        let old = self.world.current_scene().to_string();
        self.leave_scene(&old)
            .with_context(|| format!("while leaving '{old}'"))?;
        self.world.set_current_scene(name);
        self.enter_scene(name)
            .with_context(|| format!("while entering '{name}'"))?;
        info!("scene changed: '{old}' -> '{name}'");
        Ok(())
    }

    /// Open a detail view over the current scene, closing any open one first.
    pub fn show_detail(&mut self, name: &str) -> Result<()> {
        self.content.detail_view(name)?;
        if self.world.detail_view().is_some() {
            self.close_detail()?;
        }
        self.world.set_detail_view(Some(name));
        let scene = self.content.scene(name)?;
        scene.enter(&mut self.world, &mut self.sound)?;
        self.refresh_selectors()?;
        info!("detail view '{name}' opened");
        Ok(())
    }

    pub fn close_detail(&mut self) -> Result<()> {
        let Some(name) = self.world.detail_view().map(str::to_string) else {
            return Ok(());
        };
        let scene = self.content.scene(&name)?;
        scene.leave(&mut self.world, &mut self.sound)?;
        self.world.set_detail_view(None);
        info!("detail view '{name}' closed");
        Ok(())
    }

    fn leave_scene(&mut self, name: &str) -> Result<()> {
        let members = self.world.scene_things(name)?.to_vec();
        for thing_name in members {
            let thing = self.content.thing(&thing_name)?;
            thing.leave(&mut Interaction {
                thing,
                world: &mut self.world,
                tool: None,
            })?;
        }
        self.content.scene(name)?.leave(&mut self.world, &mut self.sound)
    }

    fn enter_scene(&mut self, name: &str) -> Result<()> {
        self.content.scene(name)?.enter(&mut self.world, &mut self.sound)?;
        self.refresh_selectors()
    }

    /// Let selector-driven things pick their interact from world state.
    fn refresh_selectors(&mut self) -> Result<()> {
        for scene in self.world.displayed_scenes() {
            let members = self.world.scene_things(&scene)?.to_vec();
            for name in members {
                let thing = self.content.thing(&name)?;
                if !thing.has_selector() {
                    continue;
                }
                let selected = thing.select(&ThingView {
                    thing,
                    world: &self.world,
                    tool: self.world.tool(),
                })?;
                if let Some(interact) = selected {
                    self.world.set_interact(&name, &interact)?;
                }
            }
        }
        Ok(())
    }

    /// Apply results in order, then any requested scene change.
    pub fn apply(&mut self, outcome: &Outcome) -> Result<()> {
        for result in outcome {
            if let Some(message) = result.to_message() {
                self.messages.push(Message {
                    text: tr(&message.text),
                    style: message.style,
                });
            }
            if let Some(sound) = &result.sound {
                self.sound.play_sound(sound);
            }
            if let Some(view) = &result.detail_view {
                self.show_detail(view)?;
            }
            if result.close_detail {
                self.close_detail()?;
            }
            if result.end_game {
                self.world.end_game();
            }
        }
        if let Some(scene) = self.world.take_pending_scene()
            && !self.world.is_ended()
        {
            self.change_scene(&scene)?;
        }
        self.refresh_selectors()
    }

    // ----- drawing -----

    /// Draw the current scene, then the open detail view on top.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        for scene_name in self.world.displayed_scenes() {
            let scene = self.content.scene(&scene_name)?;
            let background = scene.render_background(&self.world)?;
            draw_background(surface, &background, scene.get_offset());
            for (index, name) in self.world.scene_things(&scene_name)?.iter().enumerate() {
                let thing = self.content.thing(name)?;
                let state = self.world.thing_state(name)?;
                let Some(interact) = thing.interact_named(&state.interact) else {
                    continue;
                };
                draw_interact(surface, interact, &state.anim);
                if self.debug_rects {
                    let color = lookup_debug_color(thing.get_debug_index().unwrap_or(index));
                    for rect in interact.regions().iter().chain(&state.extra_regions) {
                        surface.outline(*rect, color);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::Interact;
    use crate::item::Item;
    use crate::render::{DrawList, DrawOp};
    use crate::resources::FixedResources;
    use crate::result::InteractResult;
    use crate::scene::Scene;
    use sentence_data::{DataBag, Size};

    fn content() -> Content {
        let hall = Scene::new("hall")
            .background("hall.png")
            .thing(
                Thing::new("hall.door")
                    .interact("door", Interact::no_image(0, 0, 50, 50))
                    .without(|ctx| {
                        ctx.world.change_scene("yard")?;
                        Ok(InteractResult::message("you leave").into())
                    }),
            )
            .thing(
                Thing::new("hall.lamp")
                    .interact("lamp", Interact::animated(100, 0, ["a.png", "b.png"], 0))
                    .describe("A lamp."),
            )
            .thing(
                Thing::new("hall.picture")
                    .interact("picture", Interact::no_image(200, 0, 50, 50))
                    .describe("A picture.")
                    .never_interactive(),
            )
            .thing(
                Thing::new("hall.button")
                    .interact("button", Interact::no_image(300, 0, 50, 50))
                    .without(|_| {
                        Ok(InteractResult::message("zoom")
                            .with_sound("beep.ogg")
                            .into())
                    })
                    .with_item("key", |_| Ok(InteractResult::detail_view("zoom").into()))
                    .with_default(|_| Ok(InteractResult::message("the end").ending_game().into())),
            )
            .item(Item::new("key", "key.png"))
            .item(Item::new("coin", "coin.png"));
        let yard = Scene::new("yard").thing(
            Thing::new("yard.gate")
                .interact("gate", Interact::no_image(0, 0, 50, 50))
                .without(|_| Ok(InteractResult::detail_view("zoom").into())),
        );
        let zoom = Scene::detail_view("zoom").thing(
            Thing::new("zoom.close")
                .interact("x", Interact::no_image(0, 0, 10, 10))
                .without(|_| Ok(InteractResult::close_detail().into())),
        );
        Content::build("hall", vec![hall, yard, zoom]).expect("valid content")
    }

    fn game() -> Game {
        Game::new(content(), &FixedResources::new(Size::new(20, 20)), Sound::disabled()).expect("game")
    }

    #[test]
    fn message_then_scene_change() {
        let mut game = game();
        let outcome = game.interact(Point::new(10, 10)).expect("click");
        assert_eq!(outcome.messages().collect::<Vec<_>>(), vec!["you leave"]);
        assert_eq!(game.world().current_scene(), "yard");
        assert_eq!(game.take_messages()[0].text, "you leave");
        assert!(game.messages().is_empty());
    }

    #[test]
    fn non_interactive_things_never_answer_clicks() {
        let mut game = game();
        assert!(game.interact(Point::new(210, 10)).expect("click").is_empty());
        game.add_inventory_item("key").expect("add");
        game.set_tool(Some("key")).expect("tool");
        assert!(game.interact(Point::new(210, 10)).expect("click").is_empty());
    }

    #[test]
    fn selecting_a_tool_deselects_the_previous_one() {
        let mut game = game();
        game.add_inventory_item("key").expect("add");
        game.add_inventory_item("coin").expect("add");
        game.interact_inventory("key").expect("select key");
        assert_eq!(game.world().tool(), Some("key"));
        game.set_tool(Some("coin")).expect("select coin");
        assert_eq!(game.world().tool(), Some("coin"));
        assert_eq!(game.world().inventory().items(), &["key", "coin"]);
    }

    #[test]
    fn only_one_detail_view_is_open() {
        let mut game = game();
        game.add_inventory_item("key").expect("add");
        game.set_tool(Some("key")).expect("tool");
        game.interact(Point::new(310, 10)).expect("open zoom");
        assert_eq!(game.world().detail_view(), Some("zoom"));
        game.show_detail("zoom").expect("reopen");
        assert_eq!(game.world().displayed_scenes(), vec!["hall".to_string(), "zoom".to_string()]);

        // clicks go to the detail view while it is open
        game.set_tool(None).expect("hand");
        game.interact(Point::new(5, 5)).expect("close");
        assert_eq!(game.world().detail_view(), None);
        assert!(game.show_detail("yard").is_err());
    }

    #[test]
    fn ended_game_ignores_input() {
        let mut game = game();
        game.add_inventory_item("coin").expect("add");
        game.set_tool(Some("coin")).expect("tool");
        let outcome = game.interact(Point::new(310, 10)).expect("click");
        assert!(outcome.ends_game());
        assert!(game.is_ended());

        let before = game.world().clone();
        assert!(game.interact(Point::new(10, 10)).expect("click").is_empty());
        assert!(game.interact_inventory("coin").expect("inventory").is_empty());
        assert!(!game.mouse_move(Point::new(110, 10)).expect("hover"));
        assert_eq!(game.world().current_scene(), before.current_scene());
    }

    #[test]
    fn hover_reports_changes_only() {
        let mut game = game();
        assert!(game.mouse_move(Point::new(110, 10)).expect("hover lamp"));
        assert_eq!(game.hover().description.as_deref(), Some("A lamp."));
        assert!(game.hover().highlight);
        assert!(!game.mouse_move(Point::new(111, 11)).expect("same lamp"));

        // description-only things describe but do not highlight
        assert!(game.mouse_move(Point::new(210, 10)).expect("hover picture"));
        assert_eq!(game.hover().description.as_deref(), Some("A picture."));
        assert!(!game.hover().highlight);
    }

    #[test]
    fn animation_marks_redraws() {
        let mut game = game();
        assert!(game.animate());
        assert_eq!(game.world().thing_state("hall.lamp").expect("lamp").anim.frame, 1);
    }

    #[test]
    fn animation_skips_things_the_content_lacks() {
        let mut game = game();
        game.world
            .declare_thing("hall", "hall.ghost", ["boo"], "boo", DataBag::new(), false);
        assert!(game.animate());
        assert_eq!(game.world().thing_state("hall.lamp").expect("lamp").anim.frame, 1);
        assert_eq!(game.world().thing_state("hall.ghost").expect("ghost").anim.ticks, 0);
    }

    #[test]
    fn draw_puts_things_over_background() {
        let game = game().with_debug_rects(true);
        let mut surface = DrawList::new();
        game.draw(&mut surface).expect("draw");
        assert_eq!(surface.images().collect::<Vec<_>>(), vec!["hall.png", "a.png"]);
        assert!(surface.ops.iter().any(|op| matches!(op, DrawOp::Outline { .. })));
    }

    #[test]
    fn cursor_follows_tool_and_highlight() {
        let mut game = game();
        let plain = game.cursor_at(Point::new(500, 500)).expect("cursor");
        assert_eq!(plain.image.name, "hand.png");
        assert!(!plain.highlighted);

        game.add_inventory_item("key").expect("add");
        game.set_tool(Some("key")).expect("tool");
        let held = game.cursor_at(Point::new(310, 10)).expect("cursor");
        assert_eq!(held.image.name, "key.png");
        assert!(held.highlighted);
        assert_eq!(held.top_left, Point::new(300, 0));
    }
}
