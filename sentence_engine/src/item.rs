//! Items and the inventory.
//!
//! Items have no place in a scene. They live in the player's inventory, can be
//! selected as the active tool, and can be combined with each other.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use log::debug;
use sentence_data::{ItemManifest, LinkDef, LinkKind};
use serde::{Deserialize, Serialize};

use crate::cursor::{CursorSprite, ITEM_FOLDER};
use crate::render::ImageRef;
use crate::resources::ResourceLookup;
use crate::result::Outcome;
use crate::world::World;

/// Handler run when this item is combined with another one.
pub type ItemHandler = Box<dyn Fn(&mut Combination<'_>) -> Result<Outcome>>;

/// Anything that holds items by name.
pub trait ItemHolder {
    /// Insert an item into the holder's contents.
    fn add_item(&mut self, name: &str);
    /// Remove an item from the holder's contents.
    fn remove_item(&mut self, name: &str);
    /// Return `true` when the holder already contains the given item.
    fn contains_item(&self, name: &str) -> bool;
}

/// The player's items in pickup order, plus the selected tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<String>,
    tool: Option<String>,
}

impl Inventory {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Put `new` in the slot held by `old`. Returns false if `old` is not held.
    ///
    /// Replacing the selected tool leaves the hand empty.
    pub fn replace(&mut self, old: &str, new: &str) -> bool {
        let Some(pos) = self.position(old) else {
            return false;
        };
        self.items[pos] = new.to_string();
        // `new` keeps old's slot; any earlier copy goes
        let mut index = 0;
        self.items.retain(|i| {
            let keep = index == pos || i != new;
            index += 1;
            keep
        });
        if self.tool.as_deref() == Some(old) {
            self.tool = None;
        }
        true
    }

    /// Select a held item as the tool, or clear the selection.
    pub(crate) fn select(&mut self, name: Option<&str>) {
        self.tool = name.filter(|n| self.contains_item(n)).map(str::to_string);
    }
}

impl ItemHolder for Inventory {
    fn add_item(&mut self, name: &str) {
        if !self.contains_item(name) {
            self.items.push(name.to_string());
        }
    }

    fn remove_item(&mut self, name: &str) {
        self.items.retain(|i| i != name);
        if self.tool.as_deref() == Some(name) {
            self.tool = None;
        }
    }

    fn contains_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }
}

/// Context passed to an item handler.
pub struct Combination<'a> {
    /// The item whose handler is running.
    pub item: &'a Item,
    /// The item it was combined with.
    pub other: &'a str,
    pub world: &'a mut World,
}

impl Combination<'_> {
    /// Swap the handler's own item for `new` in the inventory.
    pub fn replace_self(&mut self, new: &str) -> Result<bool> {
        Ok(self.world.replace_inventory_item(&self.item.name, new)?)
    }
}

/// A portable object.
pub struct Item {
    name: String,
    inventory_image: String,
    cursor: CursorSprite,
    with_item: BTreeMap<String, ItemHandler>,
    links: Vec<LinkDef>,
}

impl Item {
    /// The cursor defaults to the inventory image.
    pub fn new(name: impl Into<String>, inventory_image: impl Into<String>) -> Self {
        let inventory_image = inventory_image.into();
        Self {
            name: name.into(),
            cursor: CursorSprite::new(inventory_image.clone()),
            inventory_image,
            with_item: BTreeMap::new(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn cursor(mut self, cursor: CursorSprite) -> Self {
        self.cursor = cursor;
        self
    }

    /// Register what happens when `other` is used on this item.
    #[must_use]
    pub fn on_item<F>(mut self, other: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Combination<'_>) -> Result<Outcome> + 'static,
    {
        self.with_item.insert(other.into(), Box::new(handler));
        self
    }

    /// Declare a name the handlers refer to.
    #[must_use]
    pub fn link(mut self, kind: LinkKind, target: impl Into<String>) -> Self {
        self.links.push(LinkDef {
            kind,
            target: target.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inventory_image(&self) -> ImageRef {
        ImageRef::new(ITEM_FOLDER, &self.inventory_image)
    }

    pub fn cursor_sprite(&self) -> &CursorSprite {
        &self.cursor
    }

    pub fn handler_for(&self, other: &str) -> Option<&ItemHandler> {
        self.with_item.get(other)
    }

    pub(crate) fn resolve(&mut self, resources: &dyn ResourceLookup) {
        self.cursor.resolve(resources);
    }

    pub fn manifest(&self) -> ItemManifest {
        ItemManifest {
            name: self.name.clone(),
            handled_items: self.with_item.keys().cloned().collect(),
            links: self.links.clone(),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("inventory_image", &self.inventory_image)
            .field("cursor", &self.cursor)
            .field("with_item", &self.with_item.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Use `tool` on `target` in the inventory.
///
/// The target's handler for the tool wins; otherwise the tool's handler for the
/// target runs with the tool as its own item. With neither, nothing happens.
pub fn combine(target: &Item, tool: &Item, world: &mut World) -> Result<Outcome> {
    if let Some(handler) = target.handler_for(&tool.name) {
        debug!("combine: {} handles {}", target.name, tool.name);
        return handler(&mut Combination {
            item: target,
            other: &tool.name,
            world,
        });
    }
    if let Some(handler) = tool.handler_for(&target.name) {
        debug!("combine: {} handles {} (inverse)", tool.name, target.name);
        return handler(&mut Combination {
            item: tool,
            other: &target.name,
            world,
        });
    }
    debug!("combine: no handler for {} on {}", tool.name, target.name);
    Ok(Outcome::none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::InteractResult;
    use sentence_data::{DataBag, SceneKind};

    fn world_with(items: &[&str]) -> World {
        let mut world = World::new();
        world.declare_scene("cryo", SceneKind::Scene, DataBag::new());
        for item in items {
            world.declare_item(item);
        }
        world
    }

    fn fishbowl() -> Item {
        Item::new("fishbowl", "fishbowl.png").on_item("duct_tape", |ctx| {
            ctx.replace_self("helmet")?;
            Ok(InteractResult::message("taped").into())
        })
    }

    #[test]
    fn inventory_replace_keeps_slot() {
        let mut inventory = Inventory::default();
        inventory.add_item("a");
        inventory.add_item("b");
        inventory.add_item("c");
        assert!(inventory.replace("b", "x"));
        assert_eq!(inventory.items(), &["a", "x", "c"]);
        assert!(!inventory.replace("b", "y"));
    }

    #[test]
    fn replace_with_a_held_item_lands_in_the_old_slot() {
        let mut inventory = Inventory::default();
        inventory.add_item("helmet");
        inventory.add_item("machete");
        inventory.add_item("fishbowl");
        assert!(inventory.replace("fishbowl", "helmet"));
        assert_eq!(inventory.items(), &["machete", "helmet"]);
    }

    #[test]
    fn removing_the_tool_empties_the_hand() {
        let mut inventory = Inventory::default();
        inventory.add_item("machete");
        inventory.select(Some("machete"));
        inventory.remove_item("machete");
        assert_eq!(inventory.tool(), None);
    }

    #[test]
    fn target_handler_runs_first() {
        let mut world = world_with(&["fishbowl", "duct_tape", "helmet"]);
        world.add_inventory_item("fishbowl").expect("add");
        world.add_inventory_item("duct_tape").expect("add");
        let tape = Item::new("duct_tape", "duct_tape.png");

        let outcome = combine(&fishbowl(), &tape, &mut world).expect("combine");
        assert_eq!(outcome.messages().collect::<Vec<_>>(), vec!["taped"]);
        assert_eq!(world.inventory().items(), &["helmet", "duct_tape"]);
    }

    #[test]
    fn inverse_handler_runs_with_tool_as_self() {
        let mut world = world_with(&["fishbowl", "duct_tape", "helmet"]);
        world.add_inventory_item("fishbowl").expect("add");
        let tape = Item::new("duct_tape", "duct_tape.png");

        // fishbowl held as the tool, tape clicked
        let outcome = combine(&tape, &fishbowl(), &mut world).expect("combine");
        assert_eq!(outcome.len(), 1);
        assert!(world.inventory().contains_item("helmet"));
    }

    #[test]
    fn unrelated_items_do_nothing() {
        let mut world = world_with(&["a", "b"]);
        let outcome = combine(&Item::new("a", "a.png"), &Item::new("b", "b.png"), &mut world).expect("combine");
        assert!(outcome.is_empty());
    }
}
