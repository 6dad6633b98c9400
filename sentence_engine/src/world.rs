//! Mutable game state.
//!
//! [`World`] owns everything that changes during play: data bags, the active
//! interact of every thing, scene membership, the inventory and the scene
//! stack. Definitions (handlers, geometry) live in [`crate::registry::Content`]
//! and never change, which lets a handler borrow its own definition while it
//! mutates the world.
//!
//! All lookups are by name. An unknown name is an authoring error and comes
//! back as a [`ContentError`].

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use sentence_data::{DataBag, Rect, SceneKind, Value};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::interact::AnimCursor;
use crate::item::{Inventory, ItemHolder};

/// Flag scope of a scene's data bag.
pub fn scene_scope(scene: &str) -> String {
    format!("scene:{scene}")
}

/// Flag scope of a thing's data bag.
pub fn thing_scope(thing: &str) -> String {
    format!("thing:{thing}")
}

/// Every data bag in the game, keyed by scope.
///
/// Reading a key that was never set yields a falsy value; reading from a scope
/// that was never declared is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagStore {
    scopes: BTreeMap<String, DataBag>,
}

impl FlagStore {
    /// Register a scope with its initial contents. Re-declaring replaces the bag.
    pub fn declare(&mut self, scope: impl Into<String>, initial: DataBag) {
        self.scopes.insert(scope.into(), initial);
    }

    fn bag(&self, scope: &str) -> Result<&DataBag, ContentError> {
        self.scopes
            .get(scope)
            .ok_or_else(|| ContentError::UnknownScope(scope.to_string()))
    }

    pub fn get(&self, scope: &str, key: &str) -> Result<Option<&Value>, ContentError> {
        Ok(self.bag(scope)?.get(key))
    }

    pub fn set(&mut self, scope: &str, key: &str, value: impl Into<Value>) -> Result<(), ContentError> {
        let bag = self
            .scopes
            .get_mut(scope)
            .ok_or_else(|| ContentError::UnknownScope(scope.to_string()))?;
        bag.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Truthiness of a flag; missing keys are false.
    pub fn flag(&self, scope: &str, key: &str) -> Result<bool, ContentError> {
        Ok(self.get(scope, key)?.is_some_and(Value::is_truthy))
    }

    /// Integer value of a flag; missing or non-integer keys read as 0.
    pub fn int(&self, scope: &str, key: &str) -> Result<i64, ContentError> {
        Ok(self.get(scope, key)?.and_then(Value::as_int).unwrap_or(0))
    }

    pub fn text(&self, scope: &str, key: &str) -> Result<Option<&str>, ContentError> {
        Ok(self.get(scope, key)?.and_then(Value::as_text))
    }

    pub fn scopes(&self) -> impl Iterator<Item = (&str, &DataBag)> {
        self.scopes.iter().map(|(scope, bag)| (scope.as_str(), bag))
    }
}

/// Runtime state of one thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingState {
    /// Name of the active interact.
    pub interact: String,
    pub anim: AnimCursor,
    /// Rectangles added to the hit region at runtime.
    pub extra_regions: Vec<Rect>,
}

/// Names the world accepts, filled in when content is registered.
#[derive(Debug, Clone, Default)]
struct Catalog {
    scenes: BTreeMap<String, SceneKind>,
    items: BTreeSet<String>,
    interacts: BTreeMap<String, BTreeSet<String>>,
}

/// Complete mutable state of a play session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub flags: FlagStore,
    things: BTreeMap<String, ThingState>,
    /// Present things of each scene, in registration order.
    members: BTreeMap<String, Vec<String>>,
    owners: BTreeMap<String, String>,
    inventory: Inventory,
    current_scene: String,
    detail_view: Option<String>,
    pending_scene: Option<String>,
    ended: bool,
    #[serde(skip)]
    catalog: Catalog,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- registration -----

    pub(crate) fn declare_scene(&mut self, name: &str, kind: SceneKind, data: DataBag) {
        self.catalog.scenes.insert(name.to_string(), kind);
        self.members.entry(name.to_string()).or_default();
        self.flags.declare(scene_scope(name), data);
    }

    /// Register a thing. A dormant thing belongs to `scene` but is not present until restored.
    pub(crate) fn declare_thing<'a>(
        &mut self,
        scene: &str,
        name: &str,
        interacts: impl IntoIterator<Item = &'a str>,
        initial: &str,
        data: DataBag,
        dormant: bool,
    ) {
        self.catalog
            .interacts
            .insert(name.to_string(), interacts.into_iter().map(str::to_string).collect());
        self.things.insert(
            name.to_string(),
            ThingState {
                interact: initial.to_string(),
                ..ThingState::default()
            },
        );
        self.owners.insert(name.to_string(), scene.to_string());
        if !dormant {
            self.members.entry(scene.to_string()).or_default().push(name.to_string());
        }
        self.flags.declare(thing_scope(name), data);
    }

    pub(crate) fn declare_item(&mut self, name: &str) {
        self.catalog.items.insert(name.to_string());
    }

    // ----- scenes -----

    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    pub fn detail_view(&self) -> Option<&str> {
        self.detail_view.as_deref()
    }

    /// The scene clicks go to: the open detail view, else the current scene.
    pub fn active_scene(&self) -> &str {
        self.detail_view.as_deref().unwrap_or(&self.current_scene)
    }

    /// Scenes on screen, bottom first.
    pub fn displayed_scenes(&self) -> Vec<String> {
        let mut scenes = vec![self.current_scene.clone()];
        scenes.extend(self.detail_view.clone());
        scenes
    }

    pub fn scene_kind(&self, name: &str) -> Result<SceneKind, ContentError> {
        self.catalog
            .scenes
            .get(name)
            .copied()
            .ok_or_else(|| ContentError::UnknownScene(name.to_string()))
    }

    /// Request a move to another scene once the current interaction has been applied.
    pub fn change_scene(&mut self, name: &str) -> Result<(), ContentError> {
        match self.scene_kind(name)? {
            SceneKind::Scene => {
                debug!("scene change to '{name}' requested");
                self.pending_scene = Some(name.to_string());
                Ok(())
            },
            SceneKind::DetailView => Err(ContentError::NotAScene(name.to_string())),
        }
    }

    pub fn pending_scene(&self) -> Option<&str> {
        self.pending_scene.as_deref()
    }

    pub(crate) fn take_pending_scene(&mut self) -> Option<String> {
        self.pending_scene.take()
    }

    pub(crate) fn set_current_scene(&mut self, name: &str) {
        name.clone_into(&mut self.current_scene);
    }

    pub(crate) fn set_detail_view(&mut self, name: Option<&str>) {
        self.detail_view = name.map(str::to_string);
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub(crate) fn end_game(&mut self) {
        if !self.ended {
            info!("game ended");
        }
        self.ended = true;
    }

    // ----- data bags -----

    pub fn scene_data(&self, scene: &str, key: &str) -> Result<Option<&Value>, ContentError> {
        self.flags.get(&scene_scope(scene), key)
    }

    pub fn scene_flag(&self, scene: &str, key: &str) -> Result<bool, ContentError> {
        self.flags.flag(&scene_scope(scene), key)
    }

    pub fn scene_text(&self, scene: &str, key: &str) -> Result<Option<&str>, ContentError> {
        self.flags.text(&scene_scope(scene), key)
    }

    pub fn set_scene_data(&mut self, scene: &str, key: &str, value: impl Into<Value>) -> Result<(), ContentError> {
        self.flags.set(&scene_scope(scene), key, value)
    }

    pub fn thing_data(&self, thing: &str, key: &str) -> Result<Option<&Value>, ContentError> {
        self.flags.get(&thing_scope(thing), key)
    }

    pub fn thing_flag(&self, thing: &str, key: &str) -> Result<bool, ContentError> {
        self.flags.flag(&thing_scope(thing), key)
    }

    pub fn thing_int(&self, thing: &str, key: &str) -> Result<i64, ContentError> {
        self.flags.int(&thing_scope(thing), key)
    }

    pub fn set_thing_data(&mut self, thing: &str, key: &str, value: impl Into<Value>) -> Result<(), ContentError> {
        self.flags.set(&thing_scope(thing), key, value)
    }

    // ----- things -----

    pub fn thing_state(&self, name: &str) -> Result<&ThingState, ContentError> {
        self.things
            .get(name)
            .ok_or_else(|| ContentError::UnknownThing(name.to_string()))
    }

    pub(crate) fn thing_state_mut(&mut self, name: &str) -> Result<&mut ThingState, ContentError> {
        self.things
            .get_mut(name)
            .ok_or_else(|| ContentError::UnknownThing(name.to_string()))
    }

    /// Name of the thing's active interact.
    pub fn interact_of(&self, thing: &str) -> Result<&str, ContentError> {
        Ok(&self.thing_state(thing)?.interact)
    }

    /// Switch a thing's active interact. Switching to the active one changes nothing.
    pub fn set_interact(&mut self, thing: &str, interact: &str) -> Result<(), ContentError> {
        let known = self
            .catalog
            .interacts
            .get(thing)
            .ok_or_else(|| ContentError::UnknownThing(thing.to_string()))?;
        if !known.contains(interact) {
            return Err(ContentError::UnknownInteract {
                thing: thing.to_string(),
                interact: interact.to_string(),
            });
        }
        let state = self.thing_state_mut(thing)?;
        if state.interact != interact {
            debug!("{thing}: interact '{}' -> '{interact}'", state.interact);
            interact.clone_into(&mut state.interact);
            state.anim = AnimCursor::default();
        }
        Ok(())
    }

    /// Grow a thing's hit region by another rectangle.
    pub fn extend_region(&mut self, thing: &str, rect: Rect) -> Result<(), ContentError> {
        self.thing_state_mut(thing)?.extra_regions.push(rect);
        Ok(())
    }

    pub fn owner_of(&self, thing: &str) -> Result<&str, ContentError> {
        self.owners
            .get(thing)
            .map(String::as_str)
            .ok_or_else(|| ContentError::UnknownThing(thing.to_string()))
    }

    /// Things present in a scene, in registration order.
    pub fn scene_things(&self, scene: &str) -> Result<&[String], ContentError> {
        self.members
            .get(scene)
            .map(Vec::as_slice)
            .ok_or_else(|| ContentError::UnknownScene(scene.to_string()))
    }

    /// Returns true if the thing is currently part of its scene.
    pub fn is_present(&self, thing: &str) -> bool {
        self.owners
            .get(thing)
            .and_then(|scene| self.members.get(scene))
            .is_some_and(|members| members.iter().any(|m| m == thing))
    }

    /// Take a thing out of its scene. Removing an absent thing does nothing.
    pub fn remove_thing(&mut self, thing: &str) -> Result<(), ContentError> {
        let scene = self.owner_of(thing)?.to_string();
        if let Some(members) = self.members.get_mut(&scene) {
            members.retain(|m| m != thing);
        }
        debug!("{thing} removed from '{scene}'");
        Ok(())
    }

    /// Put a removed or dormant thing back at the end of its scene.
    pub fn restore_thing(&mut self, thing: &str) -> Result<(), ContentError> {
        let scene = self.owner_of(thing)?.to_string();
        if self.is_present(thing) {
            return Ok(());
        }
        self.members.entry(scene).or_default().push(thing.to_string());
        Ok(())
    }

    // ----- inventory -----

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn tool(&self) -> Option<&str> {
        self.inventory.tool()
    }

    fn check_item(&self, name: &str) -> Result<(), ContentError> {
        if self.catalog.items.contains(name) {
            Ok(())
        } else {
            Err(ContentError::UnknownItem(name.to_string()))
        }
    }

    /// Give the player an item. Adding an item already held is ignored.
    pub fn add_inventory_item(&mut self, name: &str) -> Result<(), ContentError> {
        self.check_item(name)?;
        if self.inventory.contains_item(name) {
            warn!("'{name}' is already in the inventory");
            return Ok(());
        }
        self.inventory.add_item(name);
        info!("'{name}' added to inventory");
        Ok(())
    }

    /// Returns false if the item was not held.
    pub fn remove_inventory_item(&mut self, name: &str) -> Result<bool, ContentError> {
        self.check_item(name)?;
        let held = self.inventory.contains_item(name);
        self.inventory.remove_item(name);
        Ok(held)
    }

    /// Swap `old` for `new` in the same inventory slot. Returns false if `old` was not held.
    pub fn replace_inventory_item(&mut self, old: &str, new: &str) -> Result<bool, ContentError> {
        self.check_item(old)?;
        self.check_item(new)?;
        let replaced = self.inventory.replace(old, new);
        if replaced {
            info!("'{old}' replaced by '{new}' in inventory");
        }
        Ok(replaced)
    }

    /// Select the active tool, or go back to the bare hand with `None`.
    pub fn set_tool(&mut self, name: Option<&str>) -> Result<(), ContentError> {
        if let Some(name) = name {
            self.check_item(name)?;
            if !self.inventory.contains_item(name) {
                return Err(ContentError::NotInInventory(name.to_string()));
            }
        }
        self.inventory.select(name);
        Ok(())
    }
}
