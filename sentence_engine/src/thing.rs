//! Things: the interactive objects of a scene.
//!
//! A [`Thing`] is an immutable definition: its named interacts, initial data
//! and handler table. Its runtime state (active interact, animation, data bag,
//! scene membership) lives in the [`World`]. Handlers receive both through an
//! [`Interaction`].
//!
//! Dispatch on a click:
//! - with a tool held, the handler registered for that item, else the default
//!   handler, else nothing;
//! - with no tool, the `without` handler, else nothing.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use log::debug;
use sentence_data::{DataBag, LinkDef, LinkKind, Point, Rect, ThingManifest, Value};

use crate::interact::Interact;
use crate::resources::ResourceLookup;
use crate::result::Outcome;
use crate::world::{ThingState, World};

pub type Handler = Box<dyn Fn(&mut Interaction<'_>) -> Result<Outcome>>;
pub type Hook = Box<dyn Fn(&mut Interaction<'_>) -> Result<()>>;
pub type Predicate = Box<dyn Fn(&ThingView<'_>) -> Result<bool>>;
pub type Describer = Box<dyn Fn(&ThingView<'_>) -> Result<Option<String>>>;
pub type Selector = Box<dyn Fn(&ThingView<'_>) -> Result<Option<String>>>;

/// Read-only access to a thing and the world, for predicates and descriptions.
pub struct ThingView<'a> {
    pub thing: &'a Thing,
    pub world: &'a World,
    pub tool: Option<&'a str>,
}

impl ThingView<'_> {
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    pub fn interact(&self) -> Result<&str> {
        Ok(self.world.interact_of(&self.thing.name)?)
    }

    pub fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.world.thing_flag(&self.thing.name, key)?)
    }

    pub fn data(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.world.thing_data(&self.thing.name, key)?)
    }
}

/// Mutable context handed to a thing's handlers.
pub struct Interaction<'a> {
    pub thing: &'a Thing,
    pub world: &'a mut World,
    pub tool: Option<&'a str>,
}

impl Interaction<'_> {
    pub fn name(&self) -> &str {
        &self.thing.name
    }

    pub fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.world.thing_flag(&self.thing.name, key)?)
    }

    pub fn int(&self, key: &str) -> Result<i64> {
        Ok(self.world.thing_int(&self.thing.name, key)?)
    }

    pub fn data(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.world.thing_data(&self.thing.name, key)?)
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.world.set_thing_data(&self.thing.name, key, value)?)
    }

    pub fn interact(&self) -> Result<&str> {
        Ok(self.world.interact_of(&self.thing.name)?)
    }

    pub fn set_interact(&mut self, interact: &str) -> Result<()> {
        Ok(self.world.set_interact(&self.thing.name, interact)?)
    }

    /// Take this thing out of its scene.
    pub fn remove(&mut self) -> Result<()> {
        Ok(self.world.remove_thing(&self.thing.name)?)
    }

    /// Give the player this thing's item and remove the thing.
    pub fn take(&mut self) -> Result<()> {
        let Some(item) = self.thing.item.as_deref() else {
            bail!("thing '{}' has no item to take", self.thing.name);
        };
        self.world.add_inventory_item(item)?;
        self.remove()
    }

    /// The hit rectangles of the active interact.
    pub fn regions(&self) -> Result<Vec<Rect>> {
        let active = self.interact()?;
        Ok(self
            .thing
            .interact_named(active)
            .map(|i| i.regions().to_vec())
            .unwrap_or_default())
    }
}

/// Definition of an interactive object.
pub struct Thing {
    name: String,
    interacts: BTreeMap<String, Interact>,
    initial: Option<String>,
    initial_data: DataBag,
    item: Option<String>,
    description: Option<String>,
    describer: Option<Describer>,
    interactive: Option<Predicate>,
    selector: Option<Selector>,
    with_item: BTreeMap<String, Handler>,
    default: Option<Handler>,
    without: Option<Handler>,
    on_leave: Option<Hook>,
    dormant: bool,
    debug_index: Option<usize>,
    links: Vec<LinkDef>,
}

impl Thing {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interacts: BTreeMap::new(),
            initial: None,
            initial_data: DataBag::new(),
            item: None,
            description: None,
            describer: None,
            interactive: None,
            selector: None,
            with_item: BTreeMap::new(),
            default: None,
            without: None,
            on_leave: None,
            dormant: false,
            debug_index: None,
            links: Vec::new(),
        }
    }

    /// Add a named interact. The first one added is the initial interact unless
    /// [`Thing::initial`] says otherwise.
    #[must_use]
    pub fn interact(mut self, name: impl Into<String>, interact: Interact) -> Self {
        let name = name.into();
        if self.initial.is_none() {
            self.initial = Some(name.clone());
        }
        self.interacts.insert(name, interact);
        self
    }

    #[must_use]
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_data.insert(key.into(), value.into());
        self
    }

    /// Static hover text.
    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Hover text computed from world state. Takes precedence over [`Thing::describe`].
    #[must_use]
    pub fn describe_with<F>(mut self, describer: F) -> Self
    where
        F: Fn(&ThingView<'_>) -> Result<Option<String>> + 'static,
    {
        self.describer = Some(Box::new(describer));
        self
    }

    #[must_use]
    pub fn interactive_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ThingView<'_>) -> Result<bool> + 'static,
    {
        self.interactive = Some(Box::new(predicate));
        self
    }

    /// Description-only things and scenery.
    #[must_use]
    pub fn never_interactive(self) -> Self {
        self.interactive_when(|_| Ok(false))
    }

    /// Derive the active interact from world state whenever the scene is shown.
    #[must_use]
    pub fn select_with<F>(mut self, selector: F) -> Self
    where
        F: Fn(&ThingView<'_>) -> Result<Option<String>> + 'static,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    #[must_use]
    pub fn without<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Interaction<'_>) -> Result<Outcome> + 'static,
    {
        self.without = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_item<F>(mut self, item: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Interaction<'_>) -> Result<Outcome> + 'static,
    {
        self.with_item.insert(item.into(), Box::new(handler));
        self
    }

    /// Runs for any tool without a dedicated handler.
    #[must_use]
    pub fn with_default<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Interaction<'_>) -> Result<Outcome> + 'static,
    {
        self.default = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Interaction<'_>) -> Result<()> + 'static,
    {
        self.on_leave = Some(Box::new(hook));
        self
    }

    /// The item granted by [`Interaction::take`].
    #[must_use]
    pub fn gives(mut self, item: impl Into<String>) -> Self {
        let item = item.into();
        self.links.push(LinkDef {
            kind: LinkKind::Item,
            target: item.clone(),
        });
        self.item = Some(item);
        self
    }

    /// Registered with its scene but absent until restored.
    #[must_use]
    pub fn dormant(mut self) -> Self {
        self.dormant = true;
        self
    }

    /// Fix the outline colour used when debug rectangles are drawn.
    #[must_use]
    pub fn debug_index(mut self, index: usize) -> Self {
        self.debug_index = Some(index);
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

    // ----- accessors -----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interact_named(&self, name: &str) -> Option<&Interact> {
        self.interacts.get(name)
    }

    pub fn interact_names(&self) -> impl Iterator<Item = &str> {
        self.interacts.keys().map(String::as_str)
    }

    pub fn initial_interact(&self) -> &str {
        self.initial.as_deref().unwrap_or_default()
    }

    pub fn initial_data(&self) -> &DataBag {
        &self.initial_data
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    pub fn get_debug_index(&self) -> Option<usize> {
        self.debug_index
    }

    pub fn has_selector(&self) -> bool {
        self.selector.is_some()
    }

    // ----- behaviour -----

    /// Whether clicks may reach this thing with the given tool.
    pub fn is_interactive(&self, view: &ThingView<'_>) -> Result<bool> {
        match &self.interactive {
            Some(predicate) => predicate(view),
            None => Ok(true),
        }
    }

    pub fn description(&self, view: &ThingView<'_>) -> Result<Option<String>> {
        match &self.describer {
            Some(describer) => describer(view),
            None => Ok(self.description.clone()),
        }
    }

    /// The interact the selector wants, if the thing has one.
    pub fn select(&self, view: &ThingView<'_>) -> Result<Option<String>> {
        match &self.selector {
            Some(selector) => selector(view),
            None => Ok(None),
        }
    }

    /// Hit test against the active interact plus any extra rectangles.
    pub fn contains(&self, state: &ThingState, point: Point) -> bool {
        self.interacts
            .get(&state.interact)
            .is_some_and(|interact| interact.contains(point))
            || state.extra_regions.iter().any(|rect| rect.contains(point))
    }

    /// Run the handler matching the held tool.
    pub fn dispatch(&self, ctx: &mut Interaction<'_>) -> Result<Outcome> {
        let handler = match ctx.tool {
            Some(tool) => self.with_item.get(tool).or(self.default.as_ref()),
            None => self.without.as_ref(),
        };
        if let Some(handler) = handler {
            debug!("{}: dispatching (tool {:?})", self.name, ctx.tool);
            handler(ctx)
        } else {
            debug!("{}: no handler for tool {:?}", self.name, ctx.tool);
            Ok(Outcome::none())
        }
    }

    pub fn leave(&self, ctx: &mut Interaction<'_>) -> Result<()> {
        match &self.on_leave {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    pub(crate) fn resolve(&mut self, folder: &str, resources: &dyn ResourceLookup) {
        for interact in self.interacts.values_mut() {
            interact.resolve(folder, resources);
        }
    }

    pub fn manifest(&self) -> ThingManifest {
        ThingManifest {
            name: self.name.clone(),
            interacts: self.interacts.keys().cloned().collect(),
            initial: self.initial.clone().unwrap_or_default(),
            handled_items: self.with_item.keys().cloned().collect(),
            links: self.links.clone(),
        }
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thing")
            .field("name", &self.name)
            .field("interacts", &self.interacts.keys().collect::<Vec<_>>())
            .field("initial", &self.initial)
            .field("item", &self.item)
            .field("with_item", &self.with_item.keys().collect::<Vec<_>>())
            .field("default", &self.default.is_some())
            .field("without", &self.without.is_some())
            .finish_non_exhaustive()
    }
}
