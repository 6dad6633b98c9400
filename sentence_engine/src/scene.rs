//! Scenes and detail views.
//!
//! A [`Scene`] is a named container of things and items with its own data bag
//! and lifecycle hooks. Detail views are scenes of kind
//! [`SceneKind::DetailView`], opened on top of the current scene.

use std::fmt;

use anyhow::Result;
use sentence_data::{DataBag, LinkDef, LinkKind, Point, SceneKind, SceneManifest, Value};

use crate::item::Item;
use crate::render::Background;
use crate::resources::ResourceLookup;
use crate::sound::Sound;
use crate::thing::Thing;
use crate::world::World;

pub type SceneHook = Box<dyn Fn(&mut SceneCtx<'_>) -> Result<()>>;
pub type Backdrop = Box<dyn Fn(&SceneView<'_>) -> Result<Background>>;

/// Context for enter and leave hooks.
pub struct SceneCtx<'a> {
    pub scene: &'a Scene,
    pub world: &'a mut World,
    pub sound: &'a mut Sound,
}

impl SceneCtx<'_> {
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.world.scene_data(&self.scene.name, key)?)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.world.set_scene_data(&self.scene.name, key, value)?)
    }
}

/// Read-only context for computing a background.
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub world: &'a World,
}

impl SceneView<'_> {
    pub fn text(&self, key: &str) -> Result<Option<&str>> {
        Ok(self.world.scene_text(&self.scene.name, key)?)
    }
}

pub struct Scene {
    name: String,
    kind: SceneKind,
    folder: String,
    background: Option<String>,
    offset: Point,
    initial_data: DataBag,
    things: Vec<Thing>,
    items: Vec<Item>,
    on_enter: Option<SceneHook>,
    on_leave: Option<SceneHook>,
    backdrop: Option<Backdrop>,
    links: Vec<LinkDef>,
}

impl Scene {
    /// A room reached by navigation. The folder defaults to the scene name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name.into(), SceneKind::Scene)
    }

    /// A zoomed view opened from another scene.
    pub fn detail_view(name: impl Into<String>) -> Self {
        Self::with_kind(name.into(), SceneKind::DetailView)
    }

    fn with_kind(name: String, kind: SceneKind) -> Self {
        Self {
            folder: name.clone(),
            name,
            kind,
            background: None,
            offset: Point::default(),
            initial_data: DataBag::new(),
            things: Vec::new(),
            items: Vec::new(),
            on_enter: None,
            on_leave: None,
            backdrop: None,
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    #[must_use]
    pub fn background(mut self, image: impl Into<String>) -> Self {
        self.background = Some(image.into());
        self
    }

    /// Shift applied to the background image when drawn.
    #[must_use]
    pub fn offset(mut self, x: i32, y: i32) -> Self {
        self.offset = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_data.insert(key.into(), value.into());
        self
    }

    /// Things are hit-tested and drawn in the order they are added.
    #[must_use]
    pub fn thing(mut self, thing: Thing) -> Self {
        self.things.push(thing);
        self
    }

    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut SceneCtx<'_>) -> Result<()> + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut SceneCtx<'_>) -> Result<()> + 'static,
    {
        self.on_leave = Some(Box::new(hook));
        self
    }

    /// Compute the background from world state at draw time.
    #[must_use]
    pub fn backdrop<F>(mut self, backdrop: F) -> Self
    where
        F: Fn(&SceneView<'_>) -> Result<Background> + 'static,
    {
        self.backdrop = Some(Box::new(backdrop));
        self
    }

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

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn folder_name(&self) -> &str {
        &self.folder
    }

    pub fn get_offset(&self) -> Point {
        self.offset
    }

    pub fn initial_data(&self) -> &DataBag {
        &self.initial_data
    }

    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn enter(&self, world: &mut World, sound: &mut Sound) -> Result<()> {
        match &self.on_enter {
            Some(hook) => hook(&mut SceneCtx {
                scene: self,
                world,
                sound,
            }),
            None => Ok(()),
        }
    }

    pub fn leave(&self, world: &mut World, sound: &mut Sound) -> Result<()> {
        match &self.on_leave {
            Some(hook) => hook(&mut SceneCtx {
                scene: self,
                world,
                sound,
            }),
            None => Ok(()),
        }
    }

    /// The background to draw behind the things.
    pub fn render_background(&self, world: &World) -> Result<Background> {
        if let Some(backdrop) = &self.backdrop {
            return backdrop(&SceneView { scene: self, world });
        }
        Ok(match &self.background {
            Some(image) => Background::image(&self.folder, image),
            None => Background::default(),
        })
    }

    pub(crate) fn resolve(&mut self, resources: &dyn ResourceLookup) {
        for thing in &mut self.things {
            thing.resolve(&self.folder, resources);
        }
        for item in &mut self.items {
            item.resolve(resources);
        }
    }

    pub fn manifest(&self) -> SceneManifest {
        SceneManifest {
            name: self.name.clone(),
            kind: self.kind,
            things: self.things.iter().map(Thing::manifest).collect(),
            items: self.items.iter().map(Item::manifest).collect(),
            links: self.links.clone(),
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("folder", &self.folder)
            .field("background", &self.background)
            .field("offset", &self.offset)
            .field("things", &self.things)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::Interact;
    use crate::render::TextStyle;

    #[test]
    fn static_background_uses_scene_folder() {
        let scene = Scene::new("bridge").background("bridge.png").offset(0, -50);
        let background = scene.render_background(&World::new()).expect("background");
        assert_eq!(background, Background::image("bridge", "bridge.png"));
        assert_eq!(scene.get_offset(), Point::new(0, -50));
    }

    #[test]
    fn backdrop_overrides_static_background() {
        let scene = Scene::detail_view("screen").folder("bridge").backdrop(|view| {
            let mut background = Background::image(view.scene.folder_name(), "base.png");
            background.push_lines(["hello"], Point::new(0, 0), (100, 20), 0, &TextStyle::new("red", 10));
            Ok(background)
        });
        let background = scene.render_background(&World::new()).expect("background");
        assert_eq!(background.texts().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn manifest_collects_things() {
        let scene = Scene::new("mess")
            .thing(Thing::new("mess.tubes").interact("pipes", Interact::no_image(0, 0, 1, 1)))
            .item(Item::new("machete", "machete.png"));
        let manifest = scene.manifest();
        assert_eq!(manifest.things.len(), 1);
        assert_eq!(manifest.items[0].name, "machete");
        assert_eq!(manifest.kind, SceneKind::Scene);
    }
}
