//! Content registry.
//!
//! [`Content`] owns every scene, thing and item definition and indexes them by
//! name. It is built once, validated as a whole, and then only read.

use std::collections::HashMap;

use anyhow::{Result, bail};
use log::info;
use sentence_data::{ContentManifest, SceneKind};

use crate::error::ContentError;
use crate::item::Item;
use crate::resources::ResourceLookup;
use crate::scene::Scene;
use crate::thing::Thing;
use crate::world::World;

#[derive(Debug)]
pub struct Content {
    start_scene: String,
    scenes: Vec<Scene>,
    scene_index: HashMap<String, usize>,
    thing_index: HashMap<String, (usize, usize)>,
    item_index: HashMap<String, (usize, usize)>,
}

impl Content {
    /// Register scenes and check every name they refer to.
    ///
    /// # Errors
    /// A single error listing every problem found, if there are any.
    pub fn build(start_scene: impl Into<String>, scenes: Vec<Scene>) -> Result<Self> {
        let start_scene = start_scene.into();
        let manifest = ContentManifest {
            start_scene: start_scene.clone(),
            scenes: scenes.iter().map(Scene::manifest).collect(),
        };
        validate_manifest(&manifest)?;

        let mut scene_index = HashMap::new();
        let mut thing_index = HashMap::new();
        let mut item_index = HashMap::new();
        for (s, scene) in scenes.iter().enumerate() {
            scene_index.insert(scene.name().to_string(), s);
            for (t, thing) in scene.things().iter().enumerate() {
                thing_index.insert(thing.name().to_string(), (s, t));
            }
            for (i, item) in scene.items().iter().enumerate() {
                item_index.insert(item.name().to_string(), (s, i));
            }
        }
        info!(
            "content built: {} scenes, {} things, {} items",
            scenes.len(),
            thing_index.len(),
            item_index.len()
        );

        Ok(Self {
            start_scene,
            scenes,
            scene_index,
            thing_index,
            item_index,
        })
    }

    /// Size image-backed interacts and cursors from the image files.
    pub fn resolve_geometry(&mut self, resources: &dyn ResourceLookup) {
        for scene in &mut self.scenes {
            scene.resolve(resources);
        }
    }

    /// A fresh world with every scene, thing and item in its initial state.
    pub fn initial_world(&self) -> World {
        let mut world = World::new();
        for scene in &self.scenes {
            world.declare_scene(scene.name(), scene.kind(), scene.initial_data().clone());
            for thing in scene.things() {
                world.declare_thing(
                    scene.name(),
                    thing.name(),
                    thing.interact_names(),
                    thing.initial_interact(),
                    thing.initial_data().clone(),
                    thing.is_dormant(),
                );
            }
            for item in scene.items() {
                world.declare_item(item.name());
            }
        }
        world.set_current_scene(&self.start_scene);
        world
    }

    pub fn start_scene(&self) -> &str {
        &self.start_scene
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn scene(&self, name: &str) -> Result<&Scene, ContentError> {
        self.scene_index
            .get(name)
            .map(|&s| &self.scenes[s])
            .ok_or_else(|| ContentError::UnknownScene(name.to_string()))
    }

    pub fn detail_view(&self, name: &str) -> Result<&Scene, ContentError> {
        let scene = self.scene(name)?;
        if scene.kind() == SceneKind::DetailView {
            Ok(scene)
        } else {
            Err(ContentError::NotADetailView(name.to_string()))
        }
    }

    pub fn thing(&self, name: &str) -> Result<&Thing, ContentError> {
        self.thing_index
            .get(name)
            .map(|&(s, t)| &self.scenes[s].things()[t])
            .ok_or_else(|| ContentError::UnknownThing(name.to_string()))
    }

    pub fn item(&self, name: &str) -> Result<&Item, ContentError> {
        self.item_index
            .get(name)
            .map(|&(s, i)| &self.scenes[s].items()[i])
            .ok_or_else(|| ContentError::UnknownItem(name.to_string()))
    }

    pub fn manifest(&self) -> ContentManifest {
        ContentManifest {
            start_scene: self.start_scene.clone(),
            scenes: self.scenes.iter().map(Scene::manifest).collect(),
        }
    }
}

/// Validate a manifest and return a single aggregated error.
fn validate_manifest(manifest: &ContentManifest) -> Result<()> {
    let errors = sentence_data::validate_content(manifest);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("content validation failed:\n{details}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::Interact;
    use sentence_data::LinkKind;

    fn plant(name: &str) -> Thing {
        Thing::new(name).interact("plant", Interact::no_image(0, 0, 10, 10))
    }

    #[test]
    fn lookups_find_registered_content() {
        let content = Content::build(
            "crew_quarters",
            vec![
                Scene::new("crew_quarters")
                    .thing(plant("crew.plant"))
                    .item(Item::new("fishbowl", "fishbowl.png")),
                Scene::detail_view("zoom"),
            ],
        )
        .expect("valid content");

        assert_eq!(content.thing("crew.plant").expect("thing").name(), "crew.plant");
        assert_eq!(content.item("fishbowl").expect("item").name(), "fishbowl");
        assert!(content.detail_view("zoom").is_ok());
        assert_eq!(
            content.detail_view("crew_quarters").map(Scene::name),
            Err(ContentError::NotADetailView("crew_quarters".into()))
        );
        assert_eq!(content.thing("crew.cat").map(Thing::name), Err(ContentError::UnknownThing("crew.cat".into())));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let err = Content::build(
            "nowhere",
            vec![
                Scene::new("a").thing(plant("dup")),
                Scene::new("b")
                    .thing(plant("dup").link(LinkKind::Scene, "mars"))
                    .thing(plant("x").with_item("crowbar", |_| Ok(crate::Outcome::none()))),
            ],
        )
        .expect_err("invalid content");

        let text = err.to_string();
        assert!(text.contains("duplicate thing name 'dup'"), "{text}");
        assert!(text.contains("missing scene 'nowhere'"), "{text}");
        assert!(text.contains("missing scene 'mars'"), "{text}");
        assert!(text.contains("missing item 'crowbar'"), "{text}");
    }

    #[test]
    fn initial_world_respects_dormant_things() {
        let content = Content::build(
            "a",
            vec![Scene::new("a").thing(plant("visible")).thing(plant("hidden").dormant())],
        )
        .expect("valid content");
        let world = content.initial_world();
        assert_eq!(world.current_scene(), "a");
        assert_eq!(world.scene_things("a").expect("scene"), &["visible"]);
        assert_eq!(world.owner_of("hidden").expect("owner"), "a");
    }
}
