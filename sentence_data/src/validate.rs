use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in authored content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateName { kind: &'static str, name: String },
    MissingReference { kind: &'static str, name: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateName { kind, name } => {
                write!(f, "duplicate {kind} name '{name}'")
            },
            ValidationError::MissingReference { kind, name, context } => {
                write!(f, "missing {kind} '{name}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate names, cross-references and basic invariants of a content manifest.
///
/// Thing names must be unique across the whole game, not just within a scene,
/// because handlers look things up by name from anywhere.
///
/// ```
/// use sentence_data::{ContentManifest, SceneKind, SceneManifest, ThingManifest, validate_content};
///
/// let content = ContentManifest {
///     start_scene: "cryo".into(),
///     scenes: vec![SceneManifest {
///         name: "cryo".into(),
///         kind: SceneKind::Scene,
///         things: vec![ThingManifest {
///             name: "cryo.door".into(),
///             interacts: vec!["closed".into()],
///             initial: "closed".into(),
///             ..ThingManifest::default()
///         }],
///         ..SceneManifest::default()
///     }],
/// };
/// assert!(validate_content(&content).is_empty());
/// ```
pub fn validate_content(content: &ContentManifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut scenes = HashSet::new();
    let mut detail_views = HashSet::new();
    let mut things = HashSet::new();
    let mut items = HashSet::new();

    for scene in &content.scenes {
        // scenes and detail views share one namespace
        if !scenes.insert(scene.name.clone()) {
            errors.push(ValidationError::DuplicateName {
                kind: "scene",
                name: scene.name.clone(),
            });
        }
        if scene.kind == SceneKind::DetailView {
            detail_views.insert(scene.name.clone());
        }
        track_names(
            "thing",
            scene.things.iter().map(|t| t.name.as_str()),
            &mut things,
            &mut errors,
        );
        track_names(
            "item",
            scene.items.iter().map(|i| i.name.as_str()),
            &mut items,
            &mut errors,
        );
    }

    let names = NameSets {
        scenes: &scenes,
        detail_views: &detail_views,
        things: &things,
        items: &items,
    };

    if content.start_scene.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "start scene missing".to_string(),
        });
    } else if detail_views.contains(&content.start_scene) {
        errors.push(ValidationError::InvalidValue {
            context: format!("start scene '{}' is a detail view", content.start_scene),
        });
    } else {
        check_ref(
            "scene",
            &content.start_scene,
            names.scenes,
            "start scene".to_string(),
            &mut errors,
        );
    }

    for scene in &content.scenes {
        let scene_context = format!("{} '{}'", scene.kind, scene.name);
        validate_links(&scene.links, &names, &mut errors, &scene_context);

        for thing in &scene.things {
            let context = format!("thing '{}' in {scene_context}", thing.name);
            if thing.interacts.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} has no interacts"),
                });
            } else if !thing.interacts.contains(&thing.initial) {
                errors.push(ValidationError::MissingReference {
                    kind: "interact",
                    name: thing.initial.clone(),
                    context: format!("{context} initial interact"),
                });
            }
            for item in &thing.handled_items {
                check_ref("item", item, names.items, format!("{context} handler"), &mut errors);
            }
            validate_links(&thing.links, &names, &mut errors, &context);
        }

        for item in &scene.items {
            let context = format!("item '{}' in {scene_context}", item.name);
            for other in &item.handled_items {
                check_ref("item", other, names.items, format!("{context} handler"), &mut errors);
            }
            validate_links(&item.links, &names, &mut errors, &context);
        }
    }

    errors
}

struct NameSets<'a> {
    scenes: &'a HashSet<String>,
    detail_views: &'a HashSet<String>,
    things: &'a HashSet<String>,
    items: &'a HashSet<String>,
}

fn track_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for name in names {
        if !set.insert(name.to_string()) {
            errors.push(ValidationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, name: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(name) {
        errors.push(ValidationError::MissingReference {
            kind,
            name: name.to_string(),
            context,
        });
    }
}

fn validate_links(links: &[LinkDef], names: &NameSets<'_>, errors: &mut Vec<ValidationError>, context: &str) {
    for link in links {
        let set = match link.kind {
            LinkKind::Scene => {
                // a scene link must name a navigable scene, not a detail view
                if names.detail_views.contains(&link.target) {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("{context} links to detail view '{}' as a scene", link.target),
                    });
                    continue;
                }
                names.scenes
            },
            LinkKind::DetailView => names.detail_views,
            LinkKind::Item => names.items,
            LinkKind::Thing => names.things,
        };
        check_ref(
            link.kind.as_str(),
            &link.target,
            set,
            format!("{context} link"),
            errors,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing(name: &str) -> ThingManifest {
        ThingManifest {
            name: name.to_string(),
            interacts: vec!["idle".into()],
            initial: "idle".into(),
            ..ThingManifest::default()
        }
    }

    fn scene(name: &str, kind: SceneKind, things: Vec<ThingManifest>) -> SceneManifest {
        SceneManifest {
            name: name.to_string(),
            kind,
            things,
            ..SceneManifest::default()
        }
    }

    fn base_content() -> ContentManifest {
        ContentManifest {
            start_scene: "start".into(),
            scenes: vec![scene("start", SceneKind::Scene, vec![thing("start.door")])],
        }
    }

    #[test]
    fn valid_content_has_no_errors() {
        assert!(validate_content(&base_content()).is_empty());
    }

    #[test]
    fn duplicate_thing_names_across_scenes_are_reported() {
        let mut content = base_content();
        content
            .scenes
            .push(scene("other", SceneKind::Scene, vec![thing("start.door")]));

        let errors = validate_content(&content);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::DuplicateName { kind, name } if *kind == "thing" && name == "start.door")
        ));
    }

    #[test]
    fn missing_initial_interact_is_reported() {
        let mut content = base_content();
        content.scenes[0].things[0].initial = "open".into();

        let errors = validate_content(&content);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, name, .. } if *kind == "interact" && name == "open")
        ));
    }

    #[test]
    fn handlers_for_unknown_items_are_reported() {
        let mut content = base_content();
        content.scenes[0].things[0].handled_items = vec!["crowbar".into()];

        let errors = validate_content(&content);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, name, .. } if *kind == "item" && name == "crowbar")
        ));
    }

    #[test]
    fn detail_view_links_must_name_detail_views() {
        let mut content = base_content();
        content.scenes.push(scene("zoom", SceneKind::DetailView, Vec::new()));
        content.scenes[0].things[0].links = vec![
            LinkDef {
                kind: LinkKind::DetailView,
                target: "zoom".into(),
            },
            LinkDef {
                kind: LinkKind::DetailView,
                target: "start".into(),
            },
            LinkDef {
                kind: LinkKind::Scene,
                target: "zoom".into(),
            },
        ];

        let errors = validate_content(&content);
        assert_eq!(errors.len(), 2, "{errors:?}");
    }

    #[test]
    fn start_scene_cannot_be_a_detail_view() {
        let mut content = base_content();
        content.scenes.push(scene("zoom", SceneKind::DetailView, Vec::new()));
        content.start_scene = "zoom".into();

        let errors = validate_content(&content);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::InvalidValue { .. })));
    }
}
