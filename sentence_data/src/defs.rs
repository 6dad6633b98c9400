use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Globally unique name of a scene, thing or item.
pub type Name = String;

/// Initial contents of a data bag, keyed by flag name.
pub type DataBag = BTreeMap<String, Value>;

/// A screen position in scene coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point by another point used as an offset.
    pub const fn offset_by(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of an image or other resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// An axis-aligned rectangle. `x`/`y` is the top-left corner.
///
/// Containment is half-open: the left and top edges are inside, the right and
/// bottom edges are not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle anchored at `origin` with the given size.
    pub fn at(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: i32::try_from(size.w).unwrap_or(i32::MAX),
            h: i32::try_from(size.h).unwrap_or(i32::MAX),
        }
    }

    pub const fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns true if `point` lies inside this rectangle.
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        Self { x, y, w, h }
    }
}

/// A value stored in a scene or thing data bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Truthiness used when a flag is read as a condition: `false`, `0` and
    /// the empty string are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Text(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(text) => write!(f, "'{text}'"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// How a scene is reached by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneKind {
    /// A room reached through map navigation.
    #[default]
    Scene,
    /// A zoomed view opened by interacting with something in a scene.
    DetailView,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Scene => write!(f, "scene"),
            SceneKind::DetailView => write!(f, "detail view"),
        }
    }
}

/// Kind of entity named by a [`LinkDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    Scene,
    DetailView,
    Item,
    Thing,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Scene => "scene",
            LinkKind::DetailView => "detail view",
            LinkKind::Item => "item",
            LinkKind::Thing => "thing",
        }
    }
}

/// A name referenced from handler code that must exist once content is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDef {
    pub kind: LinkKind,
    pub target: Name,
}

/// Summary of an authored thing, as seen by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingManifest {
    pub name: Name,
    pub interacts: Vec<Name>,
    pub initial: Name,
    /// Item names with a registered `with <item>` handler.
    #[serde(default)]
    pub handled_items: Vec<Name>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

/// Summary of an authored item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemManifest {
    pub name: Name,
    #[serde(default)]
    pub handled_items: Vec<Name>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

/// Summary of an authored scene or detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub name: Name,
    pub kind: SceneKind,
    #[serde(default)]
    pub things: Vec<ThingManifest>,
    #[serde(default)]
    pub items: Vec<ItemManifest>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

/// Everything the validator needs to know about a fully set-up game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentManifest {
    pub start_scene: Name,
    #[serde(default)]
    pub scenes: Vec<SceneManifest>,
}
