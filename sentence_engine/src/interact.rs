//! Interact descriptors.
//!
//! An [`Interact`] is one state of a thing as the player sees it: where it can
//! be clicked and what is drawn there. Image-backed interacts only learn their
//! hit rectangle once the image size has been looked up, see [`Interact::resolve`].

use sentence_data::{Point, Rect};
use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::render::{ImageRef, TextStyle};
use crate::resources::{PLACEHOLDER_SIZE, ResourceLookup};

/// What is drawn for an interact.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Visual {
    /// An invisible hotspot.
    None,
    Image { name: String },
    /// A frame cycle. The frame changes once the tick count exceeds `delay`.
    Animated { frames: Vec<String>, delay: u32 },
    Text { text: String, style: TextStyle },
}

/// Playback position of an animated interact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimCursor {
    pub frame: usize,
    pub ticks: u32,
}

/// A clickable region plus its visual representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interact {
    origin: Point,
    regions: Vec<Rect>,
    visual: Visual,
    folder: String,
}

impl Interact {
    /// An invisible rectangular hotspot.
    pub fn no_image(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            regions: vec![Rect::new(x, y, w, h)],
            visual: Visual::None,
            folder: String::new(),
        }
    }

    /// An invisible hotspot made of several rectangles, for irregular shapes.
    pub fn rect_union(rects: &[(i32, i32, i32, i32)]) -> Self {
        let regions: Vec<Rect> = rects.iter().copied().map(Rect::from).collect();
        Self {
            origin: regions.first().map(Rect::origin).unwrap_or_default(),
            regions,
            visual: Visual::None,
            folder: String::new(),
        }
    }

    /// A static image whose size becomes the hit rectangle.
    pub fn image(x: i32, y: i32, name: impl Into<String>) -> Self {
        Self {
            origin: Point::new(x, y),
            regions: Vec::new(),
            visual: Visual::Image { name: name.into() },
            folder: String::new(),
        }
    }

    /// An animation. The first frame's size becomes the hit rectangle.
    pub fn animated<S: Into<String>>(x: i32, y: i32, frames: impl IntoIterator<Item = S>, delay: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            regions: Vec::new(),
            visual: Visual::Animated {
                frames: frames.into_iter().map(Into::into).collect(),
                delay,
            },
            folder: String::new(),
        }
    }

    /// Text rendered into an explicit rectangle.
    pub fn text(x: i32, y: i32, w: i32, h: i32, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            origin: Point::new(x, y),
            regions: vec![Rect::new(x, y, w, h)],
            visual: Visual::Text {
                text: text.into(),
                style,
            },
            folder: String::new(),
        }
    }

    /// Bind the interact to its scene folder and size image-backed regions.
    ///
    /// Missing images degrade to a placeholder size; the lookup reports them.
    pub fn resolve(&mut self, folder: &str, resources: &dyn ResourceLookup) {
        folder.clone_into(&mut self.folder);
        let first_image = match &self.visual {
            Visual::Image { name } => Some(name.as_str()),
            Visual::Animated { frames, .. } => frames.first().map(String::as_str),
            Visual::None | Visual::Text { .. } => None,
        };
        if let Some(name) = first_image {
            let size = resources.image_size(folder, name).unwrap_or(PLACEHOLDER_SIZE);
            self.regions = vec![Rect::at(self.origin, size)];
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Returns true if `point` falls in any of the interact's rectangles.
    pub fn contains(&self, point: Point) -> bool {
        self.regions.iter().any(|rect| rect.contains(point))
    }

    pub fn is_animated(&self) -> bool {
        self.visual.is_animated()
    }

    /// The image to draw for the given playback position, if any.
    pub fn current_image(&self, cursor: &AnimCursor) -> Option<ImageRef> {
        match &self.visual {
            Visual::Image { name } => Some(ImageRef::new(&self.folder, name)),
            Visual::Animated { frames, .. } => frames
                .get(cursor.frame % frames.len().max(1))
                .map(|name| ImageRef::new(&self.folder, name)),
            Visual::None | Visual::Text { .. } => None,
        }
    }

    /// Advance one tick. Returns true if the visible frame changed.
    pub fn advance(&self, cursor: &mut AnimCursor) -> bool {
        let Visual::Animated { frames, delay } = &self.visual else {
            return false;
        };
        if frames.len() < 2 {
            return false;
        }
        cursor.ticks += 1;
        if cursor.ticks > *delay {
            cursor.frame = (cursor.frame + 1) % frames.len();
            cursor.ticks = 0;
            return true;
        }
        false
    }
}

/// Extend a sequence so that playing it in a loop bounces back and forth.
///
/// `[a, b, c]` becomes `[a, b, c, b]`; the end points are not repeated.
pub fn make_reversible_list<T: Clone>(seq: &[T]) -> Vec<T> {
    let mut out = seq.to_vec();
    if seq.len() > 2 {
        out.extend(seq[1..seq.len() - 1].iter().rev().cloned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::FixedResources;
    use sentence_data::Size;

    #[test]
    fn rect_union_contains_any_member() {
        let interact = Interact::rect_union(&[(0, 0, 10, 10), (20, 20, 5, 5)]);
        assert!(interact.contains(Point::new(5, 5)));
        assert!(interact.contains(Point::new(22, 22)));
        assert!(!interact.contains(Point::new(15, 15)));
    }

    #[test]
    fn image_interacts_take_their_size_from_resources() {
        let mut interact = Interact::image(100, 50, "safe.png");
        assert!(!interact.contains(Point::new(101, 51)));

        let resources = FixedResources::new(Size::new(8, 8)).with_size("crew", "safe.png", Size::new(40, 30));
        interact.resolve("crew", &resources);
        assert_eq!(interact.regions(), &[Rect::new(100, 50, 40, 30)]);
        assert_eq!(
            interact.current_image(&AnimCursor::default()),
            Some(ImageRef::new("crew", "safe.png"))
        );
    }

    #[test]
    fn animation_changes_frame_after_delay() {
        let interact = Interact::animated(0, 0, ["a.png", "b.png"], 2);
        let mut cursor = AnimCursor::default();
        assert!(!interact.advance(&mut cursor));
        assert!(!interact.advance(&mut cursor));
        assert!(interact.advance(&mut cursor));
        assert_eq!(cursor.frame, 1);
        assert_eq!(interact.current_image(&cursor).map(|i| i.name), Some("b.png".to_string()));
    }

    #[test]
    fn static_interacts_never_advance() {
        let interact = Interact::no_image(0, 0, 1, 1);
        let mut cursor = AnimCursor::default();
        assert!(!interact.advance(&mut cursor));
        assert_eq!(cursor, AnimCursor::default());
    }

    #[test]
    fn reversible_list_bounces() {
        assert_eq!(make_reversible_list(&[1, 2, 3]), vec![1, 2, 3, 2]);
        assert_eq!(make_reversible_list(&[1, 2, 3, 4]), vec![1, 2, 3, 4, 3, 2]);
        assert_eq!(make_reversible_list(&[1, 2]), vec![1, 2]);
    }
}
