//! Mouse cursor sprites.

use sentence_data::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::render::ImageRef;
use crate::resources::{PLACEHOLDER_SIZE, ResourceLookup};

/// Folder holding cursor and inventory images.
pub const ITEM_FOLDER: &str = "items";

/// A cursor image and the pixel inside it that points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSprite {
    pub image: String,
    /// Defaults to the image centre once resolved.
    pub pointer: Option<Point>,
}

impl CursorSprite {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            pointer: None,
        }
    }

    pub fn with_pointer(image: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            image: image.into(),
            pointer: Some(Point::new(x, y)),
        }
    }

    /// The bare-hand cursor.
    pub fn hand() -> Self {
        Self::with_pointer("hand.png", 12, 0)
    }

    /// Fill in a centred pointer from the image size.
    pub fn resolve(&mut self, resources: &dyn ResourceLookup) {
        if self.pointer.is_none() {
            let size = resources.image_size(ITEM_FOLDER, &self.image).unwrap_or(PLACEHOLDER_SIZE);
            self.pointer = Some(centre(size));
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer.unwrap_or_else(|| centre(PLACEHOLDER_SIZE))
    }

    /// Where to draw the sprite so its pointer lands on `at`.
    pub fn place(&self, at: Point, highlighted: bool) -> CursorDraw {
        let pointer = self.pointer();
        CursorDraw {
            image: ImageRef::new(ITEM_FOLDER, &self.image),
            top_left: Point::new(at.x - pointer.x, at.y - pointer.y),
            highlighted,
        }
    }
}

fn centre(size: Size) -> Point {
    let half = |v: u32| i32::try_from(v / 2).unwrap_or(0);
    Point::new(half(size.w), half(size.h))
}

/// A cursor ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorDraw {
    pub image: ImageRef,
    pub top_left: Point,
    /// Set while hovering something interactive.
    pub highlighted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::FixedResources;

    #[test]
    fn hand_points_with_its_finger() {
        let draw = CursorSprite::hand().place(Point::new(100, 100), false);
        assert_eq!(draw.top_left, Point::new(88, 100));
        assert_eq!(draw.image, ImageRef::new("items", "hand.png"));
    }

    #[test]
    fn item_cursors_point_from_their_centre() {
        let mut sprite = CursorSprite::new("fishbowl.png");
        sprite.resolve(&FixedResources::new(Size::new(40, 20)));
        assert_eq!(sprite.pointer, Some(Point::new(20, 10)));
        assert_eq!(sprite.place(Point::new(50, 50), true).top_left, Point::new(30, 40));
    }
}
