//! Rendering adapter.
//!
//! The engine never touches pixels. Scenes and things describe what should be
//! drawn in terms of [`ImageRef`]s and text, and a [`Surface`] supplied by the
//! UI layer turns that into output. [`DrawList`] is a recording surface used by
//! the terminal front end and by tests.

use sentence_data::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::interact::{AnimCursor, Interact, Visual};

/// Font used for all rendered text unless a style overrides it.
pub const DEFAULT_FONT: &str = "DejaVuSans-Bold.ttf";

const DEBUG_COLORS: &[&str] = &[
    "lightgreen",
    "red",
    "blue",
    "yellow",
    "orange",
    "purple",
    "cyan",
    "magenta",
    "white",
];

/// An image requested by `(folder, filename)`. The UI layer resolves and caches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub folder: String,
    pub name: String,
}

impl ImageRef {
    pub fn new(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            name: name.into(),
        }
    }
}

/// How a piece of text is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: String,
    pub size: u32,
    pub font: String,
    pub centre: bool,
}

impl TextStyle {
    pub fn new(color: impl Into<String>, size: u32) -> Self {
        Self {
            color: color.into(),
            size,
            font: DEFAULT_FONT.to_string(),
            centre: false,
        }
    }

    #[must_use]
    pub fn centred(mut self) -> Self {
        self.centre = true;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }
}

/// A line of text drawn as part of a scene background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub area: Rect,
    pub style: TextStyle,
}

/// Everything drawn behind a scene's things.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    pub image: Option<ImageRef>,
    pub lines: Vec<TextLine>,
}

impl Background {
    pub fn image(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            image: Some(ImageRef::new(folder, name)),
            lines: Vec::new(),
        }
    }

    /// Stack `texts` downwards from `start`, each line `line_height` tall plus `spacing`.
    pub fn push_lines<'a>(
        &mut self,
        texts: impl IntoIterator<Item = &'a str>,
        start: Point,
        size: (i32, i32),
        spacing: i32,
        style: &TextStyle,
    ) {
        let (width, line_height) = size;
        let mut y = start.y;
        for text in texts {
            self.lines.push(TextLine {
                text: text.to_string(),
                area: Rect::new(start.x, y, width, line_height),
                style: style.clone(),
            });
            y += line_height + spacing;
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

/// Drawing target implemented by the UI layer.
pub trait Surface {
    fn blit(&mut self, image: &ImageRef, at: Point);
    fn text(&mut self, text: &str, area: Rect, style: &TextStyle);
    fn outline(&mut self, rect: Rect, color: &'static str);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Blit { image: ImageRef, at: Point },
    Text { text: String, area: Rect, style: TextStyle },
    Outline { rect: Rect, color: &'static str },
}

/// A surface that records operations instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all blitted images, in draw order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Blit { image, .. } => Some(image.name.as_str()),
            _ => None,
        })
    }

    /// All rendered text, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn blit(&mut self, image: &ImageRef, at: Point) {
        self.ops.push(DrawOp::Blit {
            image: image.clone(),
            at,
        });
    }

    fn text(&mut self, text: &str, area: Rect, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            area,
            style: style.clone(),
        });
    }

    fn outline(&mut self, rect: Rect, color: &'static str) {
        self.ops.push(DrawOp::Outline { rect, color });
    }
}

/// Pick a stable debug outline colour for the n-th thing.
pub fn lookup_debug_color(n: usize) -> &'static str {
    DEBUG_COLORS[n % DEBUG_COLORS.len()]
}

/// Draw a scene background, shifted by the scene offset.
pub fn draw_background(surface: &mut dyn Surface, background: &Background, offset: Point) {
    if let Some(image) = &background.image {
        surface.blit(image, offset);
    }
    for line in &background.lines {
        let area = Rect::new(line.area.x + offset.x, line.area.y + offset.y, line.area.w, line.area.h);
        surface.text(&line.text, area, &line.style);
    }
}

/// Draw one interact in its current frame.
pub fn draw_interact(surface: &mut dyn Surface, interact: &Interact, cursor: &AnimCursor) {
    match interact.visual() {
        Visual::None => {},
        Visual::Image { .. } | Visual::Animated { .. } => {
            if let Some(image) = interact.current_image(cursor) {
                surface.blit(&image, interact.origin());
            }
        },
        Visual::Text { text, style } => {
            if let Some(area) = interact.regions().first() {
                surface.text(&crate::i18n::tr(text), *area, style);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_colors_cycle() {
        assert_eq!(lookup_debug_color(0), lookup_debug_color(DEBUG_COLORS.len()));
        assert_ne!(lookup_debug_color(0), lookup_debug_color(1));
    }

    #[test]
    fn push_lines_stacks_downwards() {
        let mut background = Background::default();
        let style = TextStyle::new("orange", 18);
        background.push_lines(["one", "two", "three"], Point::new(16, 100), (600, 25), 4, &style);

        let ys: Vec<i32> = background.lines.iter().map(|line| line.area.y).collect();
        assert_eq!(ys, vec![100, 129, 158]);
        assert_eq!(background.texts().collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[test]
    fn background_is_drawn_at_offset() {
        let mut surface = DrawList::new();
        let mut background = Background::image("bridge", "bridge.png");
        background.push_lines(["hello"], Point::new(10, 10), (100, 20), 0, &TextStyle::new("red", 12));

        draw_background(&mut surface, &background, Point::new(0, -50));

        assert_eq!(
            surface.ops[0],
            DrawOp::Blit {
                image: ImageRef::new("bridge", "bridge.png"),
                at: Point::new(0, -50),
            }
        );
        assert!(matches!(&surface.ops[1], DrawOp::Text { area, .. } if area.y == -40));
    }
}
