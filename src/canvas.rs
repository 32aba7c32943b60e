use crate::fonts::{self, Font};
use crate::model::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            color: Color::BLACK,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Drawing surface for one page. Coordinates are in points, measured from
/// the top-left corner of the page with y growing downwards.
pub trait Canvas {
    /// Draw `text` starting at `x` with its baseline at `baseline`.
    fn text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Horizontal rule from `x0` to `x1` at `y`.
    fn rule(&mut self, x0: f32, x1: f32, y: f32, thickness: f32, color: Color);

    fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        fonts::text_width(text, style.font, style.size)
    }
}

/// Canvas that draws nothing. Text extents are still reported from the real
/// font metrics, so layout computed against it matches the rendered page.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn text(&mut self, _x: f32, _baseline: f32, _text: &str, _style: TextStyle) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) {}

    fn rule(&mut self, _x0: f32, _x1: f32, _y: f32, _thickness: f32, _color: Color) {}
}

/// Export target that hands out one canvas per page.
pub trait Device {
    type Page: Canvas;

    fn begin_page(&mut self, width: f32, height: f32) -> Self::Page;

    fn end_page(&mut self, page: Self::Page);
}

/// Device used for the measurement pass: pages are thrown away.
#[derive(Debug, Default)]
pub(crate) struct NullDevice;

impl Device for NullDevice {
    type Page = NullCanvas;

    fn begin_page(&mut self, _width: f32, _height: f32) -> NullCanvas {
        NullCanvas
    }

    fn end_page(&mut self, _page: NullCanvas) {}
}
