use crate::canvas::{Canvas, NullCanvas, TextStyle};
use crate::fonts::{ASCENDER_RATIO, Font, LINE_HEIGHT_RATIO, wrap_text};
use crate::model::{Alignment, Color};

use super::state::{PageLayout, RunState};

/// Everything about a run that drawing code may read but never changes.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub layout: PageLayout,
    pub document_name: String,
    pub producer: String,
    /// Captured once per run so both passes print the same timestamp.
    pub printed_at: String,
}

/// Drawing handle passed to every report hook.
///
/// The frame owns a copy of the vertical cursor. Hooks advance it as they
/// draw; the engine reads it back afterwards. Hooks cannot tell whether the
/// canvas behind the frame is real or a measuring stand-in.
pub struct Frame<'a> {
    canvas: &'a mut dyn Canvas,
    ctx: &'a RunContext,
    page_num: usize,
    pages_count: usize,
    max_y: f32,
    y: f32,
    font_size: f32,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        canvas: &'a mut dyn Canvas,
        ctx: &'a RunContext,
        state: &RunState,
    ) -> Self {
        Self {
            canvas,
            ctx,
            page_num: state.page_num,
            pages_count: state.pages_count,
            max_y: state.max_y,
            y: state.last_y,
            font_size: ctx.layout.default_font_size,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move the cursor down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Lowest cursor position the page body may reach before the page footer.
    pub fn body_bottom(&self) -> f32 {
        self.max_y
    }

    pub fn left(&self) -> f32 {
        self.ctx.layout.page_margin
    }

    pub fn right(&self) -> f32 {
        self.ctx.layout.page_width - self.ctx.layout.page_margin
    }

    pub fn width(&self) -> f32 {
        self.ctx.layout.body_width()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.ctx.layout
    }

    pub fn context(&self) -> &RunContext {
        self.ctx
    }

    pub fn page_num(&self) -> usize {
        self.page_num
    }

    /// Total page count. Zero while the measurement pass is still counting.
    pub fn pages_count(&self) -> usize {
        self.pages_count
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Change the font size for the rest of this hook invocation.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_RATIO
    }

    pub fn style(&self, font: Font) -> TextStyle {
        TextStyle::new(font, self.font_size)
    }

    pub fn text_width(&self, text: &str, font: Font) -> f32 {
        self.canvas.text_width(text, self.style(font))
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    fn baseline(&self) -> f32 {
        self.y + self.font_size * ASCENDER_RATIO
    }

    /// Draw `text` at `x` on the current line without moving the cursor.
    pub fn text(&mut self, x: f32, text: &str, style: TextStyle) {
        let baseline = self.y + style.size * ASCENDER_RATIO;
        self.canvas.text(x, baseline, text, style);
    }

    /// Draw `text` aligned inside the box `[x, x + width]` on the current line.
    pub fn text_in(&mut self, x: f32, width: f32, text: &str, align: Alignment, font: Font) {
        let style = self.style(font);
        let w = self.canvas.text_width(text, style);
        let x = match align {
            Alignment::Left => x,
            Alignment::Center => x + (width - w) / 2.0,
            Alignment::Right => x + width - w,
        };
        let baseline = self.baseline();
        self.canvas.text(x, baseline, text, style);
    }

    /// One full-width line of text, then move to the next line.
    pub fn line(&mut self, text: &str, align: Alignment, font: Font) {
        let (x, width) = (self.left(), self.width());
        self.text_in(x, width, text, align, font);
        self.new_line();
    }

    pub fn new_line(&mut self) {
        self.y += self.line_height();
    }

    /// Word-wrap `text` into `[x, x + width]`, drawing and advancing one line
    /// at a time. Returns the number of lines drawn.
    pub fn wrapped(&mut self, x: f32, width: f32, text: &str, align: Alignment, font: Font) -> usize {
        let lines = wrap_text(text, font, self.font_size, width);
        for line in &lines {
            self.text_in(x, width, line, align, font);
            self.new_line();
        }
        lines.len()
    }

    /// Fill a band of `height` starting at the cursor across `[x, x + width]`.
    pub fn fill(&mut self, x: f32, width: f32, height: f32, color: Color) {
        self.canvas.fill_rect(x, self.y, width, height, color);
    }

    /// Horizontal rule across the body at the cursor.
    pub fn rule(&mut self, thickness: f32, color: Color) {
        let (x0, x1, y) = (self.left(), self.right(), self.y);
        self.canvas.rule(x0, x1, y, thickness, color);
    }

    /// Height `op` would consume from the current cursor. Nothing is drawn
    /// and this frame is left untouched.
    pub fn measure(&self, op: impl FnOnce(&mut Frame<'_>)) -> f32 {
        let mut null = NullCanvas;
        let mut probe = Frame {
            canvas: &mut null,
            ctx: self.ctx,
            page_num: self.page_num,
            pages_count: self.pages_count,
            max_y: self.max_y,
            y: self.y,
            font_size: self.ctx.layout.default_font_size,
        };
        op(&mut probe);
        probe.y - self.y
    }
}

/// Height oracle used by the pagination driver: run `op` against a null
/// canvas at the current cursor and report how far it moved. `state` is
/// only read.
pub(crate) fn measure(
    ctx: &RunContext,
    state: &RunState,
    op: impl FnOnce(&mut Frame<'_>),
) -> f32 {
    let mut null = NullCanvas;
    let mut probe = Frame::new(&mut null, ctx, state);
    op(&mut probe);
    probe.y - state.last_y
}

/// Run `op` against `canvas` and commit the cursor it leaves behind.
pub(crate) fn draw(
    canvas: &mut dyn Canvas,
    ctx: &RunContext,
    state: &mut RunState,
    op: impl FnOnce(&mut Frame<'_>),
) {
    let mut frame = Frame::new(canvas, ctx, state);
    op(&mut frame);
    state.last_y = frame.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportConfig;

    fn context() -> RunContext {
        RunContext {
            layout: PageLayout::from_config(&ReportConfig::default()),
            document_name: String::new(),
            producer: String::new(),
            printed_at: String::new(),
        }
    }

    #[test]
    fn measure_restores_cursor() {
        let ctx = context();
        let state = RunState::new(&ctx.layout, 0);
        let h = measure(&ctx, &state, |f| {
            f.line("a", Alignment::Left, Font::Regular);
            f.line("b", Alignment::Left, Font::Regular);
        });
        assert!((h - 2.0 * ctx.layout.line_height).abs() < 1e-4);
        assert_eq!(state.last_y, ctx.layout.top());
    }

    #[test]
    fn measure_is_idempotent() {
        let ctx = context();
        let state = RunState::new(&ctx.layout, 0);
        let op = |f: &mut Frame<'_>| {
            f.wrapped(f.left(), 60.0, "a long text that wraps several times", Alignment::Left, Font::Regular);
        };
        let first = measure(&ctx, &state, op);
        let second = measure(&ctx, &state, op);
        assert_eq!(first, second);
        assert!(first > ctx.layout.line_height);
    }

    #[test]
    fn font_size_resets_for_each_hook() {
        let ctx = context();
        let mut state = RunState::new(&ctx.layout, 0);
        let mut canvas = NullCanvas;
        draw(&mut canvas, &ctx, &mut state, |f| {
            f.set_font_size(20.0);
            f.new_line();
        });
        assert!((state.last_y - ctx.layout.top() - 24.0).abs() < 1e-4);
        let h = measure(&ctx, &state, |f| f.new_line());
        assert!((h - ctx.layout.line_height).abs() < 1e-4);
    }

    #[test]
    fn nested_measure_leaves_frame_alone() {
        let ctx = context();
        let mut state = RunState::new(&ctx.layout, 0);
        let mut canvas = NullCanvas;
        draw(&mut canvas, &ctx, &mut state, |f| {
            let before = f.y();
            let h = f.measure(|p| p.advance(15.0));
            assert_eq!(h, 15.0);
            assert_eq!(f.y(), before);
        });
        assert_eq!(state.last_y, ctx.layout.top());
    }
}
