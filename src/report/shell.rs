use crate::fonts::Font;
use crate::model::{Alignment, Color};

use super::frame::Frame;

const TITLE_SCALE: f32 = 1.6;
const SUBTITLE_SCALE: f32 = 1.2;
const SMALL_SCALE: f32 = 0.8;

/// Placeholder printed in the body of a report without records.
pub(crate) const EMPTY_PLACEHOLDER: &str = "No data to print";

/// Default page header: document name, centered title and subtitle, then
/// the column headers painted over a filled band.
pub(crate) fn draw_page_header(
    frame: &mut Frame<'_>,
    title: &str,
    subtitle: &str,
    column_headers: impl Fn(&mut Frame<'_>),
) {
    let base = frame.layout().default_font_size;

    let document_name = frame.context().document_name.clone();
    if !document_name.is_empty() {
        frame.set_font_size(base * SMALL_SCALE);
        let x = frame.left();
        let style = frame.style(Font::Regular).color(Color::GRAY);
        frame.text(x, &document_name, style);
        frame.new_line();
    }

    frame.set_font_size(base * TITLE_SCALE);
    frame.line(title, Alignment::Center, Font::Bold);

    if !subtitle.is_empty() {
        frame.set_font_size(base * SUBTITLE_SCALE);
        frame.line(subtitle, Alignment::Center, Font::Regular);
    }

    frame.set_font_size(base);
    let gap = frame.line_height() / 2.0;
    frame.advance(gap);

    let band = frame.measure(|f| column_headers(f));
    if band > 0.0 {
        let (x, width) = (frame.left(), frame.width());
        frame.fill(x, width, band, Color::HEADER_BAND);
        column_headers(frame);
        frame.set_font_size(base);
        frame.advance(gap);
    }
}

/// Default page footer: a rule, the producer on the left, and the print
/// timestamp with "Page N/M" on the right.
pub(crate) fn draw_page_footer(frame: &mut Frame<'_>) {
    let base = frame.layout().default_font_size;
    frame.rule(0.5, Color::GRAY);
    frame.advance(2.0);
    frame.set_font_size(base * SMALL_SCALE);

    let ctx = frame.context();
    let producer = ctx.producer.clone();
    let right = format!(
        "{} - Page {}/{}",
        ctx.printed_at,
        frame.page_num(),
        frame.pages_count()
    );

    let style = frame.style(Font::Regular).color(Color::GRAY);
    let x = frame.left();
    frame.text(x, &producer, style);
    let right_x = frame.right() - frame.text_width(&right, Font::Regular);
    frame.text(right_x, &right, style);
    frame.new_line();
}

/// Centers the placeholder between the cursor and the page footer.
pub(crate) fn draw_empty(frame: &mut Frame<'_>) {
    let room = frame.body_bottom() - frame.y();
    let offset = ((room - frame.line_height()) / 2.0).max(0.0);
    frame.advance(offset);
    frame.line(EMPTY_PLACEHOLDER, Alignment::Center, Font::Italic);
}
