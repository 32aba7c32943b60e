use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{Canvas, Device, TextStyle};
use crate::error::Error;
use crate::fonts::{Font, to_winansi_bytes};
use crate::model::Color;

/// Page canvas backed by a PDF content stream.
pub struct PdfCanvas {
    content: Content,
    width: f32,
    height: f32,
}

impl PdfCanvas {
    fn new(width: f32, height: f32) -> Self {
        Self {
            content: Content::new(),
            width,
            height,
        }
    }

    /// Convert a top-down y coordinate into PDF user space.
    fn flip(&self, y: f32) -> f32 {
        self.height - y
    }
}

impl Canvas for PdfCanvas {
    fn text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle) {
        let bytes = to_winansi_bytes(text);
        if bytes.is_empty() {
            return;
        }
        let (r, g, b) = style.color.rgb();
        let y = self.flip(baseline);
        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.begin_text();
        self.content
            .set_font(Name(style.font.pdf_name()), style.size);
        self.content.next_line(x, y);
        self.content.show(Str(&bytes));
        self.content.end_text();
        self.content.restore_state();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (r, g, b) = color.rgb();
        let bottom = self.flip(y + height);
        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.rect(x, bottom, width, height);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn rule(&mut self, x0: f32, x1: f32, y: f32, thickness: f32, color: Color) {
        let (r, g, b) = color.rgb();
        let y = self.flip(y);
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(thickness);
        self.content.move_to(x0, y);
        self.content.line_to(x1, y);
        self.content.stroke();
        self.content.restore_state();
    }
}

/// Collects rendered pages and assembles them into a PDF file.
pub struct PdfDevice {
    pages: Vec<PdfCanvas>,
    title: String,
    producer: String,
}

impl PdfDevice {
    pub fn new(title: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            pages: Vec::new(),
            title: title.into(),
            producer: producer.into(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(self) -> Result<Vec<u8>, Error> {
        if self.pages.is_empty() {
            return Err(Error::Device("no pages were rendered".into()));
        }

        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();

        let font_pairs: Vec<(&[u8], Ref)> = Font::ALL
            .iter()
            .map(|font| {
                let font_ref = alloc();
                pdf.type1_font(font_ref)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (font.pdf_name(), font_ref)
            })
            .collect();

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);
        pdf.document_info(info_id)
            .title(TextStr(&self.title))
            .producer(TextStr(&self.producer));

        for (i, canvas) in self.pages.into_iter().enumerate() {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, canvas.width, canvas.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            {
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_pairs {
                    fonts.pair(Name(*name), *font_ref);
                }
            }
            drop(page);

            let raw = canvas.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        log::debug!(
            "PDF assembly: {} pages in {:.1}ms",
            n,
            t0.elapsed().as_secs_f64() * 1000.0,
        );

        Ok(pdf.finish())
    }
}

impl Device for PdfDevice {
    type Page = PdfCanvas;

    fn begin_page(&mut self, width: f32, height: f32) -> PdfCanvas {
        PdfCanvas::new(width, height)
    }

    fn end_page(&mut self, page: PdfCanvas) {
        self.pages.push(page);
    }
}
