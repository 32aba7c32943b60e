#![allow(dead_code)]

use paged_report::report::Pass;
use paged_report::{
    Canvas, Color, Device, Font, Frame, PaperSize, Report, ReportConfig, TextStyle,
};

/// Everything a page received, in drawing order.
#[derive(Debug, Default)]
pub struct RecordedPage {
    pub width: f32,
    pub height: f32,
    /// (baseline, text)
    pub texts: Vec<(f32, String)>,
    pub rects: usize,
    pub rules: usize,
}

impl RecordedPage {
    pub fn labels(&self) -> Vec<&str> {
        self.texts.iter().map(|(_, t)| t.as_str()).collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.texts.iter().any(|(_, t)| t == label)
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.texts.iter().filter(|(_, t)| t.starts_with(prefix)).count()
    }
}

impl Canvas for RecordedPage {
    fn text(&mut self, _x: f32, baseline: f32, text: &str, _style: TextStyle) {
        self.texts.push((baseline, text.to_string()));
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) {
        self.rects += 1;
    }

    fn rule(&mut self, _x0: f32, _x1: f32, _y: f32, _thickness: f32, _color: Color) {
        self.rules += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub pages: Vec<RecordedPage>,
}

impl RecordingDevice {
    pub fn page_labels(&self) -> Vec<Vec<&str>> {
        self.pages.iter().map(|p| p.labels()).collect()
    }
}

impl Device for RecordingDevice {
    type Page = RecordedPage;

    fn begin_page(&mut self, width: f32, height: f32) -> RecordedPage {
        RecordedPage {
            width,
            height,
            ..Default::default()
        }
    }

    fn end_page(&mut self, page: RecordedPage) {
        self.pages.push(page);
    }
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: usize,
    pub group: String,
}

/// Heights, in points, that each hook of [`ScriptedReport`] consumes.
#[derive(Clone, Copy, Debug)]
pub struct Heights {
    pub page_header: f32,
    pub page_footer: f32,
    pub line: f32,
    pub group_header: f32,
    pub group_footer: f32,
    pub top_report: f32,
    pub bottom_report: f32,
    pub top_summary: f32,
    pub bottom_summary: f32,
}

impl Default for Heights {
    fn default() -> Self {
        Self {
            page_header: 0.0,
            page_footer: 0.0,
            line: 20.0,
            group_header: 0.0,
            group_footer: 0.0,
            top_report: 0.0,
            bottom_report: 0.0,
            top_summary: 0.0,
            bottom_summary: 0.0,
        }
    }
}

/// Report whose hooks print a marker label and consume a fixed height,
/// so tests can read page contents back from a [`RecordingDevice`].
///
/// Markers: `PH`, `PF n/m`, `TS`, `BS`, `L<id>`, `GH:<g>`, `GF:<g>`,
/// `TR:<g>`, `BR:<g>`.
pub struct ScriptedReport {
    pub items: Option<Vec<Item>>,
    pub grouped: bool,
    pub heights: Heights,
    pub events: Vec<String>,
    pub passes: Vec<Pass>,
    pub accumulated: usize,
    pub groups_begun: usize,
}

impl ScriptedReport {
    pub fn new(items: Vec<Item>, grouped: bool, heights: Heights) -> Self {
        Self {
            items: Some(items),
            grouped,
            heights,
            events: Vec::new(),
            passes: Vec::new(),
            accumulated: 0,
            groups_begun: 0,
        }
    }

    fn mark(frame: &mut Frame<'_>, label: &str, height: f32) {
        let x = frame.left();
        let style = frame.style(Font::Regular);
        frame.text(x, label, style);
        frame.advance(height);
    }
}

impl Report for ScriptedReport {
    type Record = Item;

    fn dataset(&mut self) -> Option<Vec<Item>> {
        self.items.take()
    }

    fn free_dataset(&mut self, dataset: Vec<Item>) {
        self.events.push(format!("free:{}", dataset.len()));
        self.items = Some(dataset);
    }

    fn is_new_group(&self, current: &Item, previous: Option<&Item>) -> bool {
        self.grouped && previous.is_none_or(|p| p.group != current.group)
    }

    fn draw_page_header(&self, frame: &mut Frame<'_>) {
        Self::mark(frame, "PH", self.heights.page_header);
    }

    fn draw_page_footer(&self, frame: &mut Frame<'_>) {
        let label = format!("PF {}/{}", frame.page_num(), frame.pages_count());
        Self::mark(frame, &label, self.heights.page_footer);
    }

    fn draw_top_summary(&self, frame: &mut Frame<'_>) {
        Self::mark(frame, "TS", self.heights.top_summary);
    }

    fn draw_bottom_summary(&self, frame: &mut Frame<'_>) {
        Self::mark(frame, "BS", self.heights.bottom_summary);
    }

    fn draw_line(&self, frame: &mut Frame<'_>, item: &Item) {
        Self::mark(frame, &format!("L{}", item.id), self.heights.line);
    }

    fn draw_group_header(&self, frame: &mut Frame<'_>, item: &Item) {
        Self::mark(frame, &format!("GH:{}", item.group), self.heights.group_header);
    }

    fn draw_group_top_report(&self, frame: &mut Frame<'_>, item: &Item) {
        Self::mark(frame, &format!("TR:{}", item.group), self.heights.top_report);
    }

    fn draw_group_bottom_report(&self, frame: &mut Frame<'_>, item: &Item) {
        Self::mark(frame, &format!("BR:{}", item.group), self.heights.bottom_report);
    }

    fn draw_group_footer(&self, frame: &mut Frame<'_>, item: &Item) {
        Self::mark(frame, &format!("GF:{}", item.group), self.heights.group_footer);
    }

    fn begin_pass(&mut self, pass: Pass) {
        self.passes.push(pass);
        self.accumulated = 0;
        self.groups_begun = 0;
    }

    fn begin_group(&mut self, _item: &Item) {
        self.groups_begun += 1;
    }

    fn accumulate(&mut self, _item: &Item) {
        self.accumulated += 1;
    }

    fn on_begin_print(&mut self) {
        self.events.push("begin_print".into());
    }

    fn on_begin_paginate(&mut self) {
        self.events.push("begin_paginate".into());
    }

    fn on_end_paginate(&mut self, pages_count: usize) {
        self.events.push(format!("end_paginate:{pages_count}"));
    }

    fn on_end_print(&mut self) {
        self.events.push("end_print".into());
    }
}

/// Items with ids 0.., grouped as given by `sizes` into groups "A", "B", ...
pub fn grouped_items(sizes: &[usize]) -> Vec<Item> {
    let mut items = Vec::new();
    for (g, &size) in sizes.iter().enumerate() {
        let group = group_name(g);
        for _ in 0..size {
            items.push(Item {
                id: items.len(),
                group: group.clone(),
            });
        }
    }
    items
}

pub fn plain_items(n: usize) -> Vec<Item> {
    grouped_items(&[n])
}

pub fn group_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    if index < 26 {
        letter.to_string()
    } else {
        format!("{letter}{}", index / 26)
    }
}

/// Page of `height` points with no margin, so hook heights alone decide
/// the layout.
pub fn config(height: f32) -> ReportConfig {
    ReportConfig::default()
        .paper_size(PaperSize::Custom(400.0, height))
        .margin(0.0)
}

/// Small deterministic generator for varied datasets.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_in(&mut self, lo: usize, hi: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        lo + ((self.0 >> 33) as usize) % (hi - lo + 1)
    }
}
