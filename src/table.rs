use crate::error::Error;
use crate::fonts::Font;
use crate::model::{Alignment, Color};
use crate::report::{Frame, Pass, Report};

pub type Row = Vec<String>;

#[derive(Clone, Debug)]
pub struct Column {
    pub title: String,
    /// Share of the body width, relative to the other columns.
    pub weight: f32,
    pub align: Alignment,
    /// Whether the column holds amounts to total per group and overall.
    pub summed: bool,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            weight: 1.0,
            align: Alignment::Left,
            summed: false,
        }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Mark as an amount column: totalled and right-aligned.
    pub fn summed(mut self) -> Self {
        self.summed = true;
        self.align = Alignment::Right;
        self
    }
}

/// Generic tabular report over rows of strings, optionally grouped on one
/// column, with subtotals for the summed columns.
pub struct TableReport {
    title: String,
    subtitle: String,
    description: Option<String>,
    columns: Vec<Column>,
    rows: Option<Vec<Row>>,
    group_by: Option<usize>,
    group_totals: Vec<f64>,
    group_lines: usize,
    grand_totals: Vec<f64>,
    line_count: usize,
}

const CELL_PADDING: f32 = 3.0;

impl TableReport {
    pub fn new(title: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let n = columns.len();
        Self {
            title: title.into(),
            subtitle: String::new(),
            description: None,
            columns,
            rows: Some(rows),
            group_by: None,
            group_totals: vec![0.0; n],
            group_lines: 0,
            grand_totals: vec![0.0; n],
            line_count: 0,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Text printed once under the header of the first page.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Group consecutive rows sharing the value of column `index`.
    pub fn group_by(mut self, index: usize) -> Self {
        self.group_by = Some(index).filter(|&i| i < self.columns.len());
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn grand_totals(&self) -> &[f64] {
        &self.grand_totals
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    fn has_totals(&self) -> bool {
        self.columns.iter().any(|c| c.summed)
    }

    fn group_key<'r>(&self, row: &'r Row) -> &'r str {
        self.group_by
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// (x, width) of each column across the body.
    fn column_boxes(&self, frame: &Frame<'_>) -> Vec<(f32, f32)> {
        let total: f32 = self.columns.iter().map(|c| c.weight.max(0.0)).sum();
        let total = if total > 0.0 { total } else { 1.0 };
        let mut x = frame.left();
        self.columns
            .iter()
            .map(|c| {
                let w = frame.width() * c.weight.max(0.0) / total;
                let b = (x + CELL_PADDING, (w - 2.0 * CELL_PADDING).max(0.0));
                x += w;
                b
            })
            .collect()
    }

    /// `label` in the first column, then the given totals under the summed
    /// columns, then a new line.
    fn totals_row(&self, frame: &mut Frame<'_>, label: &str, totals: &[f64], font: Font) {
        let boxes = self.column_boxes(frame);
        let label_x = boxes.first().map_or(frame.left(), |b| b.0);
        let style = frame.style(font);
        frame.text(label_x, label, style);
        for ((column, (x, w)), total) in self.columns.iter().zip(&boxes).zip(totals) {
            if column.summed {
                frame.text_in(*x, *w, &format_amount(*total), Alignment::Right, font);
            }
        }
        frame.new_line();
    }
}

impl Report for TableReport {
    type Record = Row;

    fn dataset(&mut self) -> Option<Vec<Row>> {
        self.rows.take()
    }

    fn free_dataset(&mut self, dataset: Vec<Row>) {
        self.rows = Some(dataset);
    }

    fn is_new_group(&self, current: &Row, previous: Option<&Row>) -> bool {
        if self.group_by.is_none() {
            return false;
        }
        previous.is_none_or(|p| self.group_key(p) != self.group_key(current))
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        self.subtitle.clone()
    }

    fn draw_column_headers(&self, frame: &mut Frame<'_>) {
        if self.columns.is_empty() {
            return;
        }
        let boxes = self.column_boxes(frame);
        for (column, (x, w)) in self.columns.iter().zip(boxes) {
            frame.text_in(x, w, &column.title, column.align, Font::Bold);
        }
        frame.new_line();
    }

    fn draw_top_summary(&self, frame: &mut Frame<'_>) {
        if let Some(description) = &self.description {
            let (x, w) = (frame.left(), frame.width());
            frame.wrapped(x, w, description, Alignment::Left, Font::Italic);
            let gap = frame.line_height() / 2.0;
            frame.advance(gap);
        }
    }

    fn draw_line(&self, frame: &mut Frame<'_>, row: &Row) {
        let boxes = self.column_boxes(frame);
        for ((column, (x, w)), cell) in self.columns.iter().zip(boxes).zip(row) {
            frame.text_in(x, w, cell, column.align, Font::Regular);
        }
        frame.new_line();
    }

    fn draw_group_header(&self, frame: &mut Frame<'_>, row: &Row) {
        let Some(index) = self.group_by else {
            return;
        };
        let gap = frame.line_height() / 3.0;
        frame.advance(gap);
        let label = format!("{}: {}", self.columns[index].title, self.group_key(row));
        frame.line(&label, Alignment::Left, Font::Bold);
    }

    fn draw_group_top_report(&self, frame: &mut Frame<'_>, row: &Row) {
        if self.group_by.is_none() {
            return;
        }
        let label = format!("{} (continued), brought forward", self.group_key(row));
        frame.set_font_size(frame.font_size() * 0.9);
        self.totals_row(frame, &label, &self.group_totals, Font::Italic);
    }

    fn draw_group_bottom_report(&self, frame: &mut Frame<'_>, row: &Row) {
        if self.group_by.is_none() {
            return;
        }
        let label = format!("{}, carried forward", self.group_key(row));
        frame.set_font_size(frame.font_size() * 0.9);
        self.totals_row(frame, &label, &self.group_totals, Font::Italic);
    }

    fn draw_group_footer(&self, frame: &mut Frame<'_>, row: &Row) {
        if self.group_by.is_none() {
            return;
        }
        frame.rule(0.3, Color::GRAY);
        frame.advance(1.0);
        let label = format!("Total {} ({} lines)", self.group_key(row), self.group_lines);
        self.totals_row(frame, &label, &self.group_totals, Font::Bold);
    }

    fn draw_bottom_summary(&self, frame: &mut Frame<'_>) {
        if !self.has_totals() && self.group_by.is_none() {
            return;
        }
        let gap = frame.line_height() / 2.0;
        frame.advance(gap);
        frame.rule(0.8, Color::BLACK);
        frame.advance(2.0);
        let label = format!("Grand total ({} lines)", self.line_count);
        self.totals_row(frame, &label, &self.grand_totals, Font::Bold);
    }

    fn begin_pass(&mut self, _pass: Pass) {
        self.group_totals.fill(0.0);
        self.grand_totals.fill(0.0);
        self.group_lines = 0;
        self.line_count = 0;
    }

    fn begin_group(&mut self, _row: &Row) {
        self.group_totals.fill(0.0);
        self.group_lines = 0;
    }

    fn accumulate(&mut self, row: &Row) {
        for (i, column) in self.columns.iter().enumerate() {
            if !column.summed {
                continue;
            }
            let amount = row.get(i).and_then(|cell| parse_amount(cell)).unwrap_or(0.0);
            self.group_totals[i] += amount;
            self.grand_totals[i] += amount;
        }
        self.group_lines += 1;
        self.line_count += 1;
    }
}

/// Parse an amount cell, ignoring thousands separators and blanks.
pub fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '\'')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

pub fn format_amount(value: f64) -> String {
    let raw = format!("{:.2}", value.abs());
    let (int_part, frac) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    // Sign of the rounded value: -0.001 prints as 0.00.
    let rounds_to_zero = raw.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !rounds_to_zero { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Split delimited text into rows. Fields may be quoted, span several
/// lines, and use `""` for a literal quote. Blank lines are skipped and
/// rows may have differing lengths.
pub fn parse_delimited(text: &str, delimiter: char) -> Result<Vec<Row>, Error> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(Error::Delimiter(delimiter))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
