//! Two-pass paginated report engine.
//!
//! A [`Report`] supplies an ordered dataset and drawing hooks. The engine
//! walks the dataset once against a null canvas to count pages, then again
//! against the export device, making the same page-break decisions both
//! times.

mod engine;
mod frame;
mod paginate;
mod shell;
mod state;

pub use engine::{ExportSummary, ReportEngine};
pub use frame::{Frame, RunContext};
pub use state::{PageLayout, Pass, RunState};

/// Capability contract of a report. Only [`Report::dataset`] is required at
/// run time; every other hook has a default.
///
/// Drawing hooks take `&self`: they may be called any number of times to
/// measure heights, so they must not change report state. Running totals
/// belong in [`Report::begin_pass`], [`Report::begin_group`] and
/// [`Report::accumulate`], which the engine calls exactly once per committed
/// element in each pass.
pub trait Report {
    type Record;

    /// The ordered records to print. Returning `None` aborts the export.
    fn dataset(&mut self) -> Option<Vec<Self::Record>> {
        None
    }

    /// Receives the dataset back once the export is over.
    fn free_dataset(&mut self, _dataset: Vec<Self::Record>) {}

    /// Whether `current` opens a new group. `previous` is `None` for the
    /// first record.
    fn is_new_group(&self, _current: &Self::Record, _previous: Option<&Self::Record>) -> bool {
        false
    }

    fn title(&self) -> String {
        "Report".to_string()
    }

    fn subtitle(&self) -> String {
        String::new()
    }

    /// Name printed at the top of every page. Falls back to
    /// `ReportConfig::document_name`.
    fn document_name(&self) -> Option<String> {
        None
    }

    fn draw_page_header(&self, frame: &mut Frame<'_>) {
        shell::draw_page_header(frame, &self.title(), &self.subtitle(), |f| {
            self.draw_column_headers(f)
        });
    }

    fn draw_page_footer(&self, frame: &mut Frame<'_>) {
        shell::draw_page_footer(frame);
    }

    fn draw_column_headers(&self, _frame: &mut Frame<'_>) {}

    /// Printed once, on the first page, below the page header.
    fn draw_top_summary(&self, _frame: &mut Frame<'_>) {}

    /// Printed once, on the last page, after the last record.
    fn draw_bottom_summary(&self, _frame: &mut Frame<'_>) {}

    /// Body placeholder for an empty dataset.
    fn draw_empty(&self, frame: &mut Frame<'_>) {
        shell::draw_empty(frame);
    }

    fn draw_line(&self, _frame: &mut Frame<'_>, _record: &Self::Record) {}

    fn draw_group_header(&self, _frame: &mut Frame<'_>, _record: &Self::Record) {}

    /// Recap of a group carried over from the previous page.
    fn draw_group_top_report(&self, _frame: &mut Frame<'_>, _record: &Self::Record) {}

    /// Recap of a group that continues on the next page.
    fn draw_group_bottom_report(&self, _frame: &mut Frame<'_>, _record: &Self::Record) {}

    fn draw_group_footer(&self, _frame: &mut Frame<'_>, _record: &Self::Record) {}

    /// Reset every accumulator. Called at the start of both passes.
    fn begin_pass(&mut self, _pass: Pass) {}

    /// A group header for `record` has just been committed.
    fn begin_group(&mut self, _record: &Self::Record) {}

    /// `record` has just been committed to the page.
    fn accumulate(&mut self, _record: &Self::Record) {}

    fn on_begin_print(&mut self) {}

    fn on_begin_paginate(&mut self) {}

    fn on_end_paginate(&mut self, _pages_count: usize) {}

    fn on_end_print(&mut self) {}
}
