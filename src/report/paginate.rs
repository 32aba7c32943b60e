use crate::canvas::{Canvas, Device};

use super::Report;
use super::frame::{self, RunContext};
use super::state::{Pass, RunState};

enum Placement {
    Placed,
    Break,
}

/// One walk over the dataset. Both passes run this same code; only the
/// device differs.
pub(crate) struct PassRun<'a, R: Report> {
    report: &'a mut R,
    records: &'a [R::Record],
    ctx: &'a RunContext,
    group_on_new_page: bool,
    pass: Pass,
    /// Whether the current page may end before holding any record. Only the
    /// first page can, when the top summary took part of it.
    may_defer_empty_page: bool,
}

impl<'a, R: Report> PassRun<'a, R> {
    pub(crate) fn new(
        report: &'a mut R,
        records: &'a [R::Record],
        ctx: &'a RunContext,
        group_on_new_page: bool,
        pass: Pass,
    ) -> Self {
        Self {
            report,
            records,
            ctx,
            group_on_new_page,
            pass,
            may_defer_empty_page: false,
        }
    }

    /// Lay out every page on `device`. `pages_count` is what page footers
    /// print as the total; zero while measuring.
    pub(crate) fn run<D: Device>(mut self, device: &mut D, pages_count: usize) -> RunState {
        let layout = self.ctx.layout;
        let mut state = RunState::new(&layout, pages_count);
        self.report.begin_pass(self.pass);

        loop {
            let mut page = device.begin_page(layout.page_width, layout.page_height);
            let more = self.draw_page(&mut page, &mut state);
            device.end_page(page);
            if !more {
                break;
            }
        }

        log::debug!(
            "{:?} pass: {} pages, {} of {} records printed",
            self.pass,
            state.page_num,
            state.printed_count,
            self.records.len(),
        );
        state
    }

    /// Draw one page. Returns whether another page is needed.
    fn draw_page(&mut self, canvas: &mut dyn Canvas, state: &mut RunState) -> bool {
        let ctx = self.ctx;
        let report = &*self.report;

        state.page_num += 1;
        state.last_y = ctx.layout.top();
        state.max_y = ctx.layout.bottom();
        let footer_h = frame::measure(ctx, state, |f| report.draw_page_footer(f));
        state.max_y = ctx.layout.bottom() - footer_h;

        frame::draw(canvas, ctx, state, |f| report.draw_page_header(f));

        self.may_defer_empty_page = false;
        if state.page_num == 1 && !self.records.is_empty() {
            let before = state.last_y;
            frame::draw(canvas, ctx, state, |f| report.draw_top_summary(f));
            self.may_defer_empty_page = state.last_y > before;
        }

        let is_last = if self.records.is_empty() {
            frame::draw(canvas, ctx, state, |f| report.draw_empty(f));
            true
        } else {
            self.draw_body(canvas, state)
        };

        state.last_y = state.last_y.max(state.max_y);
        let report = &*self.report;
        frame::draw(canvas, ctx, state, |f| report.draw_page_footer(f));

        log::debug!(
            "{:?} pass: page {} done, last record {:?}",
            self.pass,
            state.page_num,
            state.last_printed,
        );
        !is_last
    }

    /// Place records until the page is full or the dataset is exhausted.
    /// Returns whether this page is the last one.
    fn draw_body(&mut self, canvas: &mut dyn Canvas, state: &mut RunState) -> bool {
        let len = self.records.len();
        let mut cursor = state.next_record(len);
        let mut placed = 0usize;

        while let Some(index) = cursor {
            match self.place(canvas, state, index, placed) {
                Placement::Placed => {
                    placed += 1;
                    cursor = state.next_record(len);
                }
                Placement::Break => break,
            }
        }

        if cursor.is_some() {
            return false;
        }

        self.close_group(canvas, state);

        let ctx = self.ctx;
        let report = &*self.report;
        let summary_h = frame::measure(ctx, state, |f| report.draw_bottom_summary(f));
        let fits = state.last_y + summary_h <= state.max_y;
        if !fits && placed > 0 {
            // Carried alone to the next page.
            return false;
        }
        if !fits {
            self.warn_overflow(state, "bottom summary");
        }
        frame::draw(canvas, ctx, state, |f| report.draw_bottom_summary(f));
        true
    }

    /// Try to put record `index` on the current page, with whatever group
    /// header or continuation report must precede it.
    fn place(
        &mut self,
        canvas: &mut dyn Canvas,
        state: &mut RunState,
        index: usize,
        placed: usize,
    ) -> Placement {
        let ctx = self.ctx;
        let records = self.records;
        let record = &records[index];
        let previous = index.checked_sub(1).map(|i| &records[i]);
        let may_break = placed > 0 || self.may_defer_empty_page;

        let report = &*self.report;
        let starts_group = report.is_new_group(record, previous);
        let closes_group = match records.get(index + 1) {
            Some(next) => report.is_new_group(next, Some(record)),
            None => true,
        };
        let group_open = starts_group || !state.group_footer_printed;

        // Room that must stay free below this line: the group footer if the
        // group ends here, the continuation report otherwise.
        let end_reserve = if !closes_group {
            frame::measure(ctx, state, |f| report.draw_group_bottom_report(f, record))
        } else if group_open {
            frame::measure(ctx, state, |f| report.draw_group_footer(f, record))
        } else {
            0.0
        };
        let line_h = frame::measure(ctx, state, |f| report.draw_line(f, record));

        if starts_group {
            state.have_groups = true;

            self.close_group(canvas, state);

            if self.group_on_new_page && placed > 0 {
                return Placement::Break;
            }

            let header_h = frame::measure(ctx, state, |f| report.draw_group_header(f, record));
            if state.last_y + header_h + line_h + end_reserve > state.max_y {
                if may_break {
                    return Placement::Break;
                }
                self.warn_overflow(state, "group header");
            }

            frame::draw(canvas, ctx, state, |f| report.draw_group_header(f, record));
            state.group_footer_printed = false;
            self.report.begin_group(record);
        } else if placed == 0 && state.have_groups {
            frame::draw(canvas, ctx, state, |f| report.draw_group_top_report(f, record));
        } else if state.last_y + line_h + end_reserve > state.max_y {
            if may_break {
                frame::draw(canvas, ctx, state, |f| {
                    report.draw_group_bottom_report(f, record)
                });
                return Placement::Break;
            }
            self.warn_overflow(state, "line");
        }

        let report = &*self.report;
        frame::draw(canvas, ctx, state, |f| report.draw_line(f, record));
        self.report.accumulate(record);
        state.last_printed = Some(index);
        if self.pass == Pass::Render {
            state.printed_count += 1;
        }

        if closes_group {
            self.close_group(canvas, state);
        }

        Placement::Placed
    }

    /// Print the footer of the open group, if any, under the last record
    /// drawn. A group's footer normally follows its closing line, which
    /// reserved room for it; group starts and the end of the dataset call
    /// this too so that a footer is never skipped.
    fn close_group(&self, canvas: &mut dyn Canvas, state: &mut RunState) {
        if state.group_footer_printed {
            return;
        }
        let report = &*self.report;
        if let Some(last) = state.last_printed.map(|i| &self.records[i]) {
            frame::draw(canvas, self.ctx, state, |f| report.draw_group_footer(f, last));
        }
        state.group_footer_printed = true;
    }

    fn warn_overflow(&self, state: &RunState, what: &str) {
        if self.pass == Pass::Render {
            log::warn!(
                "page {}: {} does not fit on an empty page, letting it overflow",
                state.page_num,
                what,
            );
        }
    }
}
