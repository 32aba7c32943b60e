use crate::fonts::LINE_HEIGHT_RATIO;
use crate::model::ReportConfig;

/// Page geometry and font defaults, fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub page_margin: f32,
    pub default_font_size: f32,
    pub line_height: f32,
}

impl PageLayout {
    pub fn from_config(config: &ReportConfig) -> Self {
        let (page_width, page_height) = config.page_dimensions();
        Self {
            page_width,
            page_height,
            page_margin: config.page_margin,
            default_font_size: config.default_font_size,
            line_height: config.default_font_size * LINE_HEIGHT_RATIO,
        }
    }

    /// Cursor position at the top of every page.
    pub fn top(&self) -> f32 {
        self.page_margin
    }

    pub fn bottom(&self) -> f32 {
        self.page_height - self.page_margin
    }

    pub fn body_width(&self) -> f32 {
        self.page_width - 2.0 * self.page_margin
    }
}

/// Which of the two walks over the dataset is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Measure,
    Render,
}

/// Mutable cursor state of one pass. A fresh value starts every pass so
/// the render pass sees exactly what the measurement pass saw.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub last_y: f32,
    pub max_y: f32,
    /// 1-based number of the page being produced; 0 before the first page.
    pub page_num: usize,
    /// Total pages, known once the measurement pass is over.
    pub pages_count: usize,
    /// Index of the last record actually drawn.
    pub last_printed: Option<usize>,
    /// False while a group header has been drawn and its footer has not.
    pub group_footer_printed: bool,
    pub printed_count: usize,
    pub have_groups: bool,
}

impl RunState {
    pub fn new(layout: &PageLayout, pages_count: usize) -> Self {
        Self {
            last_y: layout.top(),
            max_y: layout.bottom(),
            page_num: 0,
            pages_count,
            last_printed: None,
            group_footer_printed: true,
            printed_count: 0,
            have_groups: false,
        }
    }

    /// Index of the first record not drawn yet.
    pub(crate) fn next_record(&self, len: usize) -> Option<usize> {
        let next = self.last_printed.map_or(0, |i| i + 1);
        (next < len).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_record_walks_past_last_printed() {
        let layout = PageLayout::from_config(&ReportConfig::default());
        let mut state = RunState::new(&layout, 0);
        assert_eq!(state.next_record(3), Some(0));
        assert_eq!(state.next_record(0), None);
        state.last_printed = Some(1);
        assert_eq!(state.next_record(3), Some(2));
        state.last_printed = Some(2);
        assert_eq!(state.next_record(3), None);
    }

    #[test]
    fn layout_derives_line_height() {
        let layout = PageLayout::from_config(&ReportConfig::default().font_size(10.0).margin(20.0));
        assert!((layout.line_height - 12.0).abs() < 1e-4);
        assert_eq!(layout.top(), 20.0);
        assert!((layout.bottom() - (841.89 - 20.0)).abs() < 1e-3);
    }
}
