mod canvas;
mod error;
mod fonts;
mod model;
mod pdf;
pub mod report;
mod table;

pub use canvas::{Canvas, Device, NullCanvas, TextStyle};
pub use error::Error;
pub use fonts::{Font, text_width, wrap_text};
pub use model::{Alignment, Color, Orientation, PaperSize, ReportConfig};
pub use pdf::{PdfCanvas, PdfDevice};
pub use report::{ExportSummary, Frame, Report, ReportEngine};
pub use table::{Column, Row, TableReport, format_amount, parse_amount, parse_delimited};

use std::path::Path;

/// Export `report` to a PDF file at `output` using `config`.
pub fn export_report<R: Report>(
    report: &mut R,
    config: ReportConfig,
    output: &Path,
) -> Result<ExportSummary, Error> {
    ReportEngine::new(config).export(report, output)
}
