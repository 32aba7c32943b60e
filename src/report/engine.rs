use std::path::Path;
use std::time::Instant;

use crate::canvas::{Device, NullDevice};
use crate::error::Error;
use crate::model::{Orientation, PaperSize, ReportConfig};
use crate::pdf::PdfDevice;

use super::Report;
use super::frame::RunContext;
use super::paginate::PassRun;
use super::state::{PageLayout, Pass};

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSummary {
    pub pages_count: usize,
    pub printed_count: usize,
    pub message: String,
}

/// Drives a [`Report`] through measurement and rendering and reports the
/// outcome to the caller.
#[derive(Debug, Default)]
pub struct ReportEngine {
    config: ReportConfig,
    pages_count: usize,
    message: Option<String>,
}

impl ReportEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            pages_count: 0,
            message: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ReportConfig {
        &mut self.config
    }

    pub fn configure(
        &mut self,
        paper_size: PaperSize,
        orientation: Orientation,
        default_font_size: f32,
        group_on_new_page: bool,
    ) {
        self.config.paper_size = paper_size;
        self.config.orientation = orientation;
        self.config.default_font_size = default_font_size;
        self.config.group_on_new_page = group_on_new_page;
    }

    /// Page count of the last export; zero if it failed or none ran yet.
    pub fn pages_count(&self) -> usize {
        self.pages_count
    }

    /// Success or failure message of the last [`ReportEngine::run`].
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Export `report` as a PDF file and remember the outcome message.
    /// Returns whether the export succeeded.
    pub fn run<R: Report>(&mut self, report: &mut R, destination: &Path) -> bool {
        match self.export(report, destination) {
            Ok(summary) => {
                log::info!("{}", summary.message);
                self.message = Some(summary.message);
                true
            }
            Err(e) => {
                log::error!("Report export failed: {e}");
                self.message = Some(format!("Unable to export the report: {e}"));
                false
            }
        }
    }

    /// Export `report` as a PDF file at `destination`.
    pub fn export<R: Report>(
        &mut self,
        report: &mut R,
        destination: &Path,
    ) -> Result<ExportSummary, Error> {
        let t0 = Instant::now();

        let mut device = PdfDevice::new(report.title(), self.config.producer.clone());
        let summary = self.render(report, &mut device)?;
        let t_render = t0.elapsed();

        // Nothing reached the destination on failure, so no pages were printed.
        let bytes = device.finish().inspect_err(|_| self.pages_count = 0)?;
        let t_assembly = t0.elapsed();

        std::fs::write(destination, &bytes).map_err(|e| {
            self.pages_count = 0;
            Error::write_failed(e, destination)
        })?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: render={:.1}ms, assembly={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
            t_render.as_secs_f64() * 1000.0,
            (t_assembly - t_render).as_secs_f64() * 1000.0,
            (t_total - t_assembly).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            bytes.len(),
        );

        Ok(summary)
    }

    /// Paginate `report`, then render it page by page onto `device`.
    pub fn render<R: Report, D: Device>(
        &mut self,
        report: &mut R,
        device: &mut D,
    ) -> Result<ExportSummary, Error> {
        self.pages_count = 0;

        let Some(records) = report.dataset() else {
            return Err(Error::MissingDataset);
        };

        let ctx = self.run_context(report.document_name());
        let group_on_new_page = self.config.group_on_new_page;
        let t0 = Instant::now();

        report.on_begin_print();
        report.on_begin_paginate();
        let measured = PassRun::new(report, &records, &ctx, group_on_new_page, Pass::Measure)
            .run(&mut NullDevice, 0);
        let pages_count = measured.page_num;
        report.on_end_paginate(pages_count);
        let t_paginate = t0.elapsed();

        let rendered = PassRun::new(report, &records, &ctx, group_on_new_page, Pass::Render)
            .run(device, pages_count);
        if rendered.page_num != pages_count {
            log::warn!(
                "Render pass produced {} pages, pagination announced {}",
                rendered.page_num,
                pages_count,
            );
        }
        report.on_end_print();
        let t_render = t0.elapsed();

        log::info!(
            "Report phases: paginate={:.1}ms, render={:.1}ms ({} records, {} pages)",
            t_paginate.as_secs_f64() * 1000.0,
            (t_render - t_paginate).as_secs_f64() * 1000.0,
            records.len(),
            pages_count,
        );

        report.free_dataset(records);
        self.pages_count = pages_count;

        Ok(ExportSummary {
            pages_count,
            printed_count: rendered.printed_count,
            message: self.success_message(pages_count),
        })
    }

    fn run_context(&self, document_name: Option<String>) -> RunContext {
        RunContext {
            layout: PageLayout::from_config(&self.config),
            document_name: document_name
                .or_else(|| self.config.document_name.clone())
                .unwrap_or_default(),
            producer: self.config.producer.clone(),
            printed_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    fn success_message(&self, pages_count: usize) -> String {
        match &self.config.success_message {
            Some(template) => template.replace("{pages}", &pages_count.to_string()),
            None if pages_count == 1 => "1 page successfully printed".to_string(),
            None => format!("{pages_count} pages successfully printed"),
        }
    }
}
