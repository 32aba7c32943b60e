#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    /// Portrait width and height in points.
    Custom(f32, f32),
}

impl PaperSize {
    /// Portrait (width, height) in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Custom(w, h) => (w, h),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(PaperSize::A4),
            "a5" => Some(PaperSize::A5),
            "letter" => Some(PaperSize::Letter),
            "legal" => Some(PaperSize::Legal),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GRAY: Color = Color(0x60, 0x60, 0x60);
    pub const HEADER_BAND: Color = Color(0xd8, 0xe0, 0xe8);

    pub(crate) fn rgb(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Run-scoped configuration of a report export. Nothing here is persisted.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub default_font_size: f32,
    pub page_margin: f32,
    pub group_on_new_page: bool,
    pub document_name: Option<String>,
    pub producer: String,
    /// Shown after a successful export; `{pages}` is replaced by the page count.
    pub success_message: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            default_font_size: 10.0,
            page_margin: 28.0,
            group_on_new_page: false,
            document_name: None,
            producer: concat!("paged-report ", env!("CARGO_PKG_VERSION")).to_string(),
            success_message: None,
        }
    }
}

impl ReportConfig {
    pub fn paper_size(mut self, paper_size: PaperSize) -> Self {
        self.paper_size = paper_size;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.page_margin = margin;
        self
    }

    pub fn group_on_new_page(mut self, enabled: bool) -> Self {
        self.group_on_new_page = enabled;
        self
    }

    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    pub fn producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Page (width, height) in points after applying the orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}
