use phishreport_types::{CampaignStatus, Color};

/// Horizontal placement of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// One table column: its header, relative width and alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    pub weight: f32,
    pub align: Align,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, weight: f32, align: Align) -> Self {
        Self {
            header: header.into(),
            weight: weight.max(0.0),
            align,
        }
    }

    pub fn text(header: impl Into<String>, weight: f32) -> Self {
        Self::new(header, weight, Align::Left)
    }

    pub fn numeric(header: impl Into<String>, weight: f32) -> Self {
        Self::new(header, weight, Align::Right)
    }

    pub fn centered(header: impl Into<String>, weight: f32) -> Self {
        Self::new(header, weight, Align::Center)
    }

    /// A centred column whose cells are campaign statuses.
    pub fn status(header: impl Into<String>, weight: f32) -> Self {
        Self::centered(header, weight)
    }
}

/// A titled table ready to be drawn.
///
/// Rows are pre-formatted strings; each row should have one cell per column.
/// Missing cells render empty and extra cells are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
    /// Column whose text is matched against the campaign status vocabulary.
    pub status_column: Option<usize>,
    pub empty_message: String,
}

impl SectionSpec {
    pub fn new(title: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            status_column: None,
            empty_message: "No data available".to_string(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_status_column(mut self, index: usize) -> Self {
        self.status_column = Some(index);
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Absolute column widths for a table `total_width` wide.
    ///
    /// Falls back to equal widths when every weight is zero.
    pub fn column_widths(&self, total_width: f32) -> Vec<f32> {
        let sum: f32 = self.columns.iter().map(|c| c.weight).sum();
        if sum <= 0.0 {
            let n = self.columns.len().max(1) as f32;
            return vec![total_width / n; self.columns.len()];
        }
        self.columns
            .iter()
            .map(|c| total_width * c.weight / sum)
            .collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A summary metric tile.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSpec {
    pub label: String,
    pub value: String,
    pub accent: Color,
}

impl CardSpec {
    pub fn new(label: impl Into<String>, value: impl Into<String>, accent: Color) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            accent,
        }
    }
}

/// Colour for a status cell, or `None` when the text is not a known status.
pub fn status_color(text: &str) -> Option<Color> {
    match CampaignStatus::parse(text) {
        CampaignStatus::Active => Some(Color::GREEN),
        CampaignStatus::Completed => Some(Color::BLUE),
        CampaignStatus::Draft => Some(Color::MUTED),
        CampaignStatus::Paused => Some(Color::AMBER),
        CampaignStatus::Scheduled => Some(Color::NAVY),
        CampaignStatus::Canceled => Some(Color::RED),
        CampaignStatus::Other(_) => None,
    }
}
