use serde::{Deserialize, Serialize};

use crate::data::{StatusLevel, StatusMessage};
use crate::error::LabResult;
use crate::page::ChartDatum;
use crate::render::{RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
}

/// A drawn chart together with the data it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBlock {
    pub kind: ChartKind,
    pub data: Vec<ChartDatum>,
    pub frame: RenderFrame,
    pub caption: String,
}

/// One element of the rendered page, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum PageBlock {
    Title { text: String },
    Text { text: String },
    Divider,
    Header { text: String },
    Subheader { text: String },
    Status(StatusMessage),
    TextInput { label: String, value: String },
    Slider {
        label: String,
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    Chart(ChartBlock),
}

/// Output of one full top-to-bottom page render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub icon: String,
    pub blocks: Vec<PageBlock>,
}

impl Page {
    #[must_use]
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: PageBlock) {
        self.blocks.push(block);
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartBlock> {
        self.blocks.iter().filter_map(|block| match block {
            PageBlock::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> Option<&ChartBlock> {
        self.charts().find(|chart| chart.kind == kind)
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusMessage> {
        self.blocks.iter().filter_map(|block| match block {
            PageBlock::Status(status) => Some(status),
            _ => None,
        })
    }

    /// Whether any status banner of `level` carries exactly `text`.
    #[must_use]
    pub fn has_status(&self, level: StatusLevel, text: &str) -> bool {
        self.statuses()
            .any(|status| status.level == level && status.text == text)
    }

    /// Section headings (`Subheader` blocks) in display order.
    pub fn subheaders(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            PageBlock::Subheader { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Passes every chart frame to `renderer` in page order.
    pub fn draw_charts<R: Renderer>(&self, renderer: &mut R) -> LabResult<usize> {
        let mut drawn = 0;
        for chart in self.charts() {
            renderer.render(&chart.frame)?;
            drawn += 1;
        }
        Ok(drawn)
    }
}
