use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed card palette. Cycling advances through this list in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Gray,
}

impl Default for NoteColor {
    fn default() -> Self {
        Self::Blue
    }
}

impl NoteColor {
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Blue,
        NoteColor::Red,
        NoteColor::Green,
        NoteColor::Yellow,
        NoteColor::Purple,
        NoteColor::Gray,
    ];

    /// The palette entry after this one, wrapping at the end.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
            Self::Gray => "Gray",
        }
    }
}

/// Field names follow the persisted JSON format (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<NaiveDateTime>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            labels: Vec::new(),
            color: NoteColor::default(),
            is_pinned: false,
            created_at: chrono::Local::now().naive_local(),
            reminder: None,
        }
    }
}

/// Split a comma-separated label input into trimmed, non-empty labels.
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
