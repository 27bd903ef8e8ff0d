//! Widgets Data

use crate::domain::widgets::records::{Widget, WidgetPatch};

/// New Widget Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWidget {
    pub name: String,
    pub description: Option<String>,
}

impl From<NewWidget> for Widget {
    fn from(widget: NewWidget) -> Self {
        Self {
            name: widget.name,
            description: widget.description,
        }
    }
}

/// Widget Update Data
pub type WidgetUpdate = WidgetPatch;
