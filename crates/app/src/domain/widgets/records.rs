//! Widget Records

use serde::{Deserialize, Serialize};
use tessera::{
    records::{Entity, InvalidEntity, ScopedRecord},
    uuids::TypedUuid,
};

/// Longest accepted widget name, in characters.
pub const MAX_WIDGET_NAME_LEN: usize = 200;

pub type WidgetUuid = TypedUuid<Widget>;

pub type WidgetRecord = ScopedRecord<Widget>;

/// A named thing owned by a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub description: Option<String>,
}

/// Widget Patch
///
/// Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetPatch {
    pub name: Option<String>,

    /// `Some(Some(text))` sets, `Some(None)` clears, `None` keeps.
    pub description: Option<Option<String>>,
}

impl Entity for Widget {
    const KIND: &'static str = "widget";

    type Patch = WidgetPatch;

    fn apply(&mut self, patch: WidgetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), InvalidEntity> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(InvalidEntity::new("name", "must not be blank"));
        }

        if name.chars().count() > MAX_WIDGET_NAME_LEN {
            return Err(InvalidEntity::new(
                "name",
                format!("must be at most {MAX_WIDGET_NAME_LEN} characters"),
            ));
        }

        Ok(())
    }
}
