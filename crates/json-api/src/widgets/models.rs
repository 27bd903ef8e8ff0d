//! Widget Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tessera_app::domain::widgets::records::WidgetRecord;

/// Widget as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WidgetResponse {
    /// The unique identifier of the widget
    pub uuid: Uuid,

    /// Owning tenant
    pub tenant_uuid: Uuid,

    /// Slug the widget was created under
    pub tenant_slug: Option<String>,

    pub name: String,

    pub description: Option<String>,

    /// The date and time the widget was created
    pub created_at: String,

    /// The date and time the widget was last updated
    pub updated_at: String,
}

impl From<WidgetRecord> for WidgetResponse {
    fn from(record: WidgetRecord) -> Self {
        WidgetResponse {
            uuid: record.meta.uuid.into_uuid(),
            tenant_uuid: record.ownership.tenant.into_uuid(),
            tenant_slug: record.ownership.tenant_slug.as_ref().map(ToString::to_string),
            name: record.data.name,
            description: record.data.description,
            created_at: record.meta.created_at.to_string(),
            updated_at: record.meta.updated_at.to_string(),
        }
    }
}
