//! Widgets service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tessera::{records::Entity, tenancy::TenantContext};

use crate::{
    domain::widgets::{
        data::{NewWidget, WidgetUpdate},
        errors::WidgetsServiceError,
        records::{Widget, WidgetRecord, WidgetUuid},
    },
    store::{Page, TenantScopedStore},
};

/// Widgets service over any [`TenantScopedStore`].
#[derive(Clone)]
pub struct StoreWidgetsService {
    store: Arc<dyn TenantScopedStore<Widget>>,
}

impl StoreWidgetsService {
    #[must_use]
    pub fn new(store: Arc<dyn TenantScopedStore<Widget>>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for StoreWidgetsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWidgetsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl WidgetsService for StoreWidgetsService {
    async fn list_widgets(
        &self,
        ctx: &TenantContext,
        page: Page,
    ) -> Result<Vec<WidgetRecord>, WidgetsServiceError> {
        Ok(self.store.find_all_for_tenant(ctx, page).await?)
    }

    async fn get_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
    ) -> Result<WidgetRecord, WidgetsServiceError> {
        self.store
            .find_by_id(ctx, widget)
            .await?
            .ok_or(WidgetsServiceError::NotFound)
    }

    async fn create_widget(
        &self,
        ctx: &TenantContext,
        widget: NewWidget,
    ) -> Result<WidgetRecord, WidgetsServiceError> {
        let widget = Widget::from(widget);

        widget.validate()?;

        Ok(self.store.create(ctx, widget).await?)
    }

    async fn update_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
        update: WidgetUpdate,
    ) -> Result<WidgetRecord, WidgetsServiceError> {
        if let Some(name) = &update.name {
            Widget {
                name: name.clone(),
                description: None,
            }
            .validate()?;
        }

        self.store
            .update(ctx, widget, update)
            .await?
            .ok_or(WidgetsServiceError::NotFound)
    }

    async fn delete_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
    ) -> Result<(), WidgetsServiceError> {
        if self.store.soft_delete(ctx, widget).await?.is_found() {
            Ok(())
        } else {
            Err(WidgetsServiceError::NotFound)
        }
    }
}

#[automock]
#[async_trait]
pub trait WidgetsService: Send + Sync {
    /// Live widgets of the tenant, oldest first.
    async fn list_widgets(
        &self,
        ctx: &TenantContext,
        page: Page,
    ) -> Result<Vec<WidgetRecord>, WidgetsServiceError>;

    async fn get_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
    ) -> Result<WidgetRecord, WidgetsServiceError>;

    async fn create_widget(
        &self,
        ctx: &TenantContext,
        widget: NewWidget,
    ) -> Result<WidgetRecord, WidgetsServiceError>;

    async fn update_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
        update: WidgetUpdate,
    ) -> Result<WidgetRecord, WidgetsServiceError>;

    /// Soft delete. Deleting an already deleted widget succeeds.
    async fn delete_widget(
        &self,
        ctx: &TenantContext,
        widget: WidgetUuid,
    ) -> Result<(), WidgetsServiceError>;
}
