use crate::entities::Property;
use crate::errors::DomainError;
use crate::notifications::{Notice, Notifier};
use crate::repositories::{AuthRepository, PropertyRepository};
use crate::services::filter::{PriceFilter, PropertyFilter, TypeFilter};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where the front end should go after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard,
    Auth,
}

/// Dashboard state. The visible set is re-derived on every change, so it
/// always equals `filter.apply(&properties)`.
#[derive(Debug, Clone, Default)]
pub struct ListingState {
    properties: Vec<Property>,
    filter: PropertyFilter,
    visible: Vec<Property>,
    loading: bool,
}

impl ListingState {
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn visible(&self) -> &[Property] {
        &self.visible
    }

    pub fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    fn set_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
        self.refresh_visible();
    }

    fn set_filter(&mut self, filter: PropertyFilter) {
        self.filter = filter;
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = self.filter.apply(&self.properties);
    }
}

pub struct ListingController {
    property_repository: Arc<dyn PropertyRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    notifier: Arc<dyn Notifier>,
    state: ListingState,
}

impl ListingController {
    pub fn new(
        property_repository: Arc<dyn PropertyRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            property_repository,
            auth_repository,
            notifier,
            state: ListingState::default(),
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Session check then initial load. Without a session nothing is fetched.
    pub async fn activate(&mut self) -> Result<Navigation, DomainError> {
        let session = match self.auth_repository.get_session().await {
            Ok(session) => session,
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                return Err(e);
            }
        };
        if session.is_none() {
            debug!("No active session, redirecting to sign in");
            return Ok(Navigation::Auth);
        }
        self.reload().await?;
        Ok(Navigation::Dashboard)
    }

    /// Fetch the full listing set. On failure the previous set is kept.
    pub async fn reload(&mut self) -> Result<(), DomainError> {
        self.state.loading = true;
        let result = self.property_repository.find_all().await;
        self.state.loading = false;

        match result {
            Ok(properties) => {
                debug!("Loaded {} properties", properties.len());
                self.state.set_properties(properties);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load properties: {}", e);
                self.notifier.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let filter = PropertyFilter {
            search_query: query.into(),
            ..self.state.filter.clone()
        };
        self.state.set_filter(filter);
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        let filter = PropertyFilter {
            type_filter,
            ..self.state.filter.clone()
        };
        self.state.set_filter(filter);
    }

    pub fn set_price_filter(&mut self, price_filter: PriceFilter) {
        let filter = PropertyFilter {
            price_filter,
            ..self.state.filter.clone()
        };
        self.state.set_filter(filter);
    }

    pub fn set_filter(&mut self, filter: PropertyFilter) {
        self.state.set_filter(filter);
    }

    /// Delete then reload. No optimistic removal: a failed delete leaves the
    /// listing set as it was. Once the row is gone the delete counts as done,
    /// even if the reload fails.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), DomainError> {
        if let Err(e) = self.property_repository.delete(id).await {
            warn!(%id, "Failed to delete property: {}", e);
            self.notifier.notify(Notice::error(e.to_string()));
            return Err(e);
        }

        info!(%id, "Property deleted");
        self.notifier.notify(Notice::success("Property deleted successfully"));
        if let Err(e) = self.reload().await {
            warn!(%id, "Reload after delete failed: {}", e);
        }
        Ok(())
    }

    /// Called when the edit form closes, whatever the outcome.
    pub async fn on_form_closed(&mut self) -> Result<(), DomainError> {
        self.reload().await
    }

    pub async fn sign_out(&mut self) -> Result<Navigation, DomainError> {
        self.auth_repository.sign_out().await?;
        self.state = ListingState::default();
        Ok(Navigation::Auth)
    }
}
