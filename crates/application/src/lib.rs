use config::Config;
use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Listing manager application - wires the gateways and drives the dashboard flows
pub struct ListrApp {
    pub listing: ListingController,
    pub form: PropertyFormController,
    auth_repository: Arc<dyn AuthRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ListrApp {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self, DomainError> {
        // Infrastructure layer - one client shared by both gateways
        let sessions = Arc::new(SessionStore::new(&config.session_path));
        let client = SupabaseClient::new(
            config.base_url(),
            config.supabase_anon_key.as_str(),
            sessions,
        )?;

        let property_repository: Arc<dyn PropertyRepository> =
            Arc::new(SupabasePropertyRepository::new(client.clone()));
        let auth_repository: Arc<dyn AuthRepository> =
            Arc::new(SupabaseAuthRepository::new(client));

        Ok(Self::with_repositories(
            property_repository,
            auth_repository,
            notifier,
        ))
    }

    pub fn with_repositories(
        property_repository: Arc<dyn PropertyRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let listing = ListingController::new(
            property_repository.clone(),
            auth_repository.clone(),
            notifier.clone(),
        );
        let form = PropertyFormController::new(
            property_repository,
            auth_repository.clone(),
            notifier.clone(),
        );

        Self {
            listing,
            form,
            auth_repository,
            notifier,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        match self.auth_repository.sign_in(email.trim(), password).await {
            Ok(session) => Ok(session),
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn current_user(&self) -> Result<AuthUser, DomainError> {
        self.auth_repository.get_current_user().await
    }

    /// Apply the filter criteria and activate the dashboard.
    pub async fn open_dashboard(
        &mut self,
        filter: PropertyFilter,
    ) -> Result<Navigation, DomainError> {
        self.listing.set_filter(filter);
        self.listing.activate().await
    }

    pub async fn create_property(&mut self, draft: PropertyDraft) -> Result<Property, DomainError> {
        self.form.open_new();
        *self.form.draft_mut() = draft;
        let result = self.form.submit().await;
        self.after_submit(result).await
    }

    /// Edit a listing from the loaded set. `edit` receives the prefilled draft.
    pub async fn edit_property<F>(&mut self, id: Uuid, edit: F) -> Result<Property, DomainError>
    where
        F: FnOnce(&mut PropertyDraft),
    {
        let Some(property) = self.listing.state().find(id).cloned() else {
            let e = DomainError::PropertyNotFound(id);
            self.notifier.notify(Notice::error(e.to_string()));
            return Err(e);
        };

        self.form.open_edit(&property);
        edit(self.form.draft_mut());
        let result = self.form.submit().await;
        self.after_submit(result).await
    }

    pub async fn delete_property(&mut self, id: Uuid) -> Result<(), DomainError> {
        self.listing.delete(id).await
    }

    pub async fn sign_out(&mut self) -> Result<Navigation, DomainError> {
        self.form.close();
        self.listing.sign_out().await.inspect_err(|e| {
            self.notifier.notify(Notice::error(e.to_string()));
        })
    }

    /// A successful submit closes the form, which reloads the listing set.
    /// A failed one leaves the form open for correction.
    async fn after_submit(
        &mut self,
        result: Result<Property, DomainError>,
    ) -> Result<Property, DomainError> {
        let property = result?;
        info!(id = %property.id, "Saved property {}", property.property_id);
        if let Err(e) = self.listing.on_form_closed().await {
            warn!("Reload after save failed: {}", e);
        }
        Ok(property)
    }
}
