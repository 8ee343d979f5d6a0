use crate::entities::{NewProperty, Property, PropertyFields, PropertyType};
use crate::errors::DomainError;
use crate::notifications::{Notice, Notifier};
use crate::repositories::{AuthRepository, PropertyRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },
}

/// What a submit will do: insert a new listing or update an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormTarget {
    #[default]
    New,
    Editing { id: Uuid, agent_id: Uuid },
}

impl FormTarget {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormTarget::Editing { .. })
    }
}

/// Form inputs, kept as the raw strings the agent typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub property_id: String,
    pub title: String,
    pub property_type: PropertyType,
    pub location: String,
    pub area: String,
    pub price: String,
    pub bedrooms: String,
    pub amenities: String,
    pub owner_contact: String,
    pub description: String,
}

impl PropertyDraft {
    pub fn from_property(property: &Property) -> Self {
        Self {
            property_id: property.property_id.clone(),
            title: property.title.clone(),
            property_type: property.property_type,
            location: property.location.clone(),
            area: property.area.to_string(),
            price: property.price.to_string(),
            bedrooms: property
                .bedrooms
                .map(|beds| beds.to_string())
                .unwrap_or_default(),
            amenities: property
                .amenities
                .as_ref()
                .map(|list| list.join(", "))
                .unwrap_or_default(),
            owner_contact: property.owner_contact.clone(),
            description: property.description.clone().unwrap_or_default(),
        }
    }

    /// Convert the raw inputs into typed fields, or say which one is wrong.
    pub fn normalize(&self) -> Result<PropertyFields, DraftError> {
        let property_id = required("Property ID", &self.property_id)?;
        let title = required("Title", &self.title)?;
        let location = required("Location", &self.location)?;
        let owner_contact = required("Owner contact", &self.owner_contact)?;

        Ok(PropertyFields {
            property_id,
            title,
            property_type: self.property_type,
            location,
            area: positive_decimal("Area", &self.area)?,
            price: positive_decimal("Price", &self.price)?,
            bedrooms: optional_count("Bedrooms", &self.bedrooms)?,
            amenities: split_amenities(&self.amenities),
            owner_contact,
            description: non_blank(&self.description),
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn positive_decimal(field: &'static str, value: &str) -> Result<f64, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingField(field));
    }
    let number: f64 = trimmed.parse().map_err(|_| DraftError::InvalidNumber {
        field,
        value: trimmed.to_string(),
    })?;
    if !number.is_finite() || number <= 0.0 {
        return Err(DraftError::NotPositive { field });
    }
    Ok(number)
}

fn optional_count(field: &'static str, value: &str) -> Result<Option<u32>, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| DraftError::InvalidInteger {
            field,
            value: trimmed.to_string(),
        })
}

/// Comma separated, trimmed, empties dropped. `None` when nothing is left.
pub fn split_amenities(raw: &str) -> Option<Vec<String>> {
    let amenities: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if amenities.is_empty() {
        None
    } else {
        Some(amenities)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Add/edit dialog state plus the submit that persists it.
pub struct PropertyFormController {
    property_repository: Arc<dyn PropertyRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    notifier: Arc<dyn Notifier>,
    target: FormTarget,
    draft: PropertyDraft,
    open: bool,
}

impl PropertyFormController {
    pub fn new(
        property_repository: Arc<dyn PropertyRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            property_repository,
            auth_repository,
            notifier,
            target: FormTarget::New,
            draft: PropertyDraft::default(),
            open: false,
        }
    }

    pub fn open_new(&mut self) {
        self.target = FormTarget::New;
        self.draft = PropertyDraft::default();
        self.open = true;
    }

    pub fn open_edit(&mut self, property: &Property) {
        self.target = FormTarget::Editing {
            id: property.id,
            agent_id: property.agent_id,
        };
        self.draft = PropertyDraft::from_property(property);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.target = FormTarget::New;
        self.draft = PropertyDraft::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> FormTarget {
        self.target
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PropertyDraft {
        &mut self.draft
    }

    /// Persist the draft. Success closes the form; failure leaves it open
    /// with the draft untouched.
    pub async fn submit(&mut self) -> Result<Property, DomainError> {
        if !self.open {
            return Err(DomainError::ValidationError(
                "The property form is not open".to_string(),
            ));
        }

        match self.dispatch().await {
            Ok(property) => {
                let message = if self.target.is_editing() {
                    "Property updated successfully"
                } else {
                    "Property added successfully"
                };
                info!(id = %property.id, property_id = %property.property_id, "{}", message);
                self.notifier.notify(Notice::success(message));
                self.close();
                Ok(property)
            }
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn dispatch(&self) -> Result<Property, DomainError> {
        let fields = self.draft.normalize()?;
        let user = self.auth_repository.get_current_user().await?;

        match self.target {
            FormTarget::New => {
                debug!(agent_id = %user.id, "Inserting property {}", fields.property_id);
                let record = NewProperty::new(fields, user.id);
                self.property_repository.insert(&record).await
            }
            FormTarget::Editing { id, .. } => {
                debug!(%id, "Updating property {}", fields.property_id);
                self.property_repository.update(id, &fields).await
            }
        }
    }
}
