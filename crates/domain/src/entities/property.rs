use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Plot,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Plot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::ParseError(format!("Unknown property type: {}", s)))
    }
}

/// A stored listing, exactly as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub property_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
    pub area: f64,
    pub price: f64,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    pub owner_contact: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    pub agent_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// The writable part of this record, as an edit would resubmit it.
    pub fn fields(&self) -> PropertyFields {
        PropertyFields {
            property_id: self.property_id.clone(),
            title: self.title.clone(),
            property_type: self.property_type,
            location: self.location.clone(),
            area: self.area,
            price: self.price,
            bedrooms: self.bedrooms,
            amenities: self.amenities.clone(),
            owner_contact: self.owner_contact.clone(),
            description: self.description.clone(),
        }
    }

    pub fn apply(&mut self, fields: PropertyFields) {
        self.property_id = fields.property_id;
        self.title = fields.title;
        self.property_type = fields.property_type;
        self.location = fields.location;
        self.area = fields.area;
        self.price = fields.price;
        self.bedrooms = fields.bedrooms;
        self.amenities = fields.amenities;
        self.owner_contact = fields.owner_contact;
        self.description = fields.description;
        self.updated_at = Utc::now();
    }
}

/// Normalized, typed listing fields sent on insert and update.
///
/// Absent optionals serialize as `null` so an update clears them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFields {
    pub property_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
    pub area: f64,
    pub price: f64,
    pub bedrooms: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub owner_contact: String,
    pub description: Option<String>,
}

/// Insert payload: the fields plus the owning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    #[serde(flatten)]
    pub fields: PropertyFields,
    pub agent_id: Uuid,
}

impl NewProperty {
    pub fn new(fields: PropertyFields, agent_id: Uuid) -> Self {
        Self { fields, agent_id }
    }

    /// Materialize a stored record, the way the backend would on insert.
    pub fn into_property(self, id: Uuid, now: DateTime<Utc>) -> Property {
        let fields = self.fields;
        Property {
            id,
            property_id: fields.property_id,
            title: fields.title,
            property_type: fields.property_type,
            location: fields.location,
            area: fields.area,
            price: fields.price,
            bedrooms: fields.bedrooms,
            amenities: fields.amenities,
            owner_contact: fields.owner_contact,
            description: fields.description,
            images: None,
            agent_id: self.agent_id,
            created_at: now,
            updated_at: now,
        }
    }
}
