#![allow(dead_code)]

use application::ListrApp;
use chrono::{Duration, TimeZone, Utc};
use domain::{AuthUser, Notice, Notifier, Property, PropertyDraft, PropertyType};
use infrastructure::{InMemoryAuthRepository, InMemoryPropertyRepository};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices().into_iter().filter(Notice::is_error).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct Harness {
    pub app: ListrApp,
    pub properties: Arc<InMemoryPropertyRepository>,
    pub auth: Arc<InMemoryAuthRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(seed: Vec<Property>) -> Self {
        let properties = Arc::new(InMemoryPropertyRepository::with_properties(seed));
        let auth = Arc::new(InMemoryAuthRepository::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let app = ListrApp::with_repositories(properties.clone(), auth.clone(), notifier.clone());
        Self {
            app,
            properties,
            auth,
            notifier,
        }
    }

    pub async fn signed_in(seed: Vec<Property>) -> (Self, AuthUser) {
        let harness = Self::new(seed);
        let user = harness.auth.register("agent@example.com", "secret").await;
        harness.auth.start_session(user.clone()).await;
        (harness, user)
    }
}

/// A stored listing created `age_days` before a fixed reference date.
pub fn listing(
    title: &str,
    location: &str,
    property_type: PropertyType,
    price: f64,
    age_days: i64,
    agent_id: Uuid,
) -> Property {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() - Duration::days(age_days);
    Property {
        id: Uuid::new_v4(),
        property_id: format!("P-{}", title.replace(' ', "-")),
        title: title.to_string(),
        property_type,
        location: location.to_string(),
        area: 1500.0,
        price,
        bedrooms: Some(3),
        amenities: Some(vec!["Parking".to_string()]),
        owner_contact: "555-0100".to_string(),
        description: Some("Well kept".to_string()),
        images: None,
        agent_id,
        created_at: created,
        updated_at: created,
    }
}

pub fn draft(code: &str) -> PropertyDraft {
    PropertyDraft {
        property_id: code.to_string(),
        title: "Riverside Apartment".to_string(),
        property_type: PropertyType::Apartment,
        location: "River Walk".to_string(),
        area: "980".to_string(),
        price: "455000".to_string(),
        bedrooms: "2".to_string(),
        amenities: "Pool, Gym, , Parking".to_string(),
        owner_contact: "owner@example.com".to_string(),
        description: "   ".to_string(),
    }
}
