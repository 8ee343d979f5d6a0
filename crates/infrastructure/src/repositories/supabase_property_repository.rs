use crate::supabase::error::decode_error;
use crate::supabase::{ResponseExt, SupabaseClient};
use async_trait::async_trait;
use domain::{DomainError, NewProperty, Property, PropertyFields, PropertyRepository};
use tracing::debug;
use uuid::Uuid;

pub const PROPERTIES_TABLE: &str = "properties";

const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

pub struct SupabasePropertyRepository {
    client: SupabaseClient,
}

impl SupabasePropertyRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn id_filter(id: Uuid) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }
}

#[async_trait]
impl PropertyRepository for SupabasePropertyRepository {
    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        let token = self.client.bearer_token().await?;
        debug!("GET {}", PROPERTIES_TABLE);

        self.client
            .http()
            .get(self.client.rest_url(PROPERTIES_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .bearer_auth(token)
            .send()
            .await
            .check()
            .await?
            .json::<Vec<Property>>()
            .await
            .map_err(decode_error)
    }

    async fn insert(&self, property: &NewProperty) -> Result<Property, DomainError> {
        let token = self.client.bearer_token().await?;
        debug!("POST {} ({})", PROPERTIES_TABLE, property.fields.property_id);

        let mut rows = self
            .client
            .http()
            .post(self.client.rest_url(PROPERTIES_TABLE))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .bearer_auth(token)
            .json(&[property])
            .send()
            .await
            .check()
            .await?
            .json::<Vec<Property>>()
            .await
            .map_err(decode_error)?;

        if rows.is_empty() {
            return Err(DomainError::ParseError(
                "Insert returned no rows".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(&self, id: Uuid, fields: &PropertyFields) -> Result<Property, DomainError> {
        let token = self.client.bearer_token().await?;
        debug!(%id, "PATCH {}", PROPERTIES_TABLE);

        let rows = self
            .client
            .http()
            .patch(self.client.rest_url(PROPERTIES_TABLE))
            .query(&Self::id_filter(id))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .bearer_auth(token)
            .json(fields)
            .send()
            .await
            .check()
            .await?
            .json::<Vec<Property>>()
            .await
            .map_err(decode_error)?;

        rows.into_iter()
            .next()
            .ok_or(DomainError::PropertyNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let token = self.client.bearer_token().await?;
        debug!(%id, "DELETE {}", PROPERTIES_TABLE);

        let rows = self
            .client
            .http()
            .delete(self.client.rest_url(PROPERTIES_TABLE))
            .query(&Self::id_filter(id))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .bearer_auth(token)
            .send()
            .await
            .check()
            .await?
            .json::<Vec<Property>>()
            .await
            .map_err(decode_error)?;

        if rows.is_empty() {
            return Err(DomainError::PropertyNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::SessionStore;
    use chrono::{Duration, Utc};
    use domain::{AuthUser, PropertyType, Session};
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::Arc;

    const ANON_KEY: &str = "anon-key";

    struct Fixture {
        server: mockito::ServerGuard,
        repository: SupabasePropertyRepository,
        _dir: tempfile::TempDir,
    }

    async fn fixture(signed_in: bool) -> Fixture {
        let server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().join("session.json")));
        if signed_in {
            let session = Session::new(
                "agent-token".to_string(),
                "refresh".to_string(),
                Utc::now() + Duration::hours(1),
                AuthUser {
                    id: Uuid::new_v4(),
                    email: None,
                },
            );
            store.save(&session).await.unwrap();
        }
        let client = SupabaseClient::new(server.url(), ANON_KEY, store).unwrap();
        Fixture {
            server,
            repository: SupabasePropertyRepository::new(client),
            _dir: dir,
        }
    }

    fn row(id: Uuid, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "property_id": "P-1",
            "title": title,
            "type": "Villa",
            "location": "Cliff Road",
            "area": 2800,
            "price": 1250000,
            "bedrooms": 4,
            "amenities": ["Pool"],
            "owner_contact": "555-0101",
            "description": null,
            "images": null,
            "agent_id": Uuid::new_v4(),
            "created_at": "2024-05-01T12:00:00+00:00",
            "updated_at": "2024-05-01T12:00:00+00:00"
        })
    }

    fn fields() -> PropertyFields {
        PropertyFields {
            property_id: "P-1".to_string(),
            title: "Cliff villa".to_string(),
            property_type: PropertyType::Villa,
            location: "Cliff Road".to_string(),
            area: 2800.0,
            price: 1_250_000.0,
            bedrooms: Some(4),
            amenities: None,
            owner_contact: "555-0101".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_session_token() {
        let mut fx = fixture(true).await;
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        let mock = fx
            .server
            .mock("GET", "/rest/v1/properties")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
            ]))
            .match_header("apikey", ANON_KEY)
            .match_header("authorization", "Bearer agent-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([row(first, "Newer"), row(second, "Older")]).to_string())
            .expect(1)
            .create_async()
            .await;

        let properties = fx.repository.find_all().await.unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].id, first);
        assert_eq!(properties[1].title, "Older");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn signed_out_requests_use_anon_key() {
        let mut fx = fixture(false).await;
        let mock = fx
            .server
            .mock("GET", "/rest/v1/properties")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer anon-key")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        assert!(fx.repository.find_all().await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn insert_posts_single_row_array() {
        let mut fx = fixture(true).await;
        let id = Uuid::new_v4();
        let agent = Uuid::new_v4();

        let mock = fx
            .server
            .mock("POST", "/rest/v1/properties")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::PartialJson(json!([{
                "property_id": "P-1",
                "type": "Villa",
                "agent_id": agent,
                "description": null
            }])))
            .with_status(201)
            .with_body(json!([row(id, "Cliff villa")]).to_string())
            .expect(1)
            .create_async()
            .await;

        let created = fx
            .repository
            .insert(&NewProperty::new(fields(), agent))
            .await
            .unwrap();
        assert_eq!(created.id, id);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_targets_id_and_omits_agent() {
        let mut fx = fixture(true).await;
        let id = Uuid::new_v4();

        let mock = fx
            .server
            .mock("PATCH", "/rest/v1/properties")
            .match_query(Matcher::UrlEncoded("id".into(), format!("eq.{}", id)))
            .match_body(Matcher::PartialJson(json!({ "title": "Cliff villa", "bedrooms": 4 })))
            .with_status(200)
            .with_body(json!([row(id, "Cliff villa")]).to_string())
            .expect(1)
            .create_async()
            .await;

        let updated = fx.repository.update(id, &fields()).await.unwrap();
        assert_eq!(updated.id, id);
        mock.assert_async().await;

        let body = serde_json::to_value(fields()).unwrap();
        assert!(body.get("agent_id").is_none());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let mut fx = fixture(true).await;
        let id = Uuid::new_v4();
        let _mock = fx
            .server
            .mock("PATCH", "/rest/v1/properties")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let err = fx.repository.update(id, &fields()).await.unwrap_err();
        assert!(matches!(err, DomainError::PropertyNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_found() {
        let mut fx = fixture(true).await;
        let id = Uuid::new_v4();
        let mock = fx
            .server
            .mock("DELETE", "/rest/v1/properties")
            .match_query(Matcher::UrlEncoded("id".into(), format!("eq.{}", id)))
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let err = fx.repository.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::PropertyNotFound(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_succeeds_when_a_row_is_returned() {
        let mut fx = fixture(true).await;
        let id = Uuid::new_v4();
        let _mock = fx
            .server
            .mock("DELETE", "/rest/v1/properties")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([row(id, "Gone")]).to_string())
            .create_async()
            .await;

        fx.repository.delete(id).await.unwrap();
    }

    #[tokio::test]
    async fn backend_errors_carry_status_and_message() {
        let mut fx = fixture(true).await;
        let _mock = fx
            .server
            .mock("POST", "/rest/v1/properties")
            .with_status(409)
            .with_body(
                r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
            )
            .create_async()
            .await;

        let err = fx
            .repository
            .insert(&NewProperty::new(fields(), Uuid::new_v4()))
            .await
            .unwrap_err();
        match err {
            DomainError::Gateway { status, message } => {
                assert_eq!(status, 409);
                assert!(message.starts_with("duplicate key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
