mod common;

use common::{draft, listing, Harness};
use domain::{
    DomainError, DraftError, FormTarget, NoticeLevel, PropertyFilter, PropertyRepository,
    PropertyType,
};
use uuid::Uuid;

#[tokio::test]
async fn create_normalizes_and_attaches_the_signed_in_agent() {
    let agent = Uuid::new_v4();
    let seed = vec![listing("Old House", "Elm Street", PropertyType::Villa, 900_000.0, 5, agent)];
    let (mut harness, user) = Harness::signed_in(seed).await;
    harness
        .app
        .open_dashboard(PropertyFilter::default())
        .await
        .unwrap();

    let created = harness.app.create_property(draft(" RV-12 ")).await.unwrap();

    assert_eq!(created.property_id, "RV-12");
    assert_eq!(created.agent_id, user.id);
    assert_eq!(
        created.amenities,
        Some(vec![
            "Pool".to_string(),
            "Gym".to_string(),
            "Parking".to_string()
        ])
    );
    assert_eq!(created.description, None);
    assert_eq!(created.bedrooms, Some(2));

    assert!(!harness.app.form.is_open());
    let state = harness.app.listing.state();
    assert_eq!(state.properties().len(), 2);
    assert_eq!(state.properties()[0].id, created.id);
    assert_eq!(
        harness.notifier.last().unwrap().message,
        "Property added successfully"
    );
}

#[tokio::test]
async fn empty_amenities_are_stored_as_absent() {
    let (mut harness, _) = Harness::signed_in(Vec::new()).await;
    let mut input = draft("RV-13");
    input.amenities = String::new();

    let created = harness.app.create_property(input).await.unwrap();

    assert_eq!(created.amenities, None);
}

#[tokio::test]
async fn create_without_session_fails_before_insert() {
    let mut harness = Harness::new(Vec::new());

    let err = harness.app.create_property(draft("RV-1")).await.unwrap_err();

    assert!(matches!(err, DomainError::NotAuthenticated));
    assert_eq!(harness.properties.insert_calls(), 0);
    assert!(harness.properties.snapshot().await.is_empty());
    assert!(harness.app.form.is_open());
    assert_eq!(harness.notifier.last().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_a_request() {
    let (mut harness, _) = Harness::signed_in(Vec::new()).await;
    let mut input = draft("RV-2");
    input.price = "lots".to_string();

    let err = harness.app.create_property(input).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::InvalidDraft(DraftError::InvalidNumber { field: "Price", .. })
    ));
    assert_eq!(harness.properties.insert_calls(), 0);
    assert_eq!(harness.app.form.draft().price, "lots");
}

#[tokio::test]
async fn editing_keeps_the_original_agent() {
    let owner = Uuid::new_v4();
    let seed = vec![listing(
        "Canal House",
        "Canal Row",
        PropertyType::Villa,
        1_400_000.0,
        3,
        owner,
    )];
    let (mut harness, editor) = Harness::signed_in(seed).await;
    assert_ne!(owner, editor.id);
    harness
        .app
        .open_dashboard(PropertyFilter::default())
        .await
        .unwrap();
    let id = harness.app.listing.state().properties()[0].id;

    let updated = harness
        .app
        .edit_property(id, |draft| {
            draft.title = "  Canal House (renovated) ".to_string();
            draft.bedrooms = String::new();
            draft.description = String::new();
        })
        .await
        .unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.agent_id, owner);
    assert_eq!(updated.title, "Canal House (renovated)");
    assert_eq!(updated.bedrooms, None);
    assert_eq!(updated.description, None);
    assert_eq!(harness.properties.insert_calls(), 0);
    assert_eq!(harness.properties.update_calls(), 1);

    let stored = harness.properties.find_all().await.unwrap();
    assert_eq!(stored[0].agent_id, owner);
    assert_eq!(
        harness.app.listing.state().properties()[0].title,
        "Canal House (renovated)"
    );
    assert_eq!(
        harness.notifier.last().unwrap().message,
        "Property updated successfully"
    );
}

#[tokio::test]
async fn open_edit_prefills_the_draft_and_target() {
    let owner = Uuid::new_v4();
    let property = listing("Dune Villa", "Coast Road", PropertyType::Villa, 2_000_000.0, 2, owner);
    let (mut harness, _) = Harness::signed_in(vec![property.clone()]).await;

    harness.app.form.open_edit(&property);

    assert_eq!(
        harness.app.form.target(),
        FormTarget::Editing {
            id: property.id,
            agent_id: owner
        }
    );
    let draft = harness.app.form.draft();
    assert_eq!(draft.price, "2000000");
    assert_eq!(draft.bedrooms, "3");
    assert_eq!(draft.amenities, "Parking");
    assert_eq!(draft.description, "Well kept");
}

#[tokio::test]
async fn failed_update_leaves_the_form_open_with_edits() {
    let owner = Uuid::new_v4();
    let seed = vec![listing(
        "Brick Flat",
        "Mill Lane",
        PropertyType::Apartment,
        300_000.0,
        4,
        owner,
    )];
    let (mut harness, _) = Harness::signed_in(seed).await;
    harness
        .app
        .open_dashboard(PropertyFilter::default())
        .await
        .unwrap();
    let id = harness.app.listing.state().properties()[0].id;

    harness.properties.set_unavailable(true);
    let result = harness
        .app
        .edit_property(id, |draft| draft.price = "310000".to_string())
        .await;

    assert!(matches!(result, Err(DomainError::NetworkError(_))));
    assert!(harness.app.form.is_open());
    assert_eq!(harness.app.form.draft().price, "310000");
    assert_eq!(harness.app.listing.state().properties()[0].price, 300_000.0);
}

#[tokio::test]
async fn editing_an_unloaded_id_is_not_found() {
    let (mut harness, _) = Harness::signed_in(Vec::new()).await;

    let err = harness
        .app
        .edit_property(Uuid::new_v4(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::PropertyNotFound(_)));
    assert_eq!(harness.properties.update_calls(), 0);
}

#[tokio::test]
async fn submit_on_a_closed_form_is_refused() {
    let (mut harness, _) = Harness::signed_in(Vec::new()).await;

    assert!(matches!(
        harness.app.form.submit().await,
        Err(DomainError::ValidationError(_))
    ));
    assert_eq!(harness.properties.insert_calls(), 0);
}
