//! End-to-end catalogue behavior over the in-memory store

use std::sync::Arc;

use librarium::{
    config::BootstrapConfig,
    error::AppError,
    models::{CreateBook, CreateCategory, Role, Session, UpdateBook},
    repository::memory::MemoryStore,
    search::BookSearch,
    services::Services,
};

fn services() -> Services {
    let store = Arc::new(MemoryStore::new());
    Services::with_stores(
        store.clone(),
        store.clone(),
        store,
        BootstrapConfig::default(),
    )
}

async fn admin_session(services: &Services) -> Session {
    services.auth.ensure_bootstrap_admin().await.unwrap();
    let mut session = Session::new();
    services
        .auth
        .authenticate(&mut session, "admin", "adminpassword")
        .await
        .unwrap();
    session
}

fn book(id: &str, title: &str, author: &str, category_id: i64, year: i32) -> CreateBook {
    CreateBook {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        category_id,
        year,
    }
}

async fn seed_catalogue(services: &Services, session: &Session) -> (i64, i64) {
    let sf = services
        .catalog
        .add_category(
            session,
            CreateCategory {
                name: "Science Fiction".to_string(),
            },
        )
        .await
        .unwrap();
    let history = services
        .catalog
        .add_category(
            session,
            CreateCategory {
                name: "History".to_string(),
            },
        )
        .await
        .unwrap();

    for request in [
        book("B1", "Dune", "Frank Herbert", sf.id, 1965),
        book("B2", "Dune Messiah", "Frank Herbert", sf.id, 1969),
        book("B3", "Foundation", "Isaac Asimov", sf.id, 1951),
        book("B4", "A Distant Mirror", "Barbara Tuchman", history.id, 1978),
    ] {
        services.catalog.add_book(session, request).await.unwrap();
    }

    (sf.id, history.id)
}

#[tokio::test]
async fn empty_search_returns_every_book() {
    let services = services();
    let session = admin_session(&services).await;
    seed_catalogue(&services, &session).await;

    let all = services
        .catalog
        .search_books(&session, &BookSearch::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn title_search_matches_substrings_only() {
    let services = services();
    let session = admin_session(&services).await;
    seed_catalogue(&services, &session).await;

    let search = BookSearch {
        title: Some("Dune".to_string()),
        ..Default::default()
    };
    let found = services
        .catalog
        .search_books(&session, &search)
        .await
        .unwrap();

    let titles: Vec<&str> = found.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
}

#[tokio::test]
async fn combined_criteria_are_anded() {
    let services = services();
    let session = admin_session(&services).await;
    let (sf, _) = seed_catalogue(&services, &session).await;

    let search = BookSearch {
        category_id: Some(sf),
        min_year: Some(1960),
        ..Default::default()
    };
    let found = services
        .catalog
        .search_books(&session, &search)
        .await
        .unwrap();

    let ids: Vec<&str> = found.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2"]);
}

#[tokio::test]
async fn inverted_year_range_is_rejected_before_querying() {
    let services = services();
    let session = admin_session(&services).await;
    seed_catalogue(&services, &session).await;

    let search = BookSearch {
        min_year: Some(2000),
        max_year: Some(1990),
        ..Default::default()
    };
    let err = services
        .catalog
        .search_books(&session, &search)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let services = services();
    let session = admin_session(&services).await;
    let (sf, _) = seed_catalogue(&services, &session).await;

    let err = services
        .catalog
        .delete_category(&session, sf)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Neither the category nor its books were touched
    assert!(services
        .catalog
        .get_category(&session, sf)
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        services
            .catalog
            .books_in_category(&session, sf)
            .await
            .unwrap()
            .len(),
        3
    );
}

#[tokio::test]
async fn empty_category_can_be_deleted() {
    let services = services();
    let session = admin_session(&services).await;
    let (_, history) = seed_catalogue(&services, &session).await;

    services
        .catalog
        .delete_book(&session, "B4")
        .await
        .unwrap();
    services
        .catalog
        .delete_category(&session, history)
        .await
        .unwrap();

    assert!(services
        .catalog
        .get_category(&session, history)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_credential_leaves_original_untouched() {
    let services = services();

    let original = services
        .auth
        .create_credential("casual", "first-password", Role::User)
        .await
        .unwrap();

    let err = services
        .auth
        .create_credential("casual", "other-password", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The stored credential still carries the first hash and role
    let mut session = Session::new();
    let role = services
        .auth
        .authenticate(&mut session, "casual", "first-password")
        .await
        .unwrap();
    assert_eq!(role, original.role);
    assert_eq!(role, Role::User);
}

#[tokio::test]
async fn repeated_authentication_yields_the_same_role() {
    let services = services();
    services
        .auth
        .create_credential("casual", "secret", Role::User)
        .await
        .unwrap();

    let mut session = Session::new();
    let first = services
        .auth
        .authenticate(&mut session, "casual", "secret")
        .await
        .unwrap();
    let second = services
        .auth
        .authenticate(&mut session, "casual", "secret")
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn user_role_cannot_write_the_catalogue() {
    let services = services();
    let admin = admin_session(&services).await;
    let (sf, _) = seed_catalogue(&services, &admin).await;

    services
        .auth
        .create_credential("casual", "secret", Role::User)
        .await
        .unwrap();
    let mut reader = Session::new();
    services
        .auth
        .authenticate(&mut reader, "casual", "secret")
        .await
        .unwrap();

    // Reads are allowed
    assert_eq!(
        services.catalog.list_books(&reader).await.unwrap().len(),
        4
    );

    // Writes are not
    let err = services
        .catalog
        .add_book(&reader, book("B9", "Hyperion", "Dan Simmons", sf, 1989))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn unauthenticated_session_cannot_read() {
    let services = services();
    let admin = admin_session(&services).await;
    seed_catalogue(&services, &admin).await;

    let stranger = Session::new();
    let err = services
        .catalog
        .list_books(&stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn book_with_unknown_category_is_rejected() {
    let services = services();
    let session = admin_session(&services).await;

    let err = services
        .catalog
        .add_book(&session, book("B1", "Dune", "Frank Herbert", 99, 1965))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn duplicate_book_id_is_a_conflict() {
    let services = services();
    let session = admin_session(&services).await;
    let (sf, _) = seed_catalogue(&services, &session).await;

    let err = services
        .catalog
        .add_book(&session, book("B1", "Dune, again", "Frank Herbert", sf, 1965))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn update_replaces_fields_and_returns_the_record() {
    let services = services();
    let session = admin_session(&services).await;
    let (_sf, history) = seed_catalogue(&services, &session).await;

    let updated = services
        .catalog
        .update_book(
            &session,
            UpdateBook {
                id: "B3".to_string(),
                title: "Foundation and Empire".to_string(),
                author: "Isaac Asimov".to_string(),
                category_id: history,
                year: 1952,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Foundation and Empire");
    assert_eq!(updated.category_id, history);

    let fetched = services
        .catalog
        .get_book(&session, "B3")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn missing_book_lookup_is_an_explicit_absent() {
    let services = services();
    let session = admin_session(&services).await;

    assert!(services
        .catalog
        .get_book(&session, "nope")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn legacy_sentinel_search_behaves_like_optionals() {
    let services = services();
    let session = admin_session(&services).await;
    let (sf, _) = seed_catalogue(&services, &session).await;

    // Blank strings and non-positive integers mean "no filter"
    let search = BookSearch::from_legacy("", "  ", sf, 0, -5);
    let found = services
        .catalog
        .search_books(&session, &search)
        .await
        .unwrap();
    assert_eq!(found.len(), 3);
}
