//! Integration tests for context entries and category get-or-create.
//!
//! Requires a migrated database; see `test_fixtures::DEFAULT_TEST_DATABASE_URL`.

use trellis_db::test_fixtures::TestDatabase;
use trellis_db::{
    CategoryRepository, ContentType, ContextEntryRepository, CreateContextEntryRequest,
};

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_entry_lifecycle() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let entry = fixture
        .db
        .context_entries
        .create(
            user_id,
            CreateContextEntryRequest {
                content: "Remember to renew the passport before June".to_string(),
                content_type: ContentType::Note,
            },
        )
        .await
        .unwrap();

    assert!(!entry.processed);
    assert_eq!(entry.content_type, ContentType::Note);

    fixture
        .db
        .context_entries
        .mark_processed(entry.id)
        .await
        .unwrap();

    let reloaded = fixture
        .db
        .context_entries
        .get(entry.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.processed);

    let listed = fixture.db.context_entries.list(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);

    fixture.db.context_entries.delete(entry.id).await.unwrap();
    assert!(fixture
        .db
        .context_entries
        .get(entry.id)
        .await
        .unwrap()
        .is_none());

    fixture.cleanup().await;
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_mark_processed_missing_entry() {
    let fixture = TestDatabase::new().await;

    let err = fixture
        .db
        .context_entries
        .mark_processed(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        trellis_db::Error::ContextEntryNotFound(_)
    ));

    fixture.cleanup().await;
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_category_get_or_create_is_idempotent() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let first = fixture
        .db
        .categories
        .get_or_create(user_id, "Health", "#6B7280", "folder")
        .await
        .unwrap();
    let second = fixture
        .db
        .categories
        .get_or_create(user_id, "Health", "#FF0000", "heart")
        .await
        .unwrap();

    // Second call returns the existing row untouched.
    assert_eq!(first.id, second.id);
    assert_eq!(second.color, "#6B7280");

    let listed = fixture.db.categories.list(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);

    fixture.cleanup().await;
}
