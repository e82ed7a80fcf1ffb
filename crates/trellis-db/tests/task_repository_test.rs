//! Integration tests for the task repository.
//!
//! Validates:
//! - Task CRUD with category linkage
//! - List filtering by status, category, priority band, and search
//! - Status toggling semantics (completed ⇄ pending)
//! - Stats aggregation including overdue counting
//!
//! Requires a migrated database; see `test_fixtures::DEFAULT_TEST_DATABASE_URL`.

use chrono::{Duration, Utc};
use trellis_db::test_fixtures::TestDatabase;
use trellis_db::{
    CategoryRepository, CreateCategoryRequest, CreateTaskRequest, ListTasksRequest, PriorityBand,
    TaskRepository, TaskStatus, UpdateTaskRequest,
};

fn task_request(
    user_id: uuid::Uuid,
    category_id: uuid::Uuid,
    title: &str,
    priority: i32,
) -> CreateTaskRequest {
    CreateTaskRequest {
        user_id,
        category_id,
        title: title.to_string(),
        description: String::new(),
        priority,
        status: TaskStatus::Pending,
        due_date: None,
        ai_suggested: false,
    }
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_create_and_fetch_task() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let category = fixture
        .db
        .categories
        .create(
            user_id,
            CreateCategoryRequest {
                name: "Work".to_string(),
                color: None,
                icon: None,
            },
        )
        .await
        .unwrap();

    let task = fixture
        .db
        .tasks
        .create(task_request(user_id, category.id, "Write report", 70))
        .await
        .unwrap();

    assert_eq!(task.title, "Write report");
    assert_eq!(task.priority, 70);
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(!task.ai_suggested);

    let fetched = fixture.db.tasks.get(task.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, task.id);
    assert_eq!(fetched.category_id, category.id);

    fixture.cleanup().await;
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_list_filters() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let category = fixture
        .db
        .categories
        .get_or_create(user_id, "Personal", "#6B7280", "folder")
        .await
        .unwrap();

    fixture
        .db
        .tasks
        .create(task_request(user_id, category.id, "Urgent errand", 90))
        .await
        .unwrap();
    fixture
        .db
        .tasks
        .create(task_request(user_id, category.id, "Casual reading", 20))
        .await
        .unwrap();

    let high = fixture
        .db
        .tasks
        .list(
            user_id,
            ListTasksRequest {
                priority: Some(PriorityBand::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].title, "Urgent errand");

    let searched = fixture
        .db
        .tasks
        .list(
            user_id,
            ListTasksRequest {
                search: Some("reading".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].title, "Casual reading");

    // LIKE wildcards in the search string must not match everything.
    let wildcard = fixture
        .db
        .tasks
        .list(
            user_id,
            ListTasksRequest {
                search: Some("%".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(wildcard.is_empty());

    fixture.cleanup().await;
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_update_and_toggle_status() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let category = fixture
        .db
        .categories
        .get_or_create(user_id, "Personal", "#6B7280", "folder")
        .await
        .unwrap();

    let task = fixture
        .db
        .tasks
        .create(task_request(user_id, category.id, "Fix the bike", 50))
        .await
        .unwrap();

    let updated = fixture
        .db
        .tasks
        .update(
            task.id,
            UpdateTaskRequest {
                priority: Some(85),
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.priority, 85);
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "Fix the bike");

    // in_progress -> completed -> pending
    let toggled = fixture.db.tasks.toggle_status(task.id).await.unwrap();
    assert_eq!(toggled.status, TaskStatus::Completed);
    let toggled = fixture.db.tasks.toggle_status(task.id).await.unwrap();
    assert_eq!(toggled.status, TaskStatus::Pending);

    fixture.cleanup().await;
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_stats_counts_overdue() {
    let fixture = TestDatabase::new().await;
    let user_id = fixture.user.id;

    let category = fixture
        .db
        .categories
        .get_or_create(user_id, "Personal", "#6B7280", "folder")
        .await
        .unwrap();

    let mut overdue = task_request(user_id, category.id, "Pay the bill", 60);
    overdue.due_date = Some(Utc::now() - Duration::days(1));
    fixture.db.tasks.create(overdue).await.unwrap();

    let mut done = task_request(user_id, category.id, "Old chore", 40);
    done.status = TaskStatus::Completed;
    done.due_date = Some(Utc::now() - Duration::days(3));
    fixture.db.tasks.create(done).await.unwrap();

    let stats = fixture.db.tasks.stats(user_id).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.completed, 1);
    // Completed tasks never count as overdue.
    assert_eq!(stats.overdue, 1);

    fixture.cleanup().await;
}
