//! Integration tests for the operation log.
//!
//! Every lifecycle operation appends exactly one entry in the same
//! transaction, so the log is a faithful, append-only history.

use serde_json::json;
use sqlx::PgPool;

use apidock_core::snapshot::SnapshotPatch;
use apidock_db::models::artifact::CreateArtifact;
use apidock_db::models::version::{CreateDraft, PublishVersion};
use apidock_db::repositories::{ArtifactRepo, OperationLogRepo};
use apidock_db::versioning::VersionLifecycle;

const ACTOR: i64 = 7;
const NO_SWEEP: i64 = 100;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup_artifact(pool: &PgPool, name: &str) -> i64 {
    ArtifactRepo::create(
        pool,
        &CreateArtifact {
            project_id: 1,
            name: name.to_string(),
            method: None,
            path: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn named_draft(name: &str) -> CreateDraft {
    CreateDraft {
        patch: SnapshotPatch {
            name: Some(name.to_string()),
            ..Default::default()
        },
        summary: None,
        changelog: None,
    }
}

fn publish_input(label: &str) -> PublishVersion {
    PublishVersion {
        label: label.to_string(),
        summary: None,
        changelog: None,
    }
}

// ---------------------------------------------------------------------------
// Test: one entry per lifecycle operation, newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lifecycle_appends_one_entry_each(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;

    let v1 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v1.id, ACTOR, &publish_input("v1.0.0"))
        .await
        .unwrap();
    VersionLifecycle::archive(&pool, artifact_id, v1.id, ACTOR)
        .await
        .unwrap();
    let restored = VersionLifecycle::rollback(&pool, artifact_id, v1.id, ACTOR, NO_SWEEP)
        .await
        .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 50, 0)
        .await
        .unwrap();

    // Newest first: rollback, archive, publish, create.
    let operations: Vec<&str> = entries.iter().map(|e| e.operation.as_str()).collect();
    assert_eq!(operations, vec!["rollback", "archive", "publish", "create"]);

    for entry in &entries {
        assert_eq!(entry.artifact_id, artifact_id);
        assert_eq!(entry.actor_id, ACTOR);
    }
    assert_eq!(entries[0].version_id, Some(restored.id));
    assert_eq!(entries[1].version_id, Some(v1.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_draft_records_create_kind(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].operation, "create");
    assert_eq!(entries[0].change_kinds, vec!["CREATE".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_draft_records_changed_kinds(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v1.id, ACTOR, &publish_input("v1.0.0"))
        .await
        .unwrap();

    // Draft on top of the live base, changing the name and the request body.
    VersionLifecycle::create_draft(
        &pool,
        artifact_id,
        ACTOR,
        &CreateDraft {
            patch: SnapshotPatch {
                name: Some("renamed".into()),
                request_body: Some(json!({ "type": "object" })),
                ..Default::default()
            },
            summary: None,
            changelog: None,
        },
        NO_SWEEP,
    )
    .await
    .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(entries[0].operation, "update");
    let mut kinds = entries[0].change_kinds.clone();
    kinds.sort();
    assert_eq!(kinds, vec!["BASIC_INFO".to_string(), "REQUEST_BODY".to_string()]);
}

// ---------------------------------------------------------------------------
// Test: metadata captures the context of the state change
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_metadata_records_label_and_predecessor(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v1.id, ACTOR, &publish_input("v1.0.0"))
        .await
        .unwrap();
    let v2 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v2"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v2.id, ACTOR, &publish_input("v2.0.0"))
        .await
        .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 10, 0)
        .await
        .unwrap();
    let metadata = entries[0].metadata.as_ref().unwrap();
    assert_eq!(metadata["label"], json!("v2.0.0"));
    assert_eq!(metadata["previous_live_version_id"], json!(v1.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rollback_metadata_records_source(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v1.id, ACTOR, &publish_input("v1.0.0"))
        .await
        .unwrap();
    VersionLifecycle::rollback(&pool, artifact_id, v1.id, ACTOR, NO_SWEEP)
        .await
        .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(entries[0].operation, "rollback");
    let metadata = entries[0].metadata.as_ref().unwrap();
    assert_eq!(metadata["source_version_id"], json!(v1.id));
}

// ---------------------------------------------------------------------------
// Test: entries outlive swept versions and pagination works
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entries_survive_version_deletion(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;

    // Two publishes then a tight limit: v1 gets swept on the next create.
    let v1 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v1"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v1.id, ACTOR, &publish_input("v1.0.0"))
        .await
        .unwrap();
    let v2 = VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v2"), NO_SWEEP)
        .await
        .unwrap();
    VersionLifecycle::publish(&pool, artifact_id, v2.id, ACTOR, &publish_input("v2.0.0"))
        .await
        .unwrap();
    VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft("v3"), 2)
        .await
        .unwrap();

    let entries = OperationLogRepo::list_by_artifact(&pool, artifact_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(entries.len(), 5);

    // v1's entries remain with the version reference nulled out.
    let v1_entries: Vec<_> = entries
        .iter()
        .filter(|e| e.operation == "create" || e.operation == "publish")
        .filter(|e| e.version_id.is_none())
        .collect();
    assert_eq!(v1_entries.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    for i in 0..5 {
        VersionLifecycle::create_draft(&pool, artifact_id, ACTOR, &named_draft(&format!("v{i}")), NO_SWEEP)
            .await
            .unwrap();
    }

    let page1 = OperationLogRepo::list_by_artifact(&pool, artifact_id, 2, 0)
        .await
        .unwrap();
    let page2 = OperationLogRepo::list_by_artifact(&pool, artifact_id, 2, 2)
        .await
        .unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 2);
    assert!(page1[1].id > page2[0].id);
}
