//! Integration tests for the structural diff engine and its cache.

use assert_matches::assert_matches;
use serde_json::json;
use sqlx::PgPool;

use apidock_core::error::CoreError;
use apidock_core::snapshot::SnapshotPatch;
use apidock_db::comparison::VersionComparison;
use apidock_db::models::artifact::CreateArtifact;
use apidock_db::models::version::CreateDraft;
use apidock_db::repositories::ArtifactRepo;
use apidock_db::versioning::VersionLifecycle;
use apidock_db::DbError;

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

async fn draft_with_patch(pool: &PgPool, artifact_id: i64, patch: SnapshotPatch) -> i64 {
    VersionLifecycle::create_draft(
        pool,
        artifact_id,
        ACTOR,
        &CreateDraft {
            patch,
            summary: None,
            changelog: None,
        },
        NO_SWEEP,
    )
    .await
    .unwrap()
    .id
}

fn named(name: &str) -> SnapshotPatch {
    SnapshotPatch {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: validation and lookup failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_compare_is_rejected(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(&pool, artifact_id, named("v1")).await;

    let err = VersionComparison::compare(&pool, artifact_id, v1, v1)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_version_is_not_found(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(&pool, artifact_id, named("v1")).await;

    let err = VersionComparison::compare(&pool, artifact_id, v1, 9999)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { id: 9999, .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_version_of_other_artifact_is_not_found(pool: PgPool) {
    let a = setup_artifact(&pool, "A").await;
    let b = setup_artifact(&pool, "B").await;
    let va = draft_with_patch(&pool, a, named("v1")).await;
    let vb = draft_with_patch(&pool, b, named("v1")).await;

    // Both versions exist, but vb belongs to a different artifact.
    let err = VersionComparison::compare(&pool, a, va, vb)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Test: diff content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_diff_reports_changed_fields_only(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(
        &pool,
        artifact_id,
        SnapshotPatch {
            name: Some("Login".into()),
            method: Some("GET".into()),
            ..Default::default()
        },
    )
    .await;
    let v2 = draft_with_patch(
        &pool,
        artifact_id,
        SnapshotPatch {
            name: Some("Login".into()),
            method: Some("POST".into()),
            request_body: Some(json!({ "type": "object" })),
            ..Default::default()
        },
    )
    .await;

    let result = VersionComparison::compare(&pool, artifact_id, v1, v2)
        .await
        .unwrap();
    assert!(!result.cache_hit);

    let diff = result.diff.as_object().unwrap();
    assert_eq!(diff["method"]["from"], json!("GET"));
    assert_eq!(diff["method"]["to"], json!("POST"));
    assert_eq!(diff["request_body"]["to"], json!({ "type": "object" }));
    assert!(!diff.contains_key("name"), "unchanged fields are omitted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_identical_snapshots_yield_empty_diff(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(&pool, artifact_id, named("Same")).await;
    // No patch beyond the name: v2 copies v1's draft-independent defaults.
    let v2 = draft_with_patch(&pool, artifact_id, named("Same")).await;

    let result = VersionComparison::compare(&pool, artifact_id, v1, v2)
        .await
        .unwrap();
    assert_eq!(result.diff, json!({}));
}

// ---------------------------------------------------------------------------
// Test: cache behaviour
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_compare_hits_cache_with_identical_diff(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(&pool, artifact_id, named("v1")).await;
    let v2 = draft_with_patch(&pool, artifact_id, named("v2")).await;

    let first = VersionComparison::compare(&pool, artifact_id, v1, v2)
        .await
        .unwrap();
    let second = VersionComparison::compare(&pool, artifact_id, v1, v2)
        .await
        .unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(first.diff, second.diff);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cache_is_directional(pool: PgPool) {
    let artifact_id = setup_artifact(&pool, "A").await;
    let v1 = draft_with_patch(&pool, artifact_id, named("v1")).await;
    let v2 = draft_with_patch(&pool, artifact_id, named("v2")).await;

    let forward = VersionComparison::compare(&pool, artifact_id, v1, v2)
        .await
        .unwrap();
    // (B, A) is a separate entry: computed fresh, sides swapped.
    let reverse = VersionComparison::compare(&pool, artifact_id, v2, v1)
        .await
        .unwrap();

    assert!(!reverse.cache_hit);
    assert_eq!(forward.diff["name"]["from"], json!("v1"));
    assert_eq!(forward.diff["name"]["to"], json!("v2"));
    assert_eq!(reverse.diff["name"]["from"], json!("v2"));
    assert_eq!(reverse.diff["name"]["to"], json!("v1"));
}
