use chrono::Duration;
use lms_core::model::{Credentials, Role};
use lms_core::time::fixed_now;
use storage::repository::{CredentialRecord, CredentialRepository, SessionFlag, Storage};
use storage::sqlite::SqliteRepository;

fn record(token: &str, role: Role, name: &str) -> CredentialRecord {
    CredentialRecord::from_credentials(&Credentials::new(token, role, name), fixed_now())
}

#[tokio::test]
async fn sqlite_persists_and_replaces_session() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_session?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load().await.unwrap().is_none());

    repo.save(&record("tok-1", Role::Student, "Ada")).await.unwrap();
    let mut newer = record("tok-2", Role::Trainer, "Linus");
    newer.saved_at = fixed_now() + Duration::minutes(5);
    repo.save(&newer).await.unwrap();

    let loaded = repo.load().await.unwrap().expect("stored session");
    assert_eq!(loaded, newer);

    let credentials = loaded.into_credentials();
    assert_eq!(credentials.role, Role::Trainer);
    assert_eq!(credentials.name, "Linus");
}

#[tokio::test]
async fn sqlite_clear_removes_session() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save(&record("tok", Role::Intern, "Grace")).await.unwrap();
    repo.clear().await.unwrap();
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn sqlite_storage_keeps_flags_in_memory() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    assert!(storage.flags.mark_once(SessionFlag::CelebrationShown).await.unwrap());

    let reopened = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    assert!(
        reopened
            .flags
            .mark_once(SessionFlag::CelebrationShown)
            .await
            .unwrap()
    );
}
