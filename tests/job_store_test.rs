use std::sync::Arc;

use chrono::Utc;
use jobtrail::{
    models::new_job_id, store::keys, JobPosting, JobSource, JobStore, JobType, SqliteBackend,
    StorageBackend,
};

fn sample_job(title: &str) -> JobPosting {
    JobPosting {
        id: new_job_id(),
        title: title.to_string(),
        company: "Acme Corp".to_string(),
        location: "Berlin, Germany".to_string(),
        description: "Rust and Docker on AWS".to_string(),
        requirements: vec!["rust".to_string(), "aws".to_string(), "docker".to_string()],
        salary: Some("€90,000".to_string()),
        job_type: JobType::Contract,
        remote: true,
        url: "https://example.com/jobs/42".to_string(),
        date_posted: Utc::now(),
        source: JobSource::LinkedIn,
        tags: vec!["backend".to_string()],
    }
}

#[tokio::test]
async fn sqlite_store_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("jobtrail.sqlite3");

    let job = sample_job("Senior Rust Engineer");
    {
        let store = JobStore::new(Arc::new(SqliteBackend::new(db_path.clone()).unwrap()));
        store.save_job(&job).await.unwrap();
        store.save_search_history("rust").await.unwrap();
    }

    // A fresh backend over the same file sees everything, dates intact.
    let store = JobStore::new(Arc::new(SqliteBackend::new(db_path).unwrap()));
    let jobs = store.saved_jobs().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, job.id);
    assert_eq!(jobs[0].salary.as_deref(), Some("€90,000"));
    assert_eq!(jobs[0].job_type, JobType::Contract);
    assert_eq!(jobs[0].date_posted.timestamp(), job.date_posted.timestamp());
    assert_eq!(store.search_history().await.unwrap(), vec!["rust"]);
}

#[tokio::test]
async fn sqlite_upsert_and_remove_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(SqliteBackend::new(dir.path().join("db.sqlite3")).unwrap());
    let store = JobStore::new(backend.clone());

    let mut job = sample_job("First");
    store.save_job(&job).await.unwrap();
    job.title = "Second".to_string();
    store.save_job(&job).await.unwrap();

    let jobs = store.saved_jobs().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Second");

    // Removing an unknown id leaves the stored bytes untouched.
    let before = backend.get(keys::SAVED_JOBS).await.unwrap().unwrap();
    store.remove_job("job_0_missing00").await.unwrap();
    let after = backend.get(keys::SAVED_JOBS).await.unwrap().unwrap();
    assert_eq!(before, after);

    store.remove_job(&job.id).await.unwrap();
    assert!(store.saved_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_backend_kv_contract() {
    let dir = tempfile::tempdir().unwrap();
    let backend = SqliteBackend::new(dir.path().join("kv.sqlite3")).unwrap();

    assert!(backend.get("missing").await.unwrap().is_none());

    backend.set("k", "v1").await.unwrap();
    assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v1"));

    backend.set("k", "v2").await.unwrap();
    assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v2"));

    backend.remove("k").await.unwrap();
    assert!(backend.get("k").await.unwrap().is_none());
    // Removing again is fine.
    backend.remove("k").await.unwrap();
}

#[tokio::test]
async fn serialized_job_uses_camel_case_wire_field_names() {
    let job = sample_job("Engineer");
    let value = serde_json::to_value(&job).unwrap();

    assert!(value.get("datePosted").is_some());
    assert_eq!(value["type"], "contract");
    assert_eq!(value["source"], "LinkedIn");
    assert!(value.get("date_posted").is_none());
    assert!(value.get("job_type").is_none());
}
