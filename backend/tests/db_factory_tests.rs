//! Tests for db::factory - repository creation from settings.

mod support;

use std::io::Write;
use std::str::FromStr;

use event_portal::config::RepositorySettings;
use event_portal::db::factory::{RepositoryFactory, RepositoryType};
use event_portal::db::repository::{EventRepository, RepositoryError};
use event_portal::services::{compute_status, EventPhase};
use tempfile::NamedTempFile;

fn seed_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_repository_type_from_str_local() {
    assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str(" memory ").unwrap(), RepositoryType::Local);
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("postgres");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[tokio::test]
async fn test_create_empty_local() {
    let repo = RepositoryFactory::create(&RepositorySettings::default()).unwrap();
    assert!(repo.health_check().await.unwrap());
    assert!(repo.list_events().await.unwrap().is_empty());
}

#[test]
fn test_create_rejects_unknown_type() {
    let settings = RepositorySettings {
        repo_type: "azure".to_string(),
        seed_file: None,
    };
    match RepositoryFactory::create(&settings) {
        Err(RepositoryError::ConfigurationError { message, .. }) => {
            assert!(message.contains("azure"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unknown repository type accepted"),
    }
}

#[tokio::test]
async fn test_create_seeded_local() {
    let file = seed_file(
        r#"[
  {
    "title": "January",
    "schedule": {
      "event_start": "2024-01-01T00:00:00Z",
      "posting_start": "2024-01-02T00:00:00Z",
      "posting_end": "2024-01-10T00:00:00Z",
      "event_end": "2024-01-31T00:00:00Z"
    }
  },
  { "title": "Unscheduled" }
]"#,
    );
    let settings = RepositorySettings {
        repo_type: "local".to_string(),
        seed_file: Some(file.path().to_path_buf()),
    };
    let repo = RepositoryFactory::create(&settings).unwrap();

    let events = repo.list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    let january = events.iter().find(|e| e.title == "January").unwrap();
    assert_eq!(
        compute_status(&january.schedule, support::during_posting()),
        EventPhase::Posting
    );
    let unscheduled = events.iter().find(|e| e.title == "Unscheduled").unwrap();
    assert!(unscheduled.schedule.is_empty());
}

#[test]
fn test_bad_seed_file_is_configuration_error() {
    let file = seed_file("{ not json");
    let settings = RepositorySettings {
        repo_type: "local".to_string(),
        seed_file: Some(file.path().to_path_buf()),
    };
    assert!(matches!(
        RepositoryFactory::create(&settings),
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[test]
fn test_seed_file_with_inconsistent_schedule_is_rejected() {
    // Posting and voting windows overlap.
    let file = seed_file(
        r#"[
  { "title": "Fine" },
  {
    "title": "Overlapping",
    "schedule": {
      "posting_start": "2024-01-02T00:00:00Z",
      "posting_end": "2024-01-12T00:00:00Z",
      "voting_start": "2024-01-10T00:00:00Z",
      "voting_end": "2024-01-20T00:00:00Z"
    }
  }
]"#,
    );
    let settings = RepositorySettings {
        repo_type: "local".to_string(),
        seed_file: Some(file.path().to_path_buf()),
    };
    match RepositoryFactory::create(&settings) {
        Err(RepositoryError::ConfigurationError { message, .. }) => {
            assert!(message.contains("Overlapping"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("inconsistent seed schedule accepted"),
    }
}
