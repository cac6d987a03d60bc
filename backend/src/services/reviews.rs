//! Review posting and voting, gated by the owning event's phase.
//!
//! Creating and editing a review requires [`EventPhase::Posting`]; casting or
//! withdrawing an evaluation requires [`EventPhase::Voting`]. Any other phase,
//! including the gaps between windows, rejects the action without changing
//! stored state.

use chrono::{DateTime, Utc};

use super::error::{ServiceError, ServiceResult};
use super::event_status::{compute_status, EventPhase};
use crate::db::repository::{
    EventRepository, FullRepository, RepositoryError, ReviewRepository,
};
use crate::models::{EventId, Review, ReviewDraft, ReviewId};

fn require_phase(required: EventPhase, actual: EventPhase) -> ServiceResult<()> {
    if required == actual {
        Ok(())
    } else {
        Err(ServiceError::PhaseClosed { required, actual })
    }
}

fn require_text(value: &str, what: &str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(value.to_string())
}

async fn phase_of<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    now: DateTime<Utc>,
) -> ServiceResult<EventPhase> {
    let event = repo.get_event(event_id).await?;
    Ok(compute_status(&event.schedule, now))
}

pub async fn list_reviews<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
) -> ServiceResult<Vec<Review>> {
    Ok(repo.list_reviews(event_id).await?)
}

pub async fn create_review<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    draft: &ReviewDraft,
    now: DateTime<Utc>,
) -> ServiceResult<Review> {
    let draft = ReviewDraft {
        author: require_text(&draft.author, "Review author")?,
        body: require_text(&draft.body, "Review body")?,
    };

    let phase = phase_of(repo, event_id, now).await?;
    require_phase(EventPhase::Posting, phase).inspect_err(|_| {
        log::info!("Review for event {} refused in phase {}", event_id, phase);
    })?;

    let review = repo.insert_review(event_id, &draft, now).await?;
    log::info!("Review {} posted to event {}", review.id, event_id);
    Ok(review)
}

pub async fn edit_review<R: FullRepository + ?Sized>(
    repo: &R,
    review_id: ReviewId,
    body: &str,
    now: DateTime<Utc>,
) -> ServiceResult<Review> {
    let body = require_text(body, "Review body")?;
    let review = repo.get_review(review_id).await?;

    let phase = phase_of(repo, review.event_id, now).await?;
    require_phase(EventPhase::Posting, phase).inspect_err(|_| {
        log::info!("Edit of review {} refused in phase {}", review_id, phase);
    })?;

    Ok(repo.update_review_body(review_id, &body, now).await?)
}

async fn adjust_evaluation<R: FullRepository + ?Sized>(
    repo: &R,
    review_id: ReviewId,
    delta: i32,
    now: DateTime<Utc>,
) -> ServiceResult<Review> {
    let review = repo.get_review(review_id).await?;

    let phase = phase_of(repo, review.event_id, now).await?;
    require_phase(EventPhase::Voting, phase).inspect_err(|_| {
        log::info!("Vote on review {} refused in phase {}", review_id, phase);
    })?;

    match repo.adjust_evaluation(review_id, delta).await {
        Ok(review) => {
            log::debug!(
                "Review {} evaluation count is now {}",
                review_id,
                review.evaluation_count
            );
            Ok(review)
        }
        Err(RepositoryError::ValidationError { .. }) => {
            let limit = if delta < 0 { "already zero" } else { "at its maximum" };
            Err(ServiceError::InvalidInput(format!(
                "Evaluation count of review {} is {}",
                review_id, limit
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Cast one evaluation for a review.
pub async fn increment_evaluation<R: FullRepository + ?Sized>(
    repo: &R,
    review_id: ReviewId,
    now: DateTime<Utc>,
) -> ServiceResult<Review> {
    adjust_evaluation(repo, review_id, 1, now).await
}

/// Withdraw one evaluation from a review. Fails when the count is zero.
pub async fn decrement_evaluation<R: FullRepository + ?Sized>(
    repo: &R,
    review_id: ReviewId,
    now: DateTime<Utc>,
) -> ServiceResult<Review> {
    adjust_evaluation(repo, review_id, -1, now).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::{EventDraft, EventSchedule};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn posting_time() -> DateTime<Utc> {
        t0() + Duration::days(3)
    }

    fn gap_time() -> DateTime<Utc> {
        t0() + Duration::days(11)
    }

    fn voting_time() -> DateTime<Utc> {
        t0() + Duration::days(15)
    }

    async fn seeded() -> (LocalRepository, EventId) {
        let repo = LocalRepository::new();
        let t = t0();
        let draft = EventDraft {
            title: "Summer".to_string(),
            description: String::new(),
            schedule: EventSchedule {
                event_start: Some(t),
                posting_start: Some(t + Duration::days(1)),
                posting_end: Some(t + Duration::days(10)),
                voting_start: Some(t + Duration::days(12)),
                voting_end: Some(t + Duration::days(20)),
                event_end: Some(t + Duration::days(30)),
            },
        };
        let event = repo.insert_event(&draft, t).await.unwrap();
        (repo, event.id)
    }

    fn review() -> ReviewDraft {
        ReviewDraft {
            author: "bob".to_string(),
            body: "  loved it  ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_review_posted_during_posting_phase() {
        let (repo, event_id) = seeded().await;
        let created = create_review(&repo, event_id, &review(), posting_time())
            .await
            .unwrap();
        assert_eq!(created.body, "loved it");
        assert_eq!(list_reviews(&repo, event_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_review_refused_outside_posting_phase() {
        let (repo, event_id) = seeded().await;
        for now in [t0() - Duration::days(1), gap_time(), voting_time()] {
            let err = create_review(&repo, event_id, &review(), now)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ServiceError::PhaseClosed {
                    required: EventPhase::Posting,
                    ..
                }
            ));
        }
        assert_eq!(repo.review_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_only_during_posting() {
        let (repo, event_id) = seeded().await;
        let created = create_review(&repo, event_id, &review(), posting_time())
            .await
            .unwrap();

        let edited = edit_review(&repo, created.id, "changed", posting_time())
            .await
            .unwrap();
        assert_eq!(edited.body, "changed");

        let err = edit_review(&repo, created.id, "late", gap_time())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::PhaseClosed {
                actual: EventPhase::Gap,
                ..
            }
        ));
        assert_eq!(repo.get_review(created.id).await.unwrap().body, "changed");
    }

    #[tokio::test]
    async fn test_votes_only_during_voting() {
        let (repo, event_id) = seeded().await;
        let created = create_review(&repo, event_id, &review(), posting_time())
            .await
            .unwrap();

        let err = increment_evaluation(&repo, created.id, posting_time())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::PhaseClosed {
                required: EventPhase::Voting,
                actual: EventPhase::Posting,
            }
        ));

        let voted = increment_evaluation(&repo, created.id, voting_time())
            .await
            .unwrap();
        assert_eq!(voted.evaluation_count, 1);

        let withdrawn = decrement_evaluation(&repo, created.id, voting_time())
            .await
            .unwrap();
        assert_eq!(withdrawn.evaluation_count, 0);
    }

    #[tokio::test]
    async fn test_decrement_below_zero_rejected() {
        let (repo, event_id) = seeded().await;
        let created = create_review(&repo, event_id, &review(), posting_time())
            .await
            .unwrap();
        let err = decrement_evaluation(&repo, created.id, voting_time())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("already zero")));
    }

    #[tokio::test]
    async fn test_increment_past_maximum_rejected() {
        let (repo, event_id) = seeded().await;
        let created = create_review(&repo, event_id, &review(), posting_time())
            .await
            .unwrap();
        repo.adjust_evaluation(created.id, i32::MAX).await.unwrap();
        repo.adjust_evaluation(created.id, i32::MAX).await.unwrap();
        let full = repo.adjust_evaluation(created.id, 1).await.unwrap();
        assert_eq!(full.evaluation_count, u32::MAX);

        let err = increment_evaluation(&repo, created.id, voting_time())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("maximum")));
        assert_eq!(
            repo.get_review(created.id).await.unwrap().evaluation_count,
            u32::MAX
        );
    }

    #[tokio::test]
    async fn test_blank_review_rejected_before_phase_check() {
        let (repo, event_id) = seeded().await;
        let draft = ReviewDraft {
            author: "bob".to_string(),
            body: "   ".to_string(),
        };
        let err = create_review(&repo, event_id, &draft, gap_time())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_review_is_not_found() {
        let (repo, _) = seeded().await;
        let err = increment_evaluation(&repo, ReviewId(77), voting_time())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repository(ref e) if e.is_not_found()));
    }
}
