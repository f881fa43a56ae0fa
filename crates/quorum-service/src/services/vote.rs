//! Vote service - the reconciler for directional votes
//!
//! Applies a +1/-1 intent against the vote store. The find-then-write
//! sequence is a check-then-act pattern, closed here with optimistic
//! concurrency: the first write is a conflict-silent insert, every later
//! write is a compare-and-set on the previous weight, and a lost race
//! re-reads and retries a bounded number of times. The unique index on
//! (voter, target) makes a duplicate row impossible regardless.

use tracing::{info, instrument};

use quorum_core::entities::{Vote, VoteDirection, VoteTarget, VoteTargetKind, VoteTransition};
use quorum_core::value_objects::Snowflake;
use quorum_core::DomainError;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Attempts before write contention on one (voter, target) key surfaces
/// as ConflictRetryExhausted
const MAX_VOTE_ATTEMPTS: u32 = 3;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a directional vote and return the owning question id
    ///
    /// For an answer vote the owning question is the answer's parent, so
    /// the caller can navigate back to the detail view. The call is
    /// all-or-nothing: it either lands one write, is a no-op (same-sign
    /// repeat), or fails without side effects.
    #[instrument(skip(self))]
    pub async fn apply_vote(
        &self,
        voter: Option<Snowflake>,
        target_kind: &str,
        target_id: Snowflake,
        direction: i64,
    ) -> ServiceResult<Snowflake> {
        let voter_id = voter.ok_or(DomainError::Unauthorized)?;
        let direction =
            VoteDirection::from_value(direction).ok_or(DomainError::InvalidDirection(direction))?;
        let kind = VoteTargetKind::parse(target_kind)
            .ok_or_else(|| DomainError::UnknownTargetKind(target_kind.to_string()))?;

        let (target, question_id) = self.resolve_target(kind, target_id).await?;

        for _ in 0..MAX_VOTE_ATTEMPTS {
            match self.ctx.vote_repo().find(voter_id, target).await? {
                None => {
                    let vote = Vote::first(self.ctx.next_id(), voter_id, target, direction);
                    if self.ctx.vote_repo().insert(&vote).await? {
                        info!(
                            voter_id = %voter_id,
                            target_kind = kind.as_str(),
                            target_id = %target_id,
                            weight = vote.weight,
                            "Vote created"
                        );
                        return Ok(question_id);
                    }
                    // a concurrent call created the row first; re-read it
                }
                Some(existing) => match existing.apply(direction) {
                    VoteTransition::Unchanged => return Ok(question_id),
                    VoteTransition::Updated(weight) => {
                        if self
                            .ctx
                            .vote_repo()
                            .update_weight(voter_id, target, existing.weight, weight)
                            .await?
                        {
                            info!(
                                voter_id = %voter_id,
                                target_kind = kind.as_str(),
                                target_id = %target_id,
                                weight,
                                "Vote updated"
                            );
                            return Ok(question_id);
                        }
                        // the stored weight moved underfoot; re-read it
                    }
                },
            }
        }

        Err(DomainError::ConflictRetryExhausted {
            attempts: MAX_VOTE_ATTEMPTS,
        }
        .into())
    }

    /// Live rank of a single target: the sum of its vote weights
    #[instrument(skip(self))]
    pub async fn rank(&self, target: VoteTarget) -> ServiceResult<i64> {
        Ok(self.ctx.vote_repo().rank_of(target).await?)
    }

    /// Check the target exists and resolve its owning question id
    async fn resolve_target(
        &self,
        kind: VoteTargetKind,
        target_id: Snowflake,
    ) -> ServiceResult<(VoteTarget, Snowflake)> {
        match kind {
            VoteTargetKind::Question => {
                let question = self
                    .ctx
                    .question_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(DomainError::QuestionNotFound(target_id))?;
                Ok((VoteTarget::Question(question.id), question.id))
            }
            VoteTargetKind::Answer => {
                let answer = self
                    .ctx
                    .answer_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(DomainError::AnswerNotFound(target_id))?;
                Ok((VoteTarget::Answer(answer.id), answer.question_id))
            }
        }
    }
}
