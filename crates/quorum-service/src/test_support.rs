//! In-memory repository implementations and fixtures for service tests
//!
//! One `Mutex`-guarded store implements every port, so the services run
//! against real trait objects without a database. Listing order mirrors
//! the SQL contract: both sort keys always apply, id descending breaks
//! remaining ties.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quorum_common::ListingConfig;
use quorum_core::entities::{
    Answer, Question, Ranked, Tag, User, Vote, VoteDirection, VoteTarget,
};
use quorum_core::traits::{
    AnswerRepository, OrderKey, QuestionFilter, QuestionQuery, QuestionRepository, RepoResult,
    TagRepository, UserRepository, VoteRepository,
};
use quorum_core::value_objects::Snowflake;
use quorum_core::DomainError;

use crate::services::ServiceContext;

#[derive(Default)]
pub(crate) struct InMemoryStore {
    questions: Mutex<Vec<Question>>,
    answers: Mutex<Vec<Answer>>,
    tags: Mutex<Vec<Tag>>,
    users: Mutex<Vec<User>>,
    votes: Mutex<Vec<Vote>>,
}

impl InMemoryStore {
    fn rank_of_target(&self, target: VoteTarget) -> i64 {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.target == target)
            .map(|v| i64::from(v.weight))
            .sum()
    }

    fn matches(&self, question: &Question, filter: &QuestionFilter) -> bool {
        match filter {
            QuestionFilter::All => true,
            QuestionFilter::Tag(name) => question.has_tag(name),
            QuestionFilter::Text(needle) => {
                question.label.contains(needle.as_str()) || question.text.contains(needle.as_str())
            }
        }
    }

    fn ranked_questions(&self, filter: &QuestionFilter) -> Vec<Ranked<Question>> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| self.matches(q, filter))
            .map(|q| Ranked::new(q.clone(), self.rank_of_target(VoteTarget::Question(q.id))))
            .collect()
    }
}

fn question_order(order: OrderKey) -> impl Fn(&Ranked<Question>, &Ranked<Question>) -> Ordering {
    move |a, b| {
        let by_rank = b.rank.cmp(&a.rank);
        let by_time = b.item.created_at.cmp(&a.item.created_at);
        let chained = match order {
            OrderKey::RankThenRecency => by_rank.then(by_time),
            OrderKey::RecencyThenRank => by_time.then(by_rank),
        };
        chained.then(b.item.id.cmp(&a.item.id))
    }
}

fn window<T>(mut items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = offset.max(0) as usize;
    let limit = limit.max(0) as usize;
    if offset >= items.len() {
        return Vec::new();
    }
    items.drain(..offset);
    items.truncate(limit);
    items
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn find_ranked(&self, id: Snowflake) -> RepoResult<Option<Ranked<Question>>> {
        let question = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned();
        Ok(question.map(|q| {
            let rank = self.rank_of_target(VoteTarget::Question(q.id));
            Ranked::new(q, rank)
        }))
    }

    async fn create(&self, question: &Question) -> RepoResult<()> {
        self.questions.lock().unwrap().push(question.clone());
        Ok(())
    }

    async fn list_ranked(&self, query: &QuestionQuery) -> RepoResult<Vec<Ranked<Question>>> {
        let mut items = self.ranked_questions(&query.filter);
        items.sort_by(question_order(query.order));
        Ok(window(items, query.limit, query.offset))
    }

    async fn count(&self, filter: &QuestionFilter) -> RepoResult<u64> {
        Ok(self.ranked_questions(filter).len() as u64)
    }

    async fn top_ranked(&self, limit: i64) -> RepoResult<Vec<Ranked<Question>>> {
        let mut items = self.ranked_questions(&QuestionFilter::All);
        items.sort_by(question_order(OrderKey::RankThenRecency));
        Ok(window(items, limit, 0))
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, answer: &Answer) -> RepoResult<()> {
        self.answers.lock().unwrap().push(answer.clone());
        Ok(())
    }

    async fn list_ranked_for_question(
        &self,
        question_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Ranked<Answer>>> {
        let mut items: Vec<Ranked<Answer>> = self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.question_id == question_id)
            .map(|a| Ranked::new(a.clone(), self.rank_of_target(VoteTarget::Answer(a.id))))
            .collect();
        items.sort_by(|a, b| {
            b.item
                .confirmed
                .cmp(&a.item.confirmed)
                .then(b.rank.cmp(&a.rank))
                .then(b.item.created_at.cmp(&a.item.created_at))
                .then(b.item.id.cmp(&a.item.id))
        });
        Ok(window(items, limit, offset))
    }

    async fn count_for_question(&self, question_id: Snowflake) -> RepoResult<u64> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.question_id == question_id)
            .count() as u64)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Tag>> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| names.contains(&t.name))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.name == tag.name) {
            return Err(DomainError::DuplicateTag(tag.name.clone()));
        }
        tags.push(tag.clone());
        Ok(())
    }

    async fn names(&self) -> RepoResult<Vec<String>> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.name.clone())
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.voter_id == voter_id && v.target == target)
            .cloned())
    }

    async fn insert(&self, vote: &Vote) -> RepoResult<bool> {
        let mut votes = self.votes.lock().unwrap();
        if votes
            .iter()
            .any(|v| v.voter_id == vote.voter_id && v.target == vote.target)
        {
            return Ok(false);
        }
        votes.push(vote.clone());
        Ok(true)
    }

    async fn update_weight(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        expected: i32,
        new: i32,
    ) -> RepoResult<bool> {
        let mut votes = self.votes.lock().unwrap();
        match votes
            .iter_mut()
            .find(|v| v.voter_id == voter_id && v.target == target && v.weight == expected)
        {
            Some(vote) => {
                vote.weight = new;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rank_of(&self, target: VoteTarget) -> RepoResult<i64> {
        Ok(self.rank_of_target(target))
    }

    async fn count_for(&self, target: VoteTarget) -> RepoResult<u64> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.target == target)
            .count() as u64)
    }
}

/// Vote store whose writes always lose their race; used to exercise the
/// reconciler's bounded-retry exit
struct ContendedVoteStore;

#[async_trait]
impl VoteRepository for ContendedVoteStore {
    async fn find(&self, _voter_id: Snowflake, _target: VoteTarget) -> RepoResult<Option<Vote>> {
        Ok(None)
    }

    async fn insert(&self, _vote: &Vote) -> RepoResult<bool> {
        Ok(false)
    }

    async fn update_weight(
        &self,
        _voter_id: Snowflake,
        _target: VoteTarget,
        _expected: i32,
        _new: i32,
    ) -> RepoResult<bool> {
        Ok(false)
    }

    async fn rank_of(&self, _target: VoteTarget) -> RepoResult<i64> {
        Ok(0)
    }

    async fn count_for(&self, _target: VoteTarget) -> RepoResult<u64> {
        Ok(0)
    }
}

/// Context over a fresh in-memory store
pub(crate) fn test_context() -> ServiceContext {
    let store = Arc::new(InMemoryStore::default());
    ServiceContext::builder()
        .question_repo(store.clone())
        .answer_repo(store.clone())
        .tag_repo(store.clone())
        .user_repo(store.clone())
        .vote_repo(store)
        .listing(ListingConfig::default())
        .build()
}

/// Context whose vote store never lets a write win
pub(crate) fn contended_context() -> ServiceContext {
    let store = Arc::new(InMemoryStore::default());
    ServiceContext::builder()
        .question_repo(store.clone())
        .answer_repo(store.clone())
        .tag_repo(store.clone())
        .user_repo(store)
        .vote_repo(Arc::new(ContendedVoteStore))
        .listing(ListingConfig::default())
        .build()
}

/// Seed a question with the given tag names (created on first use)
pub(crate) async fn seed_question(
    ctx: &ServiceContext,
    label: &str,
    text: &str,
    tag_names: &[&str],
) -> Snowflake {
    let mut tags = Vec::new();
    for name in tag_names {
        let tag = match ctx.tag_repo().find_by_name(name).await.unwrap() {
            Some(existing) => existing,
            None => {
                let tag = Tag::new(ctx.next_id(), (*name).to_string());
                ctx.tag_repo().create(&tag).await.unwrap();
                tag
            }
        };
        tags.push(tag);
    }
    let mut question = Question::new(
        ctx.next_id(),
        label.to_string(),
        text.to_string(),
        Snowflake::new(1),
    );
    question.tags = tags;
    ctx.question_repo().create(&question).await.unwrap();
    question.id
}

/// Seed an answer on a question
pub(crate) async fn seed_answer(
    ctx: &ServiceContext,
    question_id: Snowflake,
    text: &str,
    confirmed: bool,
) -> Snowflake {
    let mut answer = Answer::new(ctx.next_id(), text.to_string(), Snowflake::new(1), question_id);
    answer.confirmed = confirmed;
    ctx.answer_repo().create(&answer).await.unwrap();
    answer.id
}

/// Give a question `n` up-votes from `n` distinct voters
pub(crate) async fn vote_n_up(ctx: &ServiceContext, question_id: Snowflake, n: u32) {
    for i in 0..n {
        let vote = Vote::first(
            ctx.next_id(),
            Snowflake::new(9_000_000 + i64::from(i)),
            VoteTarget::Question(question_id),
            VoteDirection::Up,
        );
        assert!(ctx.vote_repo().insert(&vote).await.unwrap());
    }
}
