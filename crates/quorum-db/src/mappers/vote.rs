//! Vote entity <-> model mapper
//!
//! The conversion is fallible: the stored discriminator must name a known
//! target kind. The schema CHECK makes a bad value unreachable in practice,
//! but the mapper does not assume it.

use quorum_core::entities::{Vote, VoteTarget, VoteTargetKind};
use quorum_core::error::DomainError;
use quorum_core::value_objects::Snowflake;

use crate::models::VoteModel;

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let kind = VoteTargetKind::from_i16(model.target_kind).ok_or_else(|| {
            DomainError::Database(format!("invalid vote target kind: {}", model.target_kind))
        })?;
        Ok(Vote {
            id: Snowflake::new(model.id),
            voter_id: Snowflake::new(model.voter_id),
            target: VoteTarget::from_parts(kind, Snowflake::new(model.target_id)),
            weight: model.weight,
        })
    }
}
