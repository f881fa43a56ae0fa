//! Tag entity <-> model mapper

use quorum_core::entities::Tag;
use quorum_core::value_objects::Snowflake;

use crate::models::TagModel;

/// Convert TagModel to Tag entity
impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
        }
    }
}
