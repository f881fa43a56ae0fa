//! User entity <-> model mapper

use quorum_core::entities::User;
use quorum_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            avatar: model.avatar,
            created_at: model.created_at,
        }
    }
}
