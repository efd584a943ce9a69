//! User model -> entity mapper

use forum_core::{Id, Role, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Id::new(model.id),
            username: model.username,
            email: model.email,
            // the column CHECK admits only known roles
            role: model.role.parse().unwrap_or(Role::User),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
