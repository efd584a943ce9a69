//! Admin service
//!
//! Operations reserved for accounts holding the admin role.

use forum_common::auth::Session;
use forum_core::{DomainError, PageRequest};
use tracing::{instrument, warn};

use crate::dto::UserListResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Page through all accounts in registration order
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn list_users(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> ServiceResult<UserListResponse> {
        if !session.is_admin() {
            warn!("Non-admin attempted to list users");
            return Err(DomainError::AdminRequired.into());
        }

        let users = self.ctx.user_repo().list(page).await?;
        Ok(UserListResponse::from(users))
    }
}
