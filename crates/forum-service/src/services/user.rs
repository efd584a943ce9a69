//! User service
//!
//! Handles public profiles and the caller's own profile and password.

use forum_common::auth::Session;
use forum_core::entities::User;
use forum_core::Id;
use tracing::{info, instrument};

use crate::dto::{
    AuthResponse, ChangePasswordRequest, MessageResponse, PublicUserResponse,
    UpdateProfileRequest, UserResponse,
};

use super::auth::AuthService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Id) -> ServiceResult<PublicUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        Ok(PublicUserResponse::from(user))
    }

    /// Rename the caller
    ///
    /// The username is a token claim, so a fresh token is returned.
    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn update_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> ServiceResult<AuthResponse> {
        let username = request.username.trim();
        User::validate_username(username)?;

        if self
            .ctx
            .user_repo()
            .username_exists(username, Some(session.user_id))
            .await?
        {
            return Err(ServiceError::conflict("Username already taken"));
        }

        let user = self
            .ctx
            .user_repo()
            .update_username(session.user_id, username)
            .await?;

        info!(username = %user.username, "Profile updated");

        let token = AuthService::new(self.ctx).issue_token(&user)?;
        Ok(AuthResponse::new(
            "Profile updated successfully",
            UserResponse::from(&user),
            token,
        ))
    }

    /// Change the caller's password after checking the current one
    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn change_password(
        &self,
        session: &Session,
        request: ChangePasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        User::validate_password(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(session.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", session.user_id))?;

        self.ctx
            .password_service()
            .verify_current(&request.current_password, &current_hash)?;

        let new_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(session.user_id, &new_hash)
            .await?;

        info!("Password changed");

        Ok(MessageResponse::new("Password updated successfully"))
    }
}
