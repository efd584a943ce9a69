//! Authentication service
//!
//! Handles user registration, login, and resolving the current user.

use forum_common::auth::Session;
use forum_common::AppError;
use forum_core::entities::{NewUser, User};
use forum_core::Role;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        User::validate_username(&username)?;
        User::validate_password(&request.password)?;

        // Checked up front for a precise message; the unique indexes still
        // catch a concurrent registration.
        if self.ctx.user_repo().username_exists(&username, None).await? {
            return Err(ServiceError::conflict("Username already taken"));
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                username,
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        let token = self.issue_token(&user)?;
        Ok(AuthResponse::new(
            "User registered successfully",
            UserResponse::from(&user),
            token,
        ))
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_login(&request.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token = self.issue_token(&user)?;
        Ok(AuthResponse::new(
            "Login successful",
            UserResponse::from(&user),
            token,
        ))
    }

    /// Load the account behind a verified session
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn me(&self, session: &Session) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", session.user_id))?;

        Ok(CurrentUserResponse::from(user))
    }

    /// Verify a bearer token without touching storage
    pub fn verify_session(&self, token: &str) -> ServiceResult<Session> {
        Ok(self.ctx.jwt_service().verify_session(token)?)
    }

    pub(crate) fn issue_token(&self, user: &User) -> ServiceResult<String> {
        Ok(self
            .ctx
            .jwt_service()
            .issue_token(user.id, &user.username, user.role)?)
    }
}
