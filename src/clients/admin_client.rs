use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::admin_actor::{AdminAction, AdminActionResult, AdminError};
use crate::domain::{AdminAccount, AdminCreate, AdminSession};

/// Client for interacting with the admin account actor.
#[derive(Clone)]
pub struct AdminClient {
    inner: ResourceClient<AdminAccount>,
}

impl_client_new!(AdminClient, AdminAccount);

impl AdminClient {
    #[instrument(skip(self, payload), fields(username = %payload.username))]
    pub async fn register(&self, payload: AdminCreate) -> Result<String, AdminError> {
        debug!("Sending request");
        let username = self.inner.create(payload).await?;
        info!("Admin account registered");
        Ok(username)
    }

    async fn act(&self, username: &str, action: AdminAction) -> Result<Option<AdminActionResult>, AdminError> {
        match self.inner.perform_action(username.to_string(), action).await {
            Ok(result) => Ok(Some(result)),
            // Unknown accounts look exactly like wrong passwords to the caller.
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// True only for an existing account with a matching password.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<bool, AdminError> {
        debug!("Sending request");
        match self.act(username, AdminAction::VerifyPassword(password.to_string())).await? {
            Some(AdminActionResult::VerifyPassword(ok)) => Ok(ok),
            Some(other) => Err(unexpected(other)),
            None => Ok(false),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AdminError> {
        debug!("Sending request");
        match self.act(username, AdminAction::Login(password.to_string())).await? {
            Some(AdminActionResult::Login(Some(token))) => {
                info!("Admin logged in");
                Ok(AdminSession {
                    username: username.to_string(),
                    token,
                })
            }
            Some(AdminActionResult::Login(None)) | None => {
                warn!("Rejected admin login");
                Err(AdminError::InvalidCredentials)
            }
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Succeeds only while the session is live.
    #[instrument(skip(self))]
    pub async fn authorize(&self, session: &AdminSession) -> Result<(), AdminError> {
        debug!("Sending request");
        match self
            .act(&session.username, AdminAction::ValidateSession(session.token.clone()))
            .await?
        {
            Some(AdminActionResult::ValidateSession(true)) => Ok(()),
            Some(AdminActionResult::ValidateSession(false)) | None => {
                warn!("Rejected admin session");
                Err(AdminError::InvalidSession)
            }
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Returns whether the session was still open.
    #[instrument(skip(self))]
    pub async fn logout(&self, session: &AdminSession) -> Result<bool, AdminError> {
        debug!("Sending request");
        match self
            .act(&session.username, AdminAction::Logout(session.token.clone()))
            .await?
        {
            Some(AdminActionResult::Logout(closed)) => Ok(closed),
            Some(other) => Err(unexpected(other)),
            None => Ok(false),
        }
    }

    /// Changes the password and revokes every open session, including `session`.
    #[instrument(skip(self, current, new))]
    pub async fn change_password(
        &self,
        session: &AdminSession,
        current: &str,
        new: &str,
    ) -> Result<(), AdminError> {
        self.authorize(session).await?;
        let action = AdminAction::ChangePassword {
            current: current.to_string(),
            new: new.to_string(),
        };
        match self.act(&session.username, action).await? {
            Some(AdminActionResult::ChangePassword(true)) => {
                info!("Admin password changed");
                Ok(())
            }
            Some(AdminActionResult::ChangePassword(false)) | None => Err(AdminError::InvalidCredentials),
            Some(other) => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: AdminActionResult) -> AdminError {
    AdminError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}
