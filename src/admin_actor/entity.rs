use chrono::Utc;
use std::collections::HashMap;

use super::actions::{AdminAction, AdminActionResult};
use super::credentials::{self, MIN_PASSWORD_LEN};
use crate::actor_framework::Entity;
use crate::domain::{AdminAccount, AdminCreate, AdminPatch};

fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    Ok(())
}

impl AdminAccount {
    fn prune_expired_sessions(&mut self) {
        let now = Utc::now();
        self.sessions.retain(|_, expires_at| *expires_at > now);
    }

    fn password_matches(&self, password: &str) -> bool {
        credentials::verify(&self.salt, password, &self.password_digest)
    }
}

impl Entity for AdminAccount {
    type Id = String;
    type CreatePayload = AdminCreate;
    type Patch = AdminPatch;
    type Action = AdminAction;
    type ActionResult = AdminActionResult;

    const KIND: &'static str = "admins";

    fn id(&self) -> &String {
        &self.username
    }

    fn requested_id(payload: &AdminCreate) -> Option<String> {
        Some(payload.username.trim().to_string())
    }

    fn from_create(username: String, payload: AdminCreate) -> Result<Self, String> {
        if username.is_empty() {
            return Err("username is required".to_string());
        }
        validate_password(&payload.password)?;
        let salt = credentials::new_salt();
        Ok(Self {
            password_digest: credentials::digest(&salt, &payload.password),
            salt,
            username,
            email: payload.email,
            session_ttl: payload.session_ttl,
            sessions: HashMap::new(),
        })
    }

    fn on_update(&mut self, patch: AdminPatch) -> Result<(), String> {
        if let Some(email) = patch.email {
            self.email = email;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: AdminAction) -> Result<AdminActionResult, String> {
        self.prune_expired_sessions();
        match action {
            AdminAction::VerifyPassword(password) => {
                Ok(AdminActionResult::VerifyPassword(self.password_matches(&password)))
            }
            AdminAction::Login(password) => {
                if !self.password_matches(&password) {
                    return Ok(AdminActionResult::Login(None));
                }
                let token = credentials::new_session_token();
                self.sessions.insert(token.clone(), Utc::now() + self.session_ttl);
                Ok(AdminActionResult::Login(Some(token)))
            }
            AdminAction::ValidateSession(token) => {
                Ok(AdminActionResult::ValidateSession(self.sessions.contains_key(&token)))
            }
            AdminAction::Logout(token) => {
                Ok(AdminActionResult::Logout(self.sessions.remove(&token).is_some()))
            }
            AdminAction::ChangePassword { current, new } => {
                if !self.password_matches(&current) {
                    return Ok(AdminActionResult::ChangePassword(false));
                }
                validate_password(&new)?;
                self.salt = credentials::new_salt();
                self.password_digest = credentials::digest(&self.salt, &new);
                // Existing sessions were opened with the old password.
                self.sessions.clear();
                Ok(AdminActionResult::ChangePassword(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(ttl: Duration) -> AdminAccount {
        let payload = AdminCreate {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "s3cret-pass".into(),
            session_ttl: ttl,
        };
        AdminAccount::from_create("admin".into(), payload).unwrap()
    }

    fn login(account: &mut AdminAccount, password: &str) -> Option<String> {
        match account.handle_action(AdminAction::Login(password.into())).unwrap() {
            AdminActionResult::Login(token) => token,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_password_is_not_stored_in_plaintext() {
        let account = account(Duration::hours(1));
        assert_ne!(account.password_digest, "s3cret-pass");
        assert!(account.password_matches("s3cret-pass"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let payload = AdminCreate {
            username: "admin".into(),
            email: String::new(),
            password: "short".into(),
            session_ttl: Duration::hours(1),
        };
        assert!(AdminAccount::from_create("admin".into(), payload).is_err());
    }

    #[test]
    fn test_login_and_logout() {
        let mut account = account(Duration::hours(1));
        assert_eq!(login(&mut account, "wrong-password"), None);

        let token = login(&mut account, "s3cret-pass").unwrap();
        assert_eq!(
            account.handle_action(AdminAction::ValidateSession(token.clone())),
            Ok(AdminActionResult::ValidateSession(true))
        );
        assert_eq!(
            account.handle_action(AdminAction::Logout(token.clone())),
            Ok(AdminActionResult::Logout(true))
        );
        assert_eq!(
            account.handle_action(AdminAction::ValidateSession(token)),
            Ok(AdminActionResult::ValidateSession(false))
        );
    }

    #[test]
    fn test_expired_sessions_are_invalid() {
        let mut account = account(Duration::zero());
        let token = login(&mut account, "s3cret-pass").unwrap();
        assert_eq!(
            account.handle_action(AdminAction::ValidateSession(token)),
            Ok(AdminActionResult::ValidateSession(false))
        );
    }

    #[test]
    fn test_change_password_revokes_sessions() {
        let mut account = account(Duration::hours(1));
        let token = login(&mut account, "s3cret-pass").unwrap();
        let change = AdminAction::ChangePassword {
            current: "s3cret-pass".into(),
            new: "even-better-pass".into(),
        };
        assert_eq!(account.handle_action(change), Ok(AdminActionResult::ChangePassword(true)));
        assert_eq!(
            account.handle_action(AdminAction::ValidateSession(token)),
            Ok(AdminActionResult::ValidateSession(false))
        );
        assert!(login(&mut account, "even-better-pass").is_some());
    }
}
