/// Custom actions for admin accounts. Secrets are redacted from `Debug`.
#[derive(Clone)]
pub enum AdminAction {
    /// Checks a password without opening a session.
    VerifyPassword(String),
    /// Checks a password and, on success, issues a session token.
    Login(String),
    ValidateSession(String),
    Logout(String),
    ChangePassword { current: String, new: String },
}

impl std::fmt::Debug for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AdminAction::VerifyPassword(_) => "VerifyPassword",
            AdminAction::Login(_) => "Login",
            AdminAction::ValidateSession(_) => "ValidateSession",
            AdminAction::Logout(_) => "Logout",
            AdminAction::ChangePassword { .. } => "ChangePassword",
        };
        write!(f, "{name}(..)")
    }
}

/// Results from AdminActions - variants match 1:1 with AdminAction
#[derive(Clone, PartialEq)]
pub enum AdminActionResult {
    VerifyPassword(bool),
    /// `None` when the password is wrong.
    Login(Option<String>),
    ValidateSession(bool),
    Logout(bool),
    ChangePassword(bool),
}

impl std::fmt::Debug for AdminActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminActionResult::VerifyPassword(ok) => write!(f, "VerifyPassword({ok})"),
            AdminActionResult::Login(token) => write!(f, "Login(issued: {})", token.is_some()),
            AdminActionResult::ValidateSession(ok) => write!(f, "ValidateSession({ok})"),
            AdminActionResult::Logout(ok) => write!(f, "Logout({ok})"),
            AdminActionResult::ChangePassword(ok) => write!(f, "ChangePassword({ok})"),
        }
    }
}
