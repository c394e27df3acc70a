/// Login, signup and logout flows over an external authentication service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::notice::Notice;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication service unreachable: {0}")]
    Unreachable(String),
    #[error("authentication failed: {0}")]
    Failed(String),
}

/// The signed-in user as exposed by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// The authentication collaborator. `Ok(false)` means the service answered
/// and refused: bad credentials for `login`, an existing account for
/// `signup`. `Err` is reserved for the service itself failing.
pub trait Authenticator {
    fn login(&mut self, email: &str, password: &str) -> Result<bool, AuthError>;
    fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<bool, AuthError>;
    fn logout(&mut self);
    fn current_user(&self) -> Option<&User>;
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Signed in; the caller moves on to the dashboard.
    SignedIn(Notice),
    /// Stay on the form and show the notice.
    Rejected(Notice),
    /// A submission is already in flight.
    Busy,
}

impl AuthOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            AuthOutcome::SignedIn(notice) | AuthOutcome::Rejected(notice) => Some(notice),
            AuthOutcome::Busy => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    loading: bool,
}

impl LoginForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark the form as submitting. Returns false if it already is.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.loading, true)
    }

    /// Map the collaborator's answer to an outcome and clear the loading flag.
    pub fn finish(&mut self, result: Result<bool, AuthError>) -> AuthOutcome {
        self.loading = false;
        match result {
            Ok(true) => AuthOutcome::SignedIn(Notice::info(
                "Welcome back!",
                "Successfully logged in to LITREALM",
            )),
            Ok(false) => AuthOutcome::Rejected(Notice::destructive(
                "Login failed",
                "Invalid email or password. Please try again or sign up.",
            )),
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                AuthOutcome::Rejected(Notice::generic_error())
            }
        }
    }

    /// Run the whole submission against `auth`.
    pub fn submit<A: Authenticator + ?Sized>(&mut self, auth: &mut A) -> AuthOutcome {
        if !self.begin() {
            return AuthOutcome::Busy;
        }
        let result = auth.login(&self.email, &self.password);
        self.finish(result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    loading: bool,
}

impl SignupForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check the form and mark it as submitting.
    ///
    /// A password mismatch is reported without contacting the service.
    pub fn begin(&mut self) -> Result<(), AuthOutcome> {
        if self.loading {
            return Err(AuthOutcome::Busy);
        }
        if self.password != self.confirm_password {
            return Err(AuthOutcome::Rejected(Notice::destructive(
                "Passwords don't match",
                "Please make sure both passwords are the same.",
            )));
        }
        self.loading = true;
        Ok(())
    }

    pub fn finish(&mut self, result: Result<bool, AuthError>) -> AuthOutcome {
        self.loading = false;
        match result {
            Ok(true) => AuthOutcome::SignedIn(Notice::info(
                "Welcome to LITREALM!",
                "Your account has been created successfully.",
            )),
            Ok(false) => AuthOutcome::Rejected(Notice::destructive(
                "Account exists",
                "An account with this email already exists. Please login instead.",
            )),
            Err(e) => {
                tracing::warn!(error = %e, "signup failed");
                AuthOutcome::Rejected(Notice::generic_error())
            }
        }
    }

    pub fn submit<A: Authenticator + ?Sized>(&mut self, auth: &mut A) -> AuthOutcome {
        if let Err(outcome) = self.begin() {
            return outcome;
        }
        let result = auth.signup(&self.name, &self.email, &self.password);
        self.finish(result)
    }
}

/// Sign out and produce the confirmation notice.
pub fn logout<A: Authenticator + ?Sized>(auth: &mut A) -> Notice {
    auth.logout();
    tracing::info!("signed out");
    logged_out()
}

/// Confirmation shown once the session has been signed out.
pub fn logged_out() -> Notice {
    Notice::info("Logged out", "You have been successfully logged out.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StubAuth {
        accounts: Vec<(String, String, String)>,
        user: Option<User>,
        down: bool,
        calls: usize,
    }

    impl Authenticator for StubAuth {
        fn login(&mut self, email: &str, password: &str) -> Result<bool, AuthError> {
            self.calls += 1;
            if self.down {
                return Err(AuthError::Unreachable("offline".to_string()));
            }
            let found = self
                .accounts
                .iter()
                .find(|(_, e, p)| e == email && p == password)
                .cloned();
            self.user = found.map(|(name, email, _)| User { name, email });
            Ok(self.user.is_some())
        }

        fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<bool, AuthError> {
            self.calls += 1;
            if self.down {
                return Err(AuthError::Unreachable("offline".to_string()));
            }
            if self.accounts.iter().any(|(_, e, _)| e == email) {
                return Ok(false);
            }
            self.accounts
                .push((name.to_string(), email.to_string(), password.to_string()));
            self.user = Some(User {
                name: name.to_string(),
                email: email.to_string(),
            });
            Ok(true)
        }

        fn logout(&mut self) {
            self.user = None;
        }

        fn current_user(&self) -> Option<&User> {
            self.user.as_ref()
        }
    }

    fn signup_form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn signup_then_login() {
        let mut auth = StubAuth::default();
        let outcome = signup_form("pw", "pw").submit(&mut auth);
        assert!(matches!(&outcome, AuthOutcome::SignedIn(n) if n.title == "Welcome to LITREALM!"));
        assert_eq!(auth.current_user().map(|u| u.name.as_str()), Some("Ada"));

        let notice = logout(&mut auth);
        assert_eq!(notice.title, "Logged out");
        assert!(auth.current_user().is_none());

        let mut login = LoginForm {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        assert!(matches!(login.submit(&mut auth), AuthOutcome::SignedIn(_)));
        assert!(!login.is_loading());
    }

    #[test]
    fn bad_credentials() {
        let mut auth = StubAuth::default();
        let mut login = LoginForm {
            email: "nobody@example.com".to_string(),
            password: "x".to_string(),
            ..Default::default()
        };
        let outcome = login.submit(&mut auth);
        assert_eq!(outcome.notice().unwrap().title, "Login failed");
        assert!(outcome.notice().unwrap().is_error());
    }

    #[test]
    fn duplicate_account() {
        let mut auth = StubAuth::default();
        signup_form("pw", "pw").submit(&mut auth);
        let outcome = signup_form("pw", "pw").submit(&mut auth);
        assert_eq!(outcome.notice().unwrap().title, "Account exists");
    }

    #[test]
    fn mismatched_passwords_skip_service() {
        let mut auth = StubAuth::default();
        let outcome = signup_form("one", "two").submit(&mut auth);
        assert_eq!(outcome.notice().unwrap().title, "Passwords don't match");
        assert_eq!(auth.calls, 0);
    }

    #[test]
    fn service_failure_is_generic() {
        let mut auth = StubAuth {
            down: true,
            ..Default::default()
        };
        let mut login = LoginForm::default();
        assert_eq!(login.submit(&mut auth).notice(), Some(&Notice::generic_error()));
        assert_eq!(
            signup_form("pw", "pw").submit(&mut auth).notice(),
            Some(&Notice::generic_error())
        );
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let mut login = LoginForm::default();
        assert!(login.begin());
        assert!(!login.begin());
        let mut auth = StubAuth::default();
        assert_eq!(login.submit(&mut auth), AuthOutcome::Busy);
        assert_eq!(auth.calls, 0);

        login.finish(Ok(false));
        assert!(!login.is_loading());

        let mut signup = signup_form("pw", "pw");
        signup.begin().unwrap();
        assert_eq!(signup.submit(&mut auth), AuthOutcome::Busy);
    }
}
