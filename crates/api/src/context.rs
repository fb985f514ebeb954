use eventtier_core::UserId;

/// Principal context for a request (authenticated identity).
///
/// Inserted by the auth middleware; the tier is *not* carried here because it
/// is read from the profile on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
    email: Option<String>,
}

impl PrincipalContext {
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
