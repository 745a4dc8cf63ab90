use crate::core::UserId;
use crate::models::User;

/// Who is making the current request. Anonymous viewers carry no user.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub user: Option<User>,
    pub request_id: String,
}

impl ViewerContext {
    pub fn anonymous(request_id: String) -> Self {
        Self {
            user: None,
            request_id,
        }
    }

    pub fn authenticated(user: User, request_id: String) -> Self {
        Self {
            user: Some(user),
            request_id,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }
}
