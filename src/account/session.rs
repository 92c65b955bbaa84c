/// The logged-in user of one menu context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, user_name: &str) {
        self.user_name = Some(user_name.to_string());
    }

    /// Returns the user that was logged out, if any.
    pub fn logout(&mut self) -> Option<String> {
        self.user_name.take()
    }

    pub fn current(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.user_name.is_some()
    }

    pub fn is_user(&self, user_name: &str) -> bool {
        self.current() == Some(user_name)
    }
}
