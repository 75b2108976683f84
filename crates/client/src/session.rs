/// Juror signed in to the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JuryIdentity {
    pub id: i64,
    pub name: Option<String>,
}

/// Credentials and identity established once at login and passed explicitly
/// to every workflow that needs them.
#[derive(Clone)]
pub struct Session {
    token: String,
    jury: Option<JuryIdentity>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            jury: None,
        }
    }

    pub fn with_jury(mut self, jury: JuryIdentity) -> Self {
        self.jury = Some(jury);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn jury(&self) -> Option<&JuryIdentity> {
        self.jury.as_ref()
    }

    pub fn jury_id(&self) -> crate::Result<i64> {
        self.jury
            .as_ref()
            .map(|j| j.id)
            .ok_or(crate::ClientError::MissingJuryIdentity)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("jury", &self.jury)
            .finish()
    }
}
