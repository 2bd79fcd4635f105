use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Deserialize, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

impl RegisterPayload {
    /// Trim identifiers and check field rules. Returns the client-facing
    /// message on failure.
    pub fn normalize(mut self) -> Result<Self, &'static str> {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();

        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err("Fields cannot be empty");
        }
        if !is_plausible_email(&self.email) {
            return Err("Invalid email format");
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err("Password must be at least 6 characters");
        }
        Ok(self)
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
