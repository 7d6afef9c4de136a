//! Prompt value object

use serde::{Deserialize, Serialize};

/// One generation request: an optional system instruction and the user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub user: String,
}

impl Prompt {
    /// A system instruction followed by a user turn.
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            user: user.into(),
        }
    }

    /// A bare user turn with no instruction.
    pub fn user(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.system {
            Some(system) => write!(f, "{}\n\n{}", system, self.user),
            None => write!(f, "{}", self.user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_system() {
        let prompt = Prompt::with_system("Be brief.", "Who?");
        assert_eq!(prompt.to_string(), "Be brief.\n\nWho?");
    }

    #[test]
    fn test_user_only_skips_system_in_json() {
        let json = serde_json::to_string(&Prompt::user("Who?")).unwrap();
        assert_eq!(json, r#"{"user":"Who?"}"#);
    }
}
