//! Conversation turns

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::System => write!(f, "system"),
        }
    }
}

/// One message in the conversation
///
/// Fields are private so a turn cannot change once it has been recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    /// Clarifying questions, only on system turns that ask for more detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    questions: Option<Vec<String>>,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            questions: None,
        }
    }

    /// Create a plain system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            questions: None,
        }
    }

    /// Create a system turn that asks the user clarifying questions
    pub fn clarification(analysis: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            role: Role::System,
            content: analysis.into(),
            questions: Some(questions),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clarifying questions, empty unless this is a clarification turn
    pub fn questions(&self) -> &[String] {
        self.questions.as_deref().unwrap_or_default()
    }

    pub fn is_clarification(&self) -> bool {
        self.questions.is_some()
    }
}
