//! Training records and their chat-format serialization

use serde::{Deserialize, Serialize};

/// Instruction placed before every requirement in the user turn
pub const USER_PROMPT_PREFIX: &str = "Write a proposal section based on this RFP section:\n\n";

/// One (requirement, answer) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub requirement: String,
    pub answer: String,
}

impl TrainingRecord {
    pub fn new(requirement: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            answer: answer.into(),
        }
    }

    /// Chat-style example: user asks with the requirement, assistant answers
    pub fn to_chat_example(&self) -> ChatExample {
        ChatExample {
            messages: vec![
                ChatMessage {
                    role: Role::User,
                    content: format!("{}{}", USER_PROMPT_PREFIX, self.requirement),
                },
                ChatMessage {
                    role: Role::Assistant,
                    content: self.answer.clone(),
                },
            ],
        }
    }
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// One line of the output dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExample {
    pub messages: Vec<ChatMessage>,
}
