//! Common types for chat completions.

use serde::{Deserialize, Serialize};

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization() {
        let message = Message {
            role: Role::User,
            content: "Hello!".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello!"}"#);
    }

    #[test]
    fn test_message_roles() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );

        assert_eq!(
            serde_json::from_str::<Role>("\"system\"").unwrap(),
            Role::System
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"assistant\"").unwrap(),
            Role::Assistant
        );
    }

    #[test]
    fn test_message_sequence_order_preserved() {
        let messages = vec![
            Message {
                role: Role::System,
                content: "You are a helpful assistant.".to_string(),
            },
            Message {
                role: Role::User,
                content: "Hi".to_string(),
            },
            Message {
                role: Role::Assistant,
                content: "Hello! How can I help?".to_string(),
            },
            Message {
                role: Role::User,
                content: "What's the time?".to_string(),
            },
        ];

        let json = serde_json::to_string(&messages).unwrap();
        let roundtrip: Vec<Message> = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.len(), 4);
        assert_eq!(roundtrip[0].role, Role::System);
        assert_eq!(roundtrip[1].role, Role::User);
        assert_eq!(roundtrip[2].role, Role::Assistant);
        assert_eq!(roundtrip[3].content, "What's the time?");
    }
}
