//! Chat provider trait and provider-kind selector.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use super::error::LlmError;
use super::types::Message;

/// Trait for chat-completion providers with different API formats.
///
/// One request/response cycle per call: implementations build the
/// provider-specific request, send it once, and extract the reply text.
/// No retry, no state between calls.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Send the message sequence and return the assistant's reply text.
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError>;
}

/// The kinds of provider the dispatcher can resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Anthropic,
    Local,
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "local" => Ok(ProviderKind::Local),
            other => Err(LlmError::UnknownProvider {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Local => "local",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(
            "anthropic".parse::<ProviderKind>().unwrap(),
            ProviderKind::Anthropic
        );
        assert_eq!("local".parse::<ProviderKind>().unwrap(), ProviderKind::Local);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "mystery".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, LlmError::UnknownProvider { kind } if kind == "mystery"));
    }

    #[test]
    fn test_default_is_openai() {
        assert_eq!(ProviderKind::default(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in [ProviderKind::OpenAi, ProviderKind::Anthropic, ProviderKind::Local] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }
}
