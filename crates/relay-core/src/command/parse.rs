//! Slash-command parsing.
//!
//! Dispatch is on the first whitespace-delimited token. Anything that is not
//! a recognised command with a non-empty argument becomes `Help`.

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// `/name <value>`: set the caller's display name.
    Name(String),
    /// `/channel <value>`: move the caller to another channel.
    Channel(String),
    Help,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Self {
        let text = text.trim_start();
        let (token, argument) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        match token {
            "/name" => non_empty(argument.trim()).map_or(Self::Help, Self::Name),
            "/channel" => {
                let channel = argument
                    .trim()
                    .trim_start_matches(|c: char| c == '#' || c.is_whitespace());
                non_empty(channel).map_or(Self::Help, Self::Channel)
            }
            _ => Self::Help,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
