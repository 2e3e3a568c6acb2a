use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared request headers sent regardless of crawler identity
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_ENCODING: &str = "gzip, deflate, br";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const RANGE: &str = "bytes=0-1048576";

const LINKEDIN_AGENT: &str = "LinkedInBot/1.0 (+http://www.linkedin.com)";
const TWITTER_AGENT: &str = "Twitterbot/1.0";
const FACEBOOK_AGENT: &str =
    "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";

/// Social crawler whose preview fetch is emulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bot {
    #[default]
    Linkedin,
    Twitter,
    Facebook,
}

impl Bot {
    pub fn user_agent(&self) -> &'static str {
        match self {
            Bot::Linkedin => LINKEDIN_AGENT,
            Bot::Twitter => TWITTER_AGENT,
            Bot::Facebook => FACEBOOK_AGENT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bot::Linkedin => "linkedin",
            Bot::Twitter => "twitter",
            Bot::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable request-header set for one crawler identity.
///
/// Header names are lower-cased; order is fixed (shared headers first,
/// then `user-agent`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProfile {
    bot: Bot,
    headers: [(&'static str, &'static str); 5],
}

impl HeaderProfile {
    pub fn for_bot(bot: Bot) -> Self {
        Self {
            bot,
            headers: [
                ("accept", ACCEPT),
                ("accept-encoding", ACCEPT_ENCODING),
                ("accept-language", ACCEPT_LANGUAGE),
                ("range", RANGE),
                ("user-agent", bot.user_agent()),
            ],
        }
    }

    pub fn bot(&self) -> Bot {
        self.bot
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.headers.iter().copied()
    }

    /// Applies every profile header to an outgoing request
    pub fn apply_to_request_builder(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        self.iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value))
    }
}
