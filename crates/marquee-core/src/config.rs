use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, loaded from the environment.
///
/// Only two things are configuration for the core: where the durable
/// subscriber set lives, and which literal strings map to which command
/// intent. The bot token belongs to the transport adapter but is validated
/// here so a missing credential fails at startup, not per-event.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// Durable resource backing the subscriber store.
    pub subscribers_file: PathBuf,

    /// Extra literal aliases per intent (e.g. localized button labels),
    /// merged with the canonical slash commands by the router.
    pub subscribe_aliases: Vec<String>,
    pub unsubscribe_aliases: Vec<String>,
    pub status_aliases: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let subscribers_file = env_path("SUBSCRIBERS_FILE")
            .unwrap_or_else(|| PathBuf::from("state/subscribers.json"));

        let subscribe_aliases = parse_csv(env_str("SUBSCRIBE_ALIASES"));
        let unsubscribe_aliases = parse_csv(env_str("UNSUBSCRIBE_ALIASES"));
        let status_aliases = parse_csv(env_str("STATUS_ALIASES"));

        Ok(Self {
            telegram_bot_token,
            subscribers_file,
            subscribe_aliases,
            unsubscribe_aliases,
            status_aliases,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_a_config_error() {
        env::remove_var("TELEGRAM_BOT_TOKEN");
        let err = Config::load().expect_err("load without token should fail");
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn csv_parsing_trims_and_drops_empties() {
        assert_eq!(
            parse_csv(Some(" Abonnieren , ,Subscribe".to_string())),
            vec!["Abonnieren".to_string(), "Subscribe".to_string()]
        );
        assert!(parse_csv(None).is_empty());
        assert!(parse_csv(Some("  ,".to_string())).is_empty());
    }
}
