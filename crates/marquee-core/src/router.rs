use std::{collections::HashMap, sync::Arc};

use crate::{config::Config, domain::ChatId, messages, store::SubscriptionStore};

/// One decoded inbound user message, as handed over by the transport
/// adapter. `text` is `None` for messages without a text body (photos,
/// stickers); those produce no reply at all.
#[derive(Clone, Debug)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub text: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Subscribe,
    Unsubscribe,
    Status,
}

/// Literal string → intent mapping.
///
/// Covers the canonical slash commands plus any configured button-label
/// aliases, so a new localization is a data change, not a new match arm.
/// Matching is exact: no prefix matching, no case folding.
#[derive(Clone, Debug)]
pub struct AliasTable {
    aliases: HashMap<String, Intent>,
}

impl AliasTable {
    /// Canonical slash commands only.
    pub fn with_defaults() -> Self {
        let mut table = Self {
            aliases: HashMap::new(),
        };
        table.insert("/start", Intent::Subscribe);
        table.insert("/stop", Intent::Unsubscribe);
        table.insert("/status", Intent::Status);
        table
    }

    /// Canonical commands plus the configured extra aliases.
    pub fn from_config(cfg: &Config) -> Self {
        let mut table = Self::with_defaults();
        for (extras, intent) in [
            (&cfg.subscribe_aliases, Intent::Subscribe),
            (&cfg.unsubscribe_aliases, Intent::Unsubscribe),
            (&cfg.status_aliases, Intent::Status),
        ] {
            for alias in extras {
                table.insert(alias, intent);
            }
        }
        table
    }

    pub fn insert(&mut self, literal: &str, intent: Intent) {
        self.aliases.insert(literal.to_string(), intent);
    }

    fn lookup(&self, text: &str) -> Option<Intent> {
        self.aliases.get(text).copied()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyFormat {
    Plain,
    /// Telegram-HTML formatted text.
    Html,
}

#[derive(Clone, Debug)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
    /// `false` when the input fell through to the unknown-command reply.
    pub recognized: bool,
}

/// The router's decision for one event. `Ignored` means the adapter sends
/// nothing; a `Reply` is always sent, recognized command or not.
#[derive(Clone, Debug)]
pub enum Outcome {
    Reply(Reply),
    Ignored,
}

/// Maps one inbound event to one outcome, with state changes confined to
/// the injected store.
pub struct CommandRouter {
    store: Arc<dyn SubscriptionStore>,
    aliases: AliasTable,
}

impl CommandRouter {
    pub fn new(store: Arc<dyn SubscriptionStore>, aliases: AliasTable) -> Self {
        Self { store, aliases }
    }

    pub fn handle(&self, event: &InboundEvent) -> Outcome {
        let Some(text) = event.text.as_deref() else {
            return Outcome::Ignored;
        };

        match self.aliases.lookup(text.trim()) {
            Some(Intent::Subscribe) => {
                let name = display_name(event);
                let text = if self.store.add(event.chat_id) {
                    messages::welcome(name)
                } else {
                    messages::already_subscribed(name)
                };
                plain(text)
            }
            Some(Intent::Unsubscribe) => {
                let text = if self.store.remove(event.chat_id) {
                    messages::unsubscribed()
                } else {
                    messages::not_subscribed()
                };
                plain(text)
            }
            Some(Intent::Status) => {
                let text = if self.store.contains(event.chat_id) {
                    messages::status_active(self.store.count())
                } else {
                    messages::status_inactive()
                };
                Outcome::Reply(Reply {
                    text,
                    format: ReplyFormat::Html,
                    recognized: true,
                })
            }
            None => Outcome::Reply(Reply {
                text: messages::unknown_command(),
                format: ReplyFormat::Plain,
                recognized: false,
            }),
        }
    }
}

fn plain(text: String) -> Outcome {
    Outcome::Reply(Reply {
        text,
        format: ReplyFormat::Plain,
        recognized: true,
    })
}

// Substituted verbatim; only a missing or blank name gets the placeholder.
fn display_name(event: &InboundEvent) -> &str {
    event
        .display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(messages::FALLBACK_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashSet,
        sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct MemoryStore {
        set: Mutex<HashSet<ChatId>>,
    }

    impl SubscriptionStore for MemoryStore {
        fn add(&self, id: ChatId) -> bool {
            self.set.lock().unwrap().insert(id)
        }

        fn remove(&self, id: ChatId) -> bool {
            self.set.lock().unwrap().remove(&id)
        }

        fn contains(&self, id: ChatId) -> bool {
            self.set.lock().unwrap().contains(&id)
        }

        fn count(&self) -> usize {
            self.set.lock().unwrap().len()
        }

        fn all(&self) -> HashSet<ChatId> {
            self.set.lock().unwrap().clone()
        }
    }

    fn router() -> (CommandRouter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let router = CommandRouter::new(store.clone(), AliasTable::with_defaults());
        (router, store)
    }

    fn event(chat_id: i64, text: &str, name: &str) -> InboundEvent {
        InboundEvent {
            chat_id: ChatId(chat_id),
            text: Some(text.to_string()),
            display_name: Some(name.to_string()),
        }
    }

    fn expect_reply(outcome: Outcome) -> Reply {
        match outcome {
            Outcome::Reply(reply) => reply,
            Outcome::Ignored => panic!("expected a reply, got Ignored"),
        }
    }

    #[test]
    fn start_subscribes_and_greets_by_name() {
        let (router, store) = router();

        let reply = expect_reply(router.handle(&event(42, "/start", "Ana")));
        assert!(reply.recognized);
        assert_eq!(reply.format, ReplyFormat::Plain);
        assert!(reply.text.contains("Ana"));
        assert!(store.contains(ChatId(42)));
    }

    #[test]
    fn second_start_reports_already_subscribed() {
        let (router, store) = router();

        router.handle(&event(42, "/start", "Ana"));
        let reply = expect_reply(router.handle(&event(42, "/start", "Ana")));
        assert!(reply.recognized);
        assert!(reply.text.contains("already subscribed"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn status_for_subscriber_is_html_with_count() {
        let (router, _) = router();

        router.handle(&event(42, "/start", "Ana"));
        let reply = expect_reply(router.handle(&event(42, "/status", "Ana")));
        assert!(reply.recognized);
        assert_eq!(reply.format, ReplyFormat::Html);
        assert!(reply.text.contains("Subscription Active"));
        assert!(reply.text.contains("Total subscribers: 1"));
    }

    #[test]
    fn status_for_non_subscriber_omits_count() {
        let (router, _) = router();

        router.handle(&event(1, "/start", "Ana"));
        let reply = expect_reply(router.handle(&event(2, "/status", "Ben")));
        assert_eq!(reply.format, ReplyFormat::Html);
        assert!(reply.text.contains("Not Subscribed"));
        assert!(!reply.text.contains("Total subscribers"));
    }

    #[test]
    fn stop_unsubscribes() {
        let (router, store) = router();

        router.handle(&event(42, "/start", "Ana"));
        let reply = expect_reply(router.handle(&event(42, "/stop", "Ana")));
        assert!(reply.recognized);
        assert!(reply.text.contains("unsubscribed"));
        assert!(!store.contains(ChatId(42)));
    }

    #[test]
    fn stop_without_subscription_hints_at_start() {
        let (router, _) = router();

        let reply = expect_reply(router.handle(&event(42, "/stop", "Ana")));
        assert!(reply.recognized);
        assert!(reply.text.contains("not currently subscribed"));
        assert!(reply.text.contains("/start"));
    }

    #[test]
    fn unknown_text_lists_commands_and_leaves_store_alone() {
        let (router, store) = router();

        let reply = expect_reply(router.handle(&event(7, "banana", "X")));
        assert!(!reply.recognized);
        for cmd in ["/start", "/stop", "/status"] {
            assert!(reply.text.contains(cmd), "missing {cmd} in command list");
        }
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn whitespace_only_text_is_unrecognized_not_ignored() {
        let (router, _) = router();

        let reply = expect_reply(router.handle(&event(7, "   \n\t", "X")));
        assert!(!reply.recognized);
    }

    #[test]
    fn absent_text_is_ignored() {
        let (router, store) = router();

        let outcome = router.handle(&InboundEvent {
            chat_id: ChatId(7),
            text: None,
            display_name: Some("X".to_string()),
        });
        assert!(matches!(outcome, Outcome::Ignored));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_matching() {
        let (router, store) = router();

        let reply = expect_reply(router.handle(&event(42, "  /start \n", "Ana")));
        assert!(reply.recognized);
        assert!(store.contains(ChatId(42)));
    }

    #[test]
    fn matching_is_exact_no_case_folding_no_suffixes() {
        let (router, store) = router();

        for text in ["/Start", "/start!", "/started", "start"] {
            let reply = expect_reply(router.handle(&event(42, text, "Ana")));
            assert!(!reply.recognized, "{text:?} should not match");
        }
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn configured_button_labels_match_via_alias_table() {
        let store = Arc::new(MemoryStore::default());
        let mut aliases = AliasTable::with_defaults();
        aliases.insert("🔔 Abonnieren", Intent::Subscribe);
        aliases.insert("🔕 Abbestellen", Intent::Unsubscribe);
        let router = CommandRouter::new(store.clone(), aliases);

        let reply = expect_reply(router.handle(&event(9, "🔔 Abonnieren", "Mia")));
        assert!(reply.recognized);
        assert!(store.contains(ChatId(9)));

        let reply = expect_reply(router.handle(&event(9, "🔕 Abbestellen", "Mia")));
        assert!(reply.recognized);
        assert!(!store.contains(ChatId(9)));
    }

    #[test]
    fn missing_or_blank_display_name_falls_back_to_placeholder() {
        let (router, _) = router();

        let outcome = router.handle(&InboundEvent {
            chat_id: ChatId(1),
            text: Some("/start".to_string()),
            display_name: None,
        });
        assert!(expect_reply(outcome).text.contains("Welcome, there!"));

        let reply = expect_reply(router.handle(&event(2, "/start", "   ")));
        assert!(reply.text.contains("Welcome, there!"));
    }
}
