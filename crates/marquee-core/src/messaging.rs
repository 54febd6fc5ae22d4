use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Outbound delivery port.
///
/// Telegram is the first implementation; the router only ever needs its
/// reply delivered as plain text or as rich (HTML) text, so the port stays
/// that small. Tests substitute a fake.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_plain(&self, chat_id: ChatId, text: &str) -> Result<()>;
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<()>;
}
