//! Reply texts for the subscription commands.
//!
//! Plain text everywhere except the status reply, which uses the Telegram
//! HTML subset (`<b>` only).

/// Placeholder used when the sender has no usable display name.
pub const FALLBACK_NAME: &str = "there";

pub fn welcome(name: &str) -> String {
    format!(
        "🎬 Welcome, {name}!\n\n\
         You're now subscribed to cinema program updates.\n\n\
         You'll receive notifications when:\n\
         ✨ New films are added\n\
         🔄 Showtimes change\n\
         ❌ Films are removed\n\n\
         Commands:\n\
         /stop - Unsubscribe from notifications\n\
         /status - Check your subscription status"
    )
}

pub fn already_subscribed(name: &str) -> String {
    format!(
        "👋 Hi {name}!\n\n\
         You're already subscribed to notifications.\n\n\
         Use /status to check your subscription or /stop to unsubscribe."
    )
}

pub fn unsubscribed() -> String {
    "👋 You've been unsubscribed from program notifications.\n\n\
     You can subscribe again anytime with /start"
        .to_string()
}

pub fn not_subscribed() -> String {
    "You're not currently subscribed.\n\n\
     Use /start to subscribe to notifications."
        .to_string()
}

pub fn status_active(total_subscribers: usize) -> String {
    format!(
        "✅ <b>Subscription Active</b>\n\n\
         You're receiving cinema program updates.\n\
         Total subscribers: {total_subscribers}\n\n\
         Commands:\n\
         /stop - Unsubscribe"
    )
}

pub fn status_inactive() -> String {
    "❌ <b>Not Subscribed</b>\n\n\
     You're not receiving notifications.\n\n\
     Use /start to subscribe."
        .to_string()
}

pub fn unknown_command() -> String {
    "Unknown command. Available commands:\n\
     /start - Subscribe to notifications\n\
     /stop - Unsubscribe\n\
     /status - Check subscription status"
        .to_string()
}
