use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{info, warn};

use marquee_core::{
    config::Config,
    domain::ChatId,
    messaging::MessagingPort,
    router::{CommandRouter, InboundEvent, Outcome, ReplyFormat},
};

use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>, router: Arc<CommandRouter>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!("marquee started: @{}", me.username());
    }
    info!(
        "subscriber storage: {}",
        cfg.subscribers_file.display()
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState { router, messenger });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Decode a Telegram message into the core's event shape.
///
/// `text` stays `None` for media-only messages so the router can tell
/// "no text" apart from "unrecognized text".
fn decode_event(msg: &Message) -> InboundEvent {
    InboundEvent {
        chat_id: ChatId(msg.chat.id.0),
        text: msg.text().map(|t| t.to_string()),
        display_name: msg.from().map(|u| u.first_name.clone()),
    }
}

async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let event = decode_event(&msg);
    let chat_id = event.chat_id;

    match state.router.handle(&event) {
        Outcome::Ignored => {}
        Outcome::Reply(reply) => {
            let sent = match reply.format {
                ReplyFormat::Plain => state.messenger.send_plain(chat_id, &reply.text).await,
                ReplyFormat::Html => state.messenger.send_html(chat_id, &reply.text).await,
            };
            // Delivery failure never rolls back a store mutation; the user
            // just gets no reply for this turn.
            if let Err(e) = sent {
                warn!("failed to deliver reply to chat {}: {e}", chat_id.0);
            }
        }
    }

    Ok(())
}
