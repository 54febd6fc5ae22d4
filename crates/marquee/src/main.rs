use std::sync::Arc;

use marquee_core::{
    config::Config,
    router::{AliasTable, CommandRouter},
    store::SubscriberStore,
};

#[tokio::main]
async fn main() -> Result<(), marquee_core::Error> {
    marquee_core::logging::init("marquee")?;

    let cfg = Arc::new(Config::load()?);

    let store = Arc::new(SubscriberStore::open(&cfg.subscribers_file));
    let router = Arc::new(CommandRouter::new(store, AliasTable::from_config(&cfg)));

    marquee_telegram::dispatch::run_polling(cfg, router)
        .await
        .map_err(|e| marquee_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
