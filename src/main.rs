//! RelayBot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::error_handlers::LoggingErrorHandler;
use tracing::{info, warn, error};

use RelayBot::{
    config::Settings,
    utils::logging,
    state::SessionStore,
    handlers::{ConversationDispatcher, create_strategy, messages::handle_message},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Credentials usually live in .env
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", RelayBot::info());

    // Session state lives as long as the process
    let sessions = Arc::new(SessionStore::new());
    let strategy = create_strategy(&settings)?;
    info!(mode = %strategy.mode(), "Reply strategy selected");

    let conversation_dispatcher = Arc::new(ConversationDispatcher::new(sessions, strategy));

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    let me = bot.get_me().await?;
    info!(username = ?me.username, "Authenticated with Telegram");

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![conversation_dispatcher])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("Error handling update"))
        .enable_ctrlc_handler()
        .build();

    info!("Client is ready!");

    dispatcher.dispatch().await;

    info!("RelayBot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_messages))
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    dispatcher: Arc<ConversationDispatcher>,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, dispatcher).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
