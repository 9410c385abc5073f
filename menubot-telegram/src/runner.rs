//! Long-polling runner: connects, converts teloxide updates to core events and hands each one to the
//! HandlerChain on its own task. Reconnects with a fresh bot handle unless the session was logged out.

use anyhow::Result;
use handler_chain::HandlerChain;
use menubot_core::{
    log_connection_event, Bot as CoreBot, ConnectionEvent, DisconnectReason, MessageEvent,
};
use std::sync::Arc;
use teloxide::{
    prelude::*,
    requests::Request,
    types::{AllowedUpdate, CallbackQueryId, UpdateKind, UserId},
    ApiError, RequestError,
};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

use crate::adapters::update_to_event;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::TelegramConfig;

/// Seconds Telegram holds a getUpdates request open when there is nothing to deliver.
pub const POLL_TIMEOUT_SECS: u32 = 30;

/// Maps a failed Bot API request to the reason the session dropped.
pub fn disconnect_reason(error: &RequestError) -> DisconnectReason {
    match error {
        RequestError::Api(ApiError::InvalidToken) => DisconnectReason::LoggedOut,
        RequestError::Api(ApiError::TerminatedByOtherGetUpdates) => DisconnectReason::Replaced,
        RequestError::Network(_) | RequestError::Io(_) => {
            DisconnectReason::Network(error.to_string())
        }
        _ => DisconnectReason::Api(error.to_string()),
    }
}

/// Runs the chain for `event` on a tracked task; the send goes through `bot`, the handle current when the event arrived.
pub fn spawn_event(
    tracker: &TaskTracker,
    chain: &HandlerChain,
    bot: Arc<dyn CoreBot>,
    event: MessageEvent,
) {
    let chain = chain.clone();
    tracker.spawn(async move {
        debug!(
            sender_id = %event.sender.id,
            event_id = %event.id,
            "step: processing event (handler chain started)"
        );
        chain.process(bot.as_ref(), &event).await;
    });
}

/// Answers a callback query on a tracked task so a slow answer never delays the next getUpdates.
/// The answer only dismisses the client's loading spinner; failure is logged.
pub fn spawn_callback_answer(tracker: &TaskTracker, bot: teloxide::Bot, query_id: CallbackQueryId) {
    tracker.spawn(async move {
        if let Err(e) = bot.answer_callback_query(query_id).await {
            warn!(error = %e, "Failed to answer callback query");
        }
    });
}

/// Polls one connection until it fails or `shutdown` fires. Returns `None` on shutdown.
async fn poll_session(
    bot: &teloxide::Bot,
    bot_id: UserId,
    chain: &HandlerChain,
    tracker: &TaskTracker,
    shutdown: &CancellationToken,
) -> Option<DisconnectReason> {
    let adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let mut offset: i32 = 0;

    loop {
        let request = bot
            .get_updates()
            .offset(offset)
            .timeout(POLL_TIMEOUT_SECS)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .send();

        let updates = tokio::select! {
            _ = shutdown.cancelled() => return None,
            result = request => match result {
                Ok(updates) => updates,
                Err(e) => return Some(disconnect_reason(&e)),
            },
        };

        debug!(count = updates.len(), "got telegram updates");
        for update in updates {
            offset = update.id.as_offset();

            if let UpdateKind::CallbackQuery(ref query) = update.kind {
                spawn_callback_answer(tracker, bot.clone(), query.id.clone());
            }

            match update_to_event(&update, Some(bot_id)) {
                Some(event) => spawn_event(tracker, chain, adapter.clone(), event),
                None => debug!("ignoring unsupported update kind"),
            }
        }
    }
}

/// Connects, polls and reconnects until `shutdown` is cancelled or the session is logged out.
/// On return no new events are accepted and every in-flight handler task has finished.
#[instrument(skip(config, chain, shutdown))]
pub async fn run_polling(
    config: TelegramConfig,
    chain: HandlerChain,
    shutdown: CancellationToken,
) -> Result<()> {
    let tracker = TaskTracker::new();
    let result = connect_loop(&config, &chain, &tracker, &shutdown).await;

    tracker.close();
    info!(in_flight = tracker.len(), "Waiting for in-flight events");
    tracker.wait().await;
    info!("Runner stopped");

    result
}

async fn connect_loop(
    config: &TelegramConfig,
    chain: &HandlerChain,
    tracker: &TaskTracker,
    shutdown: &CancellationToken,
) -> Result<()> {
    let mut attempt: u32 = 0;

    while !shutdown.is_cancelled() {
        attempt += 1;
        log_connection_event(&ConnectionEvent::Connecting { attempt });

        // Fresh handle per attempt; the previous one is dropped, never patched.
        let bot = config.build_bot()?;

        let reason = match bot.get_me().await {
            Ok(me) => {
                if let Err(e) = bot.delete_webhook().await {
                    warn!(error = %e, "Failed to clear webhook");
                }
                log_connection_event(&ConnectionEvent::Connected {
                    username: me.user.username.clone(),
                });
                attempt = 0;
                match poll_session(&bot, me.user.id, chain, tracker, shutdown).await {
                    Some(reason) => reason,
                    None => break,
                }
            }
            Err(e) => disconnect_reason(&e),
        };

        log_connection_event(&ConnectionEvent::Disconnected {
            reason: reason.clone(),
        });
        if !reason.should_reconnect() {
            anyhow::bail!("Session ended: {}", reason);
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(config.reconnect_delay()) => {}
        }
    }

    Ok(())
}
