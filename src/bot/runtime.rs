//! Bot runtime - supervised polling loop.

use std::time::Duration;

use tracing::{info, warn};

use super::dispatcher::{AppState, ThrottledBot, build_dispatcher};
use crate::gates::FloodGate;

/// Pause before the event loop is restarted after a fault.
const RESTART_BACKOFF: Duration = Duration::from_secs(5);

/// Run the bot until a shutdown signal arrives.
///
/// If the dispatcher terminates on its own it is rebuilt and restarted
/// after a fixed back-off. At most the in-flight event is lost; the flood
/// windows live outside the dispatcher and survive the restart.
pub async fn run(bot: ThrottledBot, state: AppState, flood: FloodGate) {
    loop {
        let mut dispatcher = build_dispatcher(bot.clone(), state.clone(), flood.clone());

        tokio::select! {
            _ = dispatcher.dispatch() => {
                warn!("Event loop terminated, restarting in {:?}", RESTART_BACKOFF);
                tokio::time::sleep(RESTART_BACKOFF).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}
