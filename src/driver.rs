//! Process-level wiring
//!
//! Startup order: presence listener and gateway, one bootstrap refresh of
//! every poller, then the poll loop next to the HTTP server until shutdown.
//! Shutdown cancels one token that every long-running task watches.

use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::http::{AppState, server};
use crate::poller::steam::SteamPoller;
use crate::poller::updown::UpdownPoller;
use crate::poller::valorant::ValorantPoller;
use crate::poller::{Poller, refresh_all};
use crate::presence::{EVENT_BUFFER_SIZE, Gateway, PresenceListener};
use crate::registry::{Writers, registry};
use crate::workstation::WorkstationHandler;

const GATEWAY_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Binds the configured address and runs until SIGINT/SIGTERM
pub async fn start(config: Config) -> crate::Result<()> {
    let listener = TcpListener::bind(&config.http.listen_addr).await?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    run(config, listener, shutdown).await
}

/// Runs every component until `shutdown` is cancelled
pub async fn run(
    config: Config,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> crate::Result<()> {
    let (writers, readers) = registry();
    let Writers {
        steam,
        cloud,
        valorant,
        discord,
        workstation,
    } = writers;

    // presence first, so events flow while the pollers bootstrap
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER_SIZE);
    let presence_task =
        tokio::spawn(PresenceListener::new(config.discord.user_id.clone(), discord).run(events_rx));
    let gateway_task = Gateway::new(config.discord.token.clone(), config.discord.gateway_url.clone())
        .spawn(events_tx, shutdown.clone());

    let request_timeout = Duration::from_secs(config.poller.timeout_secs);
    let pollers: Vec<Box<dyn Poller>> = vec![
        Box::new(SteamPoller::new(config.steam.url.clone(), request_timeout, steam)),
        Box::new(UpdownPoller::new(config.updown.url.clone(), request_timeout, cloud)),
        Box::new(ValorantPoller::new(
            config.valorant.mmr_url.clone(),
            config.valorant.key.clone(),
            config.valorant.region.clone(),
            request_timeout,
            valorant,
        )),
    ];

    tracing::info!("Initializing");
    refresh_all(&pollers).await;
    tracing::info!("Initialized");

    let period = Duration::from_secs(config.poller.interval_secs.max(1));
    let poll_task = tokio::spawn(poll_loop(pollers, period, shutdown.clone()));

    let state = AppState::new(
        readers,
        WorkstationHandler::new(config.workstation.key.clone(), workstation),
    );
    let served = server::serve(listener, state, shutdown.clone()).await;

    // the server also returns on a listener error; stop everything else too
    shutdown.cancel();
    join_task("poll loop", poll_task).await;

    let gateway_abort = gateway_task.abort_handle();
    if timeout(GATEWAY_CLOSE_TIMEOUT, gateway_task).await.is_err() {
        tracing::warn!("Gateway did not close in time, aborting");
        gateway_abort.abort();
    }
    join_task("presence listener", presence_task).await;

    served
}

/// Waits for a task, logging a panic or cancellation; true on a clean exit
async fn join_task(name: &str, task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{} ended abnormally: {}", name, e);
            false
        }
    }
}

/// Refreshes every poller once per `period`, skipping the immediate tick
/// since bootstrap has just run
pub async fn poll_loop(pollers: Vec<Box<dyn Poller>>, period: Duration, shutdown: CancellationToken) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                tracing::debug!("Updating");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = refresh_all(&pollers) => {}
                }
            }
        }
    }
    tracing::info!("Poll loop stopped");
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!("Cannot listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
