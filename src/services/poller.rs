use crate::config::Config;
use crate::error::Result;
use crate::models::homework::parse_status;
use crate::models::notification::NotificationState;
use crate::models::poll_window::{PollWindow, WindowMode};
use crate::services::practicum_service::StatusSource;
use crate::services::telegram_service::Notifier;
use crate::utils::validation::{check_response, current_date};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A changed status was delivered.
    Sent,
    /// Status text equals the last delivered one.
    Unchanged,
    /// The API reported no homeworks in the window.
    NoUpdates,
    /// A changed status was found but the notifier failed.
    NotifyFailed,
}

/// Poll, validate, translate, notify. One cycle at a time, fixed pause in between.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    chat_id: String,
    retry_period: Duration,
    window: PollWindow,
    window_mode: WindowMode,
    state: NotificationState,
}

impl<S, N> Poller<S, N>
where
    S: StatusSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, config: &Config) -> Self {
        Self {
            source,
            notifier,
            chat_id: config.credentials.telegram_chat_id.clone(),
            retry_period: config.retry_period,
            window: config.poll_from,
            window_mode: config.window_mode,
            state: NotificationState::new(),
        }
    }

    /// Overrides the pause between cycles. Config only allows whole seconds.
    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = retry_period;
        self
    }

    pub fn window(&self) -> PollWindow {
        self.window
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.state.last_sent()
    }

    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let response = self.source.fetch_status(self.window).await?;

        let outcome = match check_response(&response)? {
            Some(homework) => {
                let message = parse_status(homework)?;
                self.maybe_notify(message).await
            }
            None => CycleOutcome::NoUpdates,
        };

        if outcome != CycleOutcome::NotifyFailed && self.window_mode == WindowMode::CurrentDate {
            if let Some(ts) = current_date(&response) {
                if self.window.advance_to(ts) {
                    debug!("Poll window advanced to {}", self.window);
                }
            }
        }

        Ok(outcome)
    }

    /// Sends `message` unless it equals the last delivered text.
    /// A failed send leaves the state untouched.
    pub async fn maybe_notify(&mut self, message: String) -> CycleOutcome {
        if !self.state.is_new(&message) {
            debug!("No new status");
            return CycleOutcome::Unchanged;
        }

        match self.notifier.send_message(&self.chat_id, &message).await {
            Ok(()) => {
                debug!("Message sent: {}", message);
                self.state.record_sent(message);
                CycleOutcome::Sent
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                CycleOutcome::NotifyFailed
            }
        }
    }

    /// Runs cycles until `shutdown` resolves. Cycle errors are logged and the
    /// loop goes on; only fatal errors end it early.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future,
    {
        tokio::pin!(shutdown);
        info!(
            "Bot started: polling from {} every {}s",
            crate::utils::time::to_rfc3339(self.window.from_date()),
            self.retry_period.as_secs()
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                result = self.run_once() => match result {
                    Ok(CycleOutcome::Sent) => info!("Message sent"),
                    Ok(outcome) => debug!("Cycle finished: {:?}", outcome),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => error!("Program failure: {}", e),
                },
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        info!("Shutdown requested, stopping");
        Ok(())
    }
}
