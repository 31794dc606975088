pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    poller::Poller, practicum_service::PracticumService, telegram_service::TelegramService,
};

pub type HomeworkPoller = Poller<PracticumService, TelegramService>;

/// Wires the production status client and Telegram notifier into a poller.
pub fn build_poller(config: &Config) -> Result<HomeworkPoller> {
    let source = PracticumService::new(config)?;
    let notifier = TelegramService::new(config)?;
    Ok(Poller::new(source, notifier, config))
}
