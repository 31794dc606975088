pub mod poller;
pub mod practicum_service;
pub mod telegram_service;
