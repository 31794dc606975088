use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Delivers a text message to a chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramService {
    client: Client,
    api_url: Url,
    bot_token: String,
}

impl TelegramService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            api_url: config.telegram_api_url.clone(),
            bot_token: config.credentials.telegram_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            self.bot_token,
            method
        )
    }
}

#[async_trait]
impl Notifier for TelegramService {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            // The request URL embeds the bot token.
            .map_err(|e| Error::Transport(e.without_url()))?;

        let status = response.status();
        let reply = response.json::<BotApiReply>().await.ok();
        match reply {
            Some(BotApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiReply { description, .. }) => Err(Error::Notify(
                description.unwrap_or_else(|| format!("Bot API responded with {}", status)),
            )),
            None => Err(Error::Notify(format!(
                "Bot API responded with {} and an unreadable body",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn service_for(api_url: &str, bot_token: &str) -> TelegramService {
        let vars: HashMap<&str, &str> = [
            ("PRACTICUM_TOKEN", "p"),
            ("TELEGRAM_TOKEN", bot_token),
            ("TELEGRAM_CHAT_ID", "42"),
            ("TELEGRAM_API_URL", api_url),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        TelegramService::new(&config).unwrap()
    }

    #[test]
    fn method_url_tolerates_trailing_slash() {
        let service = service_for("http://127.0.0.1:8081/", "123:abc");
        assert_eq!(
            service.method_url("sendMessage"),
            "http://127.0.0.1:8081/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_the_bot_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let service = service_for(&api_url, "123:SECRET_BOT_TOKEN");
        let err = service.send_message("42", "hello").await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        let logged = format!("Failed to send message: {}", err);
        assert!(!logged.contains("SECRET_BOT_TOKEN"), "{}", logged);
        assert!(!format!("{:?}", err).contains("SECRET_BOT_TOKEN"));
    }
}
