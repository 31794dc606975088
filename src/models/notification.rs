/// Last message text that was actually delivered to the chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    last_sent: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    /// Exact text comparison; any difference counts as a change.
    pub fn is_new(&self, message: &str) -> bool {
        self.last_sent.as_deref() != Some(message)
    }

    pub fn record_sent(&mut self, message: String) {
        self.last_sent = Some(message);
    }
}
