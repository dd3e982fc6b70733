use crate::email::application::ports::outgoing::email_sender::{
    EmailMessage, EmailSender, EmailSenderError,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every message instead of sending it.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent_emails: Arc<Mutex<Vec<EmailMessage>>>,
    fail: bool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with a transport error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get_sent_emails(&self) -> Vec<EmailMessage> {
        self.sent_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailSenderError> {
        if self.fail {
            return Err(EmailSenderError::TransportFailed(
                "SMTP connection failed".to_string(),
            ));
        }
        self.sent_emails.lock().unwrap().push(message);
        Ok(())
    }
}
