use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::email::application::ports::outgoing::email_sender::{EmailMessage, EmailSender};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};

const VERIFY_EMAIL_TEMPLATE: &str = include_str!("../../../../../templates/verify_email.html");
pub const VERIFY_EMAIL_SUBJECT: &str = "Verify your email";
pub const VERIFY_EMAIL_TEXT: &str = "Welcome";

#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    frontend_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, frontend_url: &str) -> Self {
        Self {
            sender,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn verification_link(&self, user_id: Uuid, token: &str) -> String {
        format!(
            "{}/?user-verification&userId={}&token={}",
            self.frontend_url, user_id, token
        )
    }

    fn render(link: &str) -> String {
        VERIFY_EMAIL_TEMPLATE.replace("{{link}}", link)
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        user_id: Uuid,
        email: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = self.verification_link(user_id, token);

        let message = EmailMessage {
            to: email.to_string(),
            subject: VERIFY_EMAIL_SUBJECT.to_string(),
            text: VERIFY_EMAIL_TEXT.to_string(),
            html: Self::render(&link),
        };

        self.sender
            .send_email(message)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))?;

        tracing::info!(user_id = %user_id, "Verification email sent");
        Ok(())
    }
}
