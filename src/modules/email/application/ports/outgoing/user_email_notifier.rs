use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    /// Sends the verification link for `token` to `email`.
    async fn send_verification_email(
        &self,
        user_id: Uuid,
        email: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}
