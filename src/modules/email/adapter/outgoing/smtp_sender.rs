use crate::email::application::ports::outgoing::email_sender::{
    EmailMessage, EmailSender, EmailSenderError,
};
use crate::shared::config::{self, ConfigError};
use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpTransportConfig {
    /// Plain SMTP without auth (Mailpit, MailHog, etc.)
    Local { host: String, port: u16 },
    /// TLS relay with credentials
    Relay {
        server: String,
        username: String,
        password: String,
    },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from_email: String,
    pub transport: SmtpTransportConfig,
}

impl MailConfig {
    /// `RUST_ENV=test` selects the local transport.
    pub fn from_env(rust_env: &str) -> Result<Self, ConfigError> {
        let from_email = config::required("EMAIL_FROM")?;

        let transport = if rust_env == "test" {
            SmtpTransportConfig::Local {
                host: config::string_or("SMTP_HOST", "localhost"),
                port: config::parse_or("SMTP_PORT", 1025_u16)?,
            }
        } else {
            SmtpTransportConfig::Relay {
                server: config::required("SMTP_SERVER")?,
                username: config::required("SMTP_USERNAME")?,
                password: config::required("SMTP_PASSWORD")?,
            }
        };

        Ok(Self {
            from_email,
            transport,
        })
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    pub fn from_config(config: &MailConfig) -> Result<Self, EmailSenderError> {
        match &config.transport {
            SmtpTransportConfig::Local { host, port } => {
                Ok(Self::new_local(host, *port, &config.from_email))
            }
            SmtpTransportConfig::Relay {
                server,
                username,
                password,
            } => Self::new(server, username, password, &config.from_email),
        }
    }

    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
        from_email: &str,
    ) -> Result<Self, EmailSenderError> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| EmailSenderError::TransportFailed(e.to_string()))?
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport), from_email))
    }

    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_mailer(Box::new(transport), from_email)
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, EmailSenderError> {
        Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e| EmailSenderError::InvalidAddress(format!("from: {}", e)))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|e| EmailSenderError::InvalidAddress(format!("to: {}", e)))?)
            .subject(message.subject)
            .multipart(MultiPart::alternative_plain_html(message.text, message.html))
            .map_err(|e| EmailSenderError::BuildFailed(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailSenderError> {
        let email = self.build_message(message)?;

        self.mailer
            .send(email)
            .await
            .map_err(EmailSenderError::TransportFailed)
    }
}
