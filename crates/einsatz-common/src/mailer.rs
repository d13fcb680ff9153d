use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

use crate::error::CommonError;

/// Outbound mail settings, passed in from the session configuration.
#[derive(Clone, Debug)]
pub struct MailerConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub sender_email: String,
    pub receiver_email: String,
}

/// Delivers plain-text mail over an authenticated STARTTLS session.
///
/// `send` returns a bool and never propagates: a failed delivery is an
/// operational event to report, not a reason to abort the session.
pub struct EmailSender {
    config: MailerConfig,
    password: String,
}

impl EmailSender {
    /// Reads the credential from `SMTP_PASSWORD`. Construction fails hard
    /// when the variable is missing.
    pub fn new(config: MailerConfig) -> Result<Self, CommonError> {
        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| CommonError::MissingCredential("SMTP_PASSWORD"))?;
        Ok(Self { config, password })
    }

    /// Connect, upgrade to TLS, authenticate, transmit one UTF-8 plain-text
    /// message. Every failure category is logged and converted to `false`.
    pub fn send(&self, subject: &str, body: &str) -> bool {
        match self.try_send(subject, body) {
            Ok(()) => {
                info!(subject, to = %self.config.receiver_email, "email sent");
                true
            }
            Err(e) => {
                warn!(subject, error = %e, "email delivery failed");
                false
            }
        }
    }

    fn try_send(&self, subject: &str, body: &str) -> Result<(), CommonError> {
        let message = Message::builder()
            .from(self.config.sender_email.parse()?)
            .to(self.config.receiver_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let transport = SmtpTransport::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.password.clone(),
            ))
            .build();

        transport.send(&message)?;
        Ok(())
    }
}
