use crate::config::EmailConfig;
use crate::domain::model::Notice;
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

const SUBJECT_TITLE_CHARS: usize = 30;

fn subject(title: &str) -> String {
    let truncated: String = title.chars().take(SUBJECT_TITLE_CHARS).collect();
    format!("🚨 BIOMARKET HIT: {}...", truncated)
}

fn body(notice: &Notice) -> String {
    format!(
        "A high-value FDA notice was detected:\n\n\
         Title: {}\n\
         Date: {}\n\
         Link: {}\n\n\
         Check your prediction market odds immediately.",
        notice.title, notice.publication_date, notice.url
    )
}

/// Sends one plain-text alert per call over authenticated SMTP-TLS.
/// Fire-and-forget: failures are returned to the caller, never retried here.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let host = config.smtp_host.as_deref().unwrap_or(DEFAULT_SMTP_HOST);
        let credentials =
            Credentials::new(config.sender.clone(), config.app_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: config.sender.parse()?,
            recipient: config.recipient.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notice: &Notice) -> Result<()> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject(&notice.title))
            .header(ContentType::TEXT_PLAIN)
            .body(body(notice))?;

        self.transport.send(message).await?;
        tracing::debug!("Alert email dispatched for {}", notice.id);
        Ok(())
    }
}
