//! Outbound contact-notification mail over SMTP.
//!
//! Mail is optional: when no `[mail]` section is configured, sends are
//! skipped. A failed send never unwinds the request that triggered it —
//! callers log the failure and move on.

use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::header::ContentType,
  transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::debug;

use reel_core::message::ContactMessage;

use crate::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
  #[error("invalid mail address: {0}")]
  Address(#[from] lettre::address::AddressError),

  #[error("mail could not be built: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("smtp transport error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

pub struct Mailer {
  inner: Option<(AsyncSmtpTransport<Tokio1Executor>, MailConfig)>,
}

impl Mailer {
  /// Build the SMTP transport, or a no-op mailer when unconfigured.
  pub fn from_config(config: Option<MailConfig>) -> Result<Self, MailError> {
    let inner = match config {
      None => None,
      Some(config) => {
        let transport =
          AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
              config.smtp_username.clone(),
              config.smtp_password.clone(),
            ))
            .build();
        Some((transport, config))
      }
    };
    Ok(Self { inner })
  }

  /// Send the admin notification for a newly-submitted contact message.
  /// Reply-to is the sender, so the admin can answer directly.
  pub async fn notify_contact(
    &self,
    message: &ContactMessage,
  ) -> Result<(), MailError> {
    let Some((transport, config)) = &self.inner else {
      debug!("mail not configured; skipping contact notification");
      return Ok(());
    };

    let mail = Message::builder()
      .from(format!("Reel Contact <{}>", config.from_address).parse()?)
      .reply_to(message.email.parse()?)
      .to(config.to_address.parse()?)
      .subject(format!("New inquiry from {}", message.fullname))
      .header(ContentType::TEXT_PLAIN)
      .body(format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
        message.fullname, message.email, message.body
      ))?;

    transport.send(mail).await?;
    Ok(())
  }
}
