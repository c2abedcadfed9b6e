use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::Mailer;
use crate::error::IdentityError;

fn reset_code_body(code: &str) -> String {
    format!(
        "Hello,\n\n\
         You have requested to reset your password. Use this one-time code:\n\n\
         {code}\n\n\
         The code expires shortly. If you did not request a reset, you can\n\
         ignore this email.\n"
    )
}

/// SMTP adapter for the mailer port. Delivery failures surface as
/// `Notification`; the caller decides what that means for the reset flow.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        username: String,
        password: String,
        from: Mailbox,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username, password))
            .build();
        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), IdentityError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e: lettre::address::AddressError| IdentityError::Notification(e.into()))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject("Your password reset code")
            .body(reset_code_body(code))
            .map_err(|e| IdentityError::Notification(e.into()))?;
        self.transport
            .send(message)
            .await
            .map_err(|e| IdentityError::Notification(e.into()))?;
        Ok(())
    }
}
