//! Port for outbound mail dispatch.

use crate::domain::notifications::MailMessage;

/// Fire-and-forget dispatch of templated mail.
///
/// `deliver` hands the message off and returns immediately: implementations
/// must detach the actual send so that delivery failures can never reach the
/// caller. Both delivery outcomes are observed (logged) by the adapter and
/// nothing else.
#[cfg_attr(test, mockall::automock)]
pub trait Mailer: Send + Sync {
    /// Queue a message for delivery.
    fn deliver(&self, message: MailMessage);
}

/// Fixture implementation that drops every message.
///
/// Use it in tests where mail traffic is not under observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

impl Mailer for FixtureMailer {
    fn deliver(&self, _message: MailMessage) {}
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_mailer_accepts_messages() {
        let mailer = FixtureMailer;
        mailer.deliver(MailMessage {
            template_id: Some("tpl-signup".to_owned()),
            recipient: "ada@example.com".to_owned(),
            data: json!({}),
        });
    }
}
