//! Comment notifiers backed by the organisation's mail-sending service.

use crate::expense::ports::{
    CommentNotification, CommentNotifier, NotifierError, NotifierResult,
};
use async_trait::async_trait;
use minijinja::{Environment, context};
use serde::Serialize;

const SENDMAIL_PATH: &str = "/api/sendmail";
const DEFAULT_SENDER: &str = "no-reply@datasektionen.se";

const COMMENT_TEMPLATE: &str = "\
<p>Hej {{ receiver_name }}!</p>
<p>{{ author_name }} har kommenterat ditt utlägg <em>{{ expense_description }}</em>:</p>
<blockquote>{{ content }}</blockquote>
<p>Utlägget har id {{ expense_id }}.</p>
";

#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    content: String,
    key: &'a str,
}

/// Sends comment notifications through `POST {base_url}/api/sendmail`.
#[derive(Debug, Clone)]
pub struct SpamCommentNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sender: String,
}

impl SpamCommentNotifier {
    /// Creates a notifier for the given mail service.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            sender: DEFAULT_SENDER.to_owned(),
        }
    }

    /// Overrides the sender address.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{SENDMAIL_PATH}", self.base_url)
    }
}

/// Renders the HTML body of a comment notification.
///
/// # Errors
///
/// Returns [`NotifierError::Template`] when rendering fails.
pub fn render_comment_email(notification: &CommentNotification) -> NotifierResult<String> {
    let mut environment = Environment::new();
    environment.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
    environment
        .render_str(
            COMMENT_TEMPLATE,
            context! {
                receiver_name => &notification.receiver_name,
                author_name => &notification.author_name,
                expense_description => &notification.expense_description,
                expense_id => &notification.expense_id,
                content => &notification.content,
            },
        )
        .map_err(|err| NotifierError::Template(err.to_string()))
}

#[async_trait]
impl CommentNotifier for SpamCommentNotifier {
    async fn notify(&self, notification: &CommentNotification) -> NotifierResult<()> {
        let request = SendMailRequest {
            from: &self.sender,
            to: &notification.to,
            subject: notification.subject(),
            content: render_comment_email(notification)?,
            key: &self.api_key,
        };
        self.client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(NotifierError::delivery)?;
        tracing::info!(to = %notification.to, "sent comment notification");
        Ok(())
    }
}

/// Notifier used when sending email is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCommentNotifier;

#[async_trait]
impl CommentNotifier for NoopCommentNotifier {
    async fn notify(&self, notification: &CommentNotification) -> NotifierResult<()> {
        tracing::debug!(to = %notification.to, "email disabled; skipping comment notification");
        Ok(())
    }
}

/// Notifier selected by configuration.
#[derive(Debug, Clone)]
pub enum MailNotifier {
    /// Deliver through the mail service.
    Spam(SpamCommentNotifier),
    /// Log and drop notifications.
    Disabled(NoopCommentNotifier),
}

#[async_trait]
impl CommentNotifier for MailNotifier {
    async fn notify(&self, notification: &CommentNotification) -> NotifierResult<()> {
        match self {
            Self::Spam(notifier) => notifier.notify(notification).await,
            Self::Disabled(notifier) => notifier.notify(notification).await,
        }
    }
}
