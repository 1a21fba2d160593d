use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub name: Option<String>,
    pub address: String,
}

impl Mailbox {
    pub fn new(address: impl Into<String>) -> Self {
        Self { name: None, address: address.into() }
    }

    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: Some(name.into()), address: address.into() }
    }
}

/// Formats as `name <address>` when a display name is set, otherwise the
/// bare address.
impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl From<&str> for Mailbox {
    fn from(address: &str) -> Self {
        Mailbox::new(address)
    }
}

impl From<String> for Mailbox {
    fn from(address: String) -> Self {
        Mailbox::new(address)
    }
}

impl<N: Into<String>, A: Into<String>> From<(N, A)> for Mailbox {
    fn from((name, address): (N, A)) -> Self {
        Mailbox::with_name(name, address)
    }
}

/// A message to deliver. Read-only input to the transformation; field order
/// (recipient lists, headers, custom variables) is preserved through to the
/// encoded request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(default)]
    pub from: Option<Mailbox>,
    #[serde(default)]
    pub to: Vec<Mailbox>,
    #[serde(default)]
    pub cc: Vec<Mailbox>,
    #[serde(default)]
    pub bcc: Vec<Mailbox>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    /// Custom MIME headers, passed through under Mailgun's `h:` convention.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Custom variables, passed through under Mailgun's `v:` convention.
    /// Non-string values are sent in compact JSON form.
    #[serde(default)]
    pub custom_vars: Vec<(String, Value)>,
}

impl EmailMessage {
    pub fn builder() -> EmailMessageBuilder {
        EmailMessageBuilder::default()
    }
}

/// Fluent builder for [`EmailMessage`].
///
/// The builder is infallible: missing or empty fields are simply absent from
/// the request body (the field filter guarantees only populated fields are
/// sent).
#[derive(Debug, Default)]
pub struct EmailMessageBuilder {
    message: EmailMessage,
}

impl EmailMessageBuilder {
    /// Set the sender.
    pub fn from(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.from = Some(mailbox.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.to.push(mailbox.into());
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.cc.push(mailbox.into());
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.bcc.push(mailbox.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.message.subject = subject.into();
        self
    }

    /// Set the plain text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.message.text = Some(text.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.message.html = Some(html.into());
        self
    }

    /// Add a custom MIME header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message.headers.push((name.into(), value.into()));
        self
    }

    /// Add a custom variable.
    pub fn custom_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message.custom_vars.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> EmailMessage {
        self.message
    }
}
