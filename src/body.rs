//! Message-to-request transformation: maps an [`EmailMessage`] onto
//! Mailgun's form fields, filters out anything empty or unrecognized, and
//! encodes the result as `application/x-www-form-urlencoded`.

use serde_json::Value;
use url::form_urlencoded;

use crate::message::{EmailMessage, Mailbox};

/// Field names the Messages API understands natively. Anything else that is
/// not header- or variable-prefixed is silently dropped by [`filter`]
/// (sanitizing whitelist).
const CORE_FIELDS: [&str; 7] = ["from", "to", "cc", "bcc", "subject", "text", "html"];

/// A request field name, tagged by kind. Converted to the wire-format string
/// only at encoding time, so header/variable names can never collide with
/// core fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldName {
    Core(&'static str),
    Header(String),
    Variable(String),
}

impl FieldName {
    /// Wire-format key: headers carry the `h:` prefix, variables `v:`.
    pub fn wire(&self) -> String {
        match self {
            FieldName::Core(name) => (*name).to_string(),
            FieldName::Header(name) => format!("h:{}", name),
            FieldName::Variable(name) => format!("v:{}", name),
        }
    }

    fn is_recognized(&self) -> bool {
        match self {
            FieldName::Core(name) => CORE_FIELDS.contains(name),
            FieldName::Header(_) | FieldName::Variable(_) => true,
        }
    }
}

/// A field value. `Many` produces repeated keys in the encoded body,
/// preserving element order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

impl FieldValue {
    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty(),
            FieldValue::Many(values) => values.is_empty(),
        }
    }
}

/// Map a message onto Mailgun form fields, in stable order: recipient roles,
/// subject, bodies, `h:`-prefixed headers, `v:`-prefixed custom variables.
/// Empty values are kept here and removed by [`filter`].
pub fn transform(email: &EmailMessage) -> Vec<(FieldName, FieldValue)> {
    let mut fields = Vec::new();

    if let Some(from) = &email.from {
        fields.push((FieldName::Core("from"), FieldValue::Single(from.to_string())));
    }
    fields.push((FieldName::Core("to"), FieldValue::Many(format_mailboxes(&email.to))));
    fields.push((FieldName::Core("cc"), FieldValue::Many(format_mailboxes(&email.cc))));
    fields.push((FieldName::Core("bcc"), FieldValue::Many(format_mailboxes(&email.bcc))));

    fields.push((FieldName::Core("subject"), FieldValue::Single(email.subject.clone())));
    if let Some(text) = &email.text {
        fields.push((FieldName::Core("text"), FieldValue::Single(text.clone())));
    }
    if let Some(html) = &email.html {
        fields.push((FieldName::Core("html"), FieldValue::Single(html.clone())));
    }

    for (name, value) in &email.headers {
        fields.push((FieldName::Header(name.clone()), FieldValue::Single(value.clone())));
    }
    for (name, value) in &email.custom_vars {
        fields.push((FieldName::Variable(name.clone()), FieldValue::Single(render_value(value))));
    }

    fields
}

fn format_mailboxes(mailboxes: &[Mailbox]) -> Vec<String> {
    mailboxes.iter().map(ToString::to_string).collect()
}

/// JSON strings go on the wire unquoted; everything else in compact JSON
/// form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep a field iff its name is a recognized core field or carries a
/// header/variable prefix, and its value is non-empty. Input order is
/// preserved.
pub fn filter(fields: Vec<(FieldName, FieldValue)>) -> Vec<(FieldName, FieldValue)> {
    fields
        .into_iter()
        .filter(|(name, value)| name.is_recognized() && !value.is_empty())
        .collect()
}

/// Encode the surviving fields as a form-urlencoded payload, expanding
/// list values into repeated keys.
pub fn encode(fields: &[(FieldName, FieldValue)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        let key = name.wire();
        match value {
            FieldValue::Single(v) => {
                serializer.append_pair(&key, v);
            }
            FieldValue::Many(vs) => {
                for v in vs {
                    serializer.append_pair(&key, v);
                }
            }
        }
    }
    serializer.finish()
}
