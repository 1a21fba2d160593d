//! Mailgun delivery adapter: turns a structured email message into the form
//! body the Mailgun Messages API expects and performs one synchronous
//! delivery call per message.
//!
//! ```rust,ignore
//! use mailgun_adapter::{deliver, Config, ConfigValue, EmailMessage};
//!
//! let email = EmailMessage::builder()
//!     .from(("Support", "support@d.com"))
//!     .to("user@example.com")
//!     .subject("Welcome")
//!     .text("Thanks for signing up.")
//!     .header("Reply-To", "help@d.com")
//!     .custom_var("user_id", "42")
//!     .build();
//!
//! let config = Config::new(ConfigValue::env("MAILGUN_API_KEY"), "d.com");
//! let response = deliver(&email, &config)?;
//! ```
//!
//! Stateless: each call resolves configuration (literals or environment
//! indirections), builds the request, and classifies the outcome. No queues,
//! no retries, no shared state between calls.

mod body;
mod config;
mod deliver;
mod message;


pub use config::{Config, ConfigError, ConfigValue, ResolvedConfig, DEFAULT_BASE_URL};
pub use deliver::{deliver, DeliveryError, DeliveryResponse};
pub use message::{EmailMessage, EmailMessageBuilder, Mailbox};
