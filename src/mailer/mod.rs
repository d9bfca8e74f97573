pub mod mock;
pub mod noop;
pub mod template;
pub mod variant;

pub use mock::MockMailer;
pub use noop::NoopMailer;
pub use template::TemplateMailer;
pub use variant::MailerVariant;
