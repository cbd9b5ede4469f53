pub mod deps;
pub mod notify;

pub use deps::ServerDeps;
pub use notify::{LogSmsSender, Mailer, SmsSender, SmtpMailer};
