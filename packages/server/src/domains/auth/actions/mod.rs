pub mod login;
pub mod refresh;
pub mod register;
pub mod send_otp;
pub mod verify_otp;

pub use login::{login, logout};
pub use refresh::refresh_token;
pub use register::register;
pub use send_otp::{resend_otp, send_email_otp, send_mobile_otp};
pub use verify_otp::verify_otp;
