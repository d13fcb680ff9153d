pub mod autobahn;
pub mod error;
pub mod gemini;
mod http;
pub mod mailer;
pub mod model;
