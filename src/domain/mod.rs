pub mod chat;
pub mod engagement;
pub mod entity;
pub mod metrics;
pub mod moderation;
pub mod post;
pub mod session;
pub mod user;
