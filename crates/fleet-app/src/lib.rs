//! Application service layer - config, register session, photos, export, import

pub mod config;
pub mod export;
pub mod import;
pub mod photo;
pub mod repository;
pub mod session;

pub use config::Config;
pub use session::RegisterSession;
