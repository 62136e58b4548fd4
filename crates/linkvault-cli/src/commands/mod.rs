pub mod config;
pub mod link;
pub mod platform;
pub mod status;
pub mod tag;
pub mod transfer;
