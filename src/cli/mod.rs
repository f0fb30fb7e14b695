pub mod app;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod gen_user;
pub mod probe;
pub mod runtime;
