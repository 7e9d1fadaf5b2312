pub mod commands;
pub mod http;
pub mod registry;
pub mod report;
pub mod runtime;
