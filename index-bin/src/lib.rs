pub mod cli;
pub mod command;
pub mod logging;
pub mod session;
