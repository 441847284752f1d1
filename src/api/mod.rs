pub mod commands;
pub mod configs;
pub mod errors;
pub mod fairings;
pub mod guards;
pub mod interaction;
pub mod payload;
pub mod reply;
