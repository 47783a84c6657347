// HTTP module entry
// Response building utilities shared by all handlers

pub mod response;

pub use response::*;
