pub mod check;
pub mod server;
pub mod submit;
