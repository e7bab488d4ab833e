pub mod send_handler;

pub use send_handler::send_handler;
