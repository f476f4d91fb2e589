pub mod server;
pub mod signal;
pub mod stun;
