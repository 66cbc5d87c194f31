//! Interactive REPL for the rental agent

mod session;

pub use session::ReplSession;
