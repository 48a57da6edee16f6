//! MongoDB backend built on the official driver.

mod connection;
mod error;
mod session;

pub use connection::MongoStore;
pub use session::MongoSession;
