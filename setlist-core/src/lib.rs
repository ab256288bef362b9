pub mod adapter;
pub mod catalog;
pub mod errors;
pub mod logging;
pub mod session;
pub mod store;

pub use errors::SessionError;
