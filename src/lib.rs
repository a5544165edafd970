// Library exports for localfeed
// This allows integration tests and embedding apps to use localfeed modules

pub mod config;
pub mod db;
pub mod error;
pub mod kv;
pub mod records;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use session::AuthSession;
pub use store::{LikeChange, RecordStore};
