pub mod api;
pub mod config;
pub mod cry;
pub mod detail;
pub mod error;
pub mod evolution;
pub mod list;
pub mod lookup;
pub mod pokemon;
pub mod summary;

pub use api::*;
pub use config::*;
pub use error::*;
pub use pokemon::*;
pub use summary::*;
