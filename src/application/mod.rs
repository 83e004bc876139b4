// Application layer - the handler between form submissions and the store.

pub mod error;
pub mod forms;
pub mod reporting;
pub mod service;

pub use error::*;
pub use forms::*;
pub use reporting::*;
pub use service::*;
