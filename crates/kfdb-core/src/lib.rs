pub mod assist;
pub mod category;
pub mod error;
pub mod export;
pub mod session;

// Re-export common error type
pub use category::Category;
pub use error::KfdbError;
