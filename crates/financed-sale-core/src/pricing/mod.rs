pub mod aggregate;
pub mod decompose;
pub mod engine;
pub mod scenario;
