pub mod catalog;
pub mod decompose;
pub mod fees;
pub mod quote;
