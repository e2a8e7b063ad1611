pub mod fees;
pub mod normalize;
