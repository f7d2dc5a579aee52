pub mod normalize;
pub mod recitation;
pub mod verses;
