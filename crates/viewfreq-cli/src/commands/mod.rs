pub mod animate;
pub mod arrows;
pub mod modes;
pub mod parse;
