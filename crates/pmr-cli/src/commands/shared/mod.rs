pub mod parse;
pub mod views;
