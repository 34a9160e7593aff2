pub mod matching;
pub mod roster;
