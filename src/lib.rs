pub mod cli;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod render;
pub mod storage;
