pub mod cli;
pub mod jwt;
pub mod key;
pub mod state;
