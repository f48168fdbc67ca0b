pub mod audit;
pub mod security;
pub mod time;
pub mod upstream;
