pub mod errors;
pub mod grant;
