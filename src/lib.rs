pub mod checkout;
pub mod config;
pub mod net;
pub mod options;
