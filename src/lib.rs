pub mod availability;
pub mod core;
pub mod display;
pub mod gateway;
pub mod items;
pub mod provider;
pub mod utils;
