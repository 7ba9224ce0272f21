pub mod page;
pub mod updater;
