pub mod inspector;
pub mod report;
