pub mod backend;
pub mod gateway;
pub mod report;
