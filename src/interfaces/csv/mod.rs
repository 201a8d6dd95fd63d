pub mod events;
pub mod reader;
pub mod writer;
