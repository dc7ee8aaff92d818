pub mod app;
pub mod average;
pub mod error;
pub mod linked_list;
pub mod utils;

pub use average::average;
pub use error::IndexError;
pub use linked_list::StringLinkedList;

#[cfg(test)]
mod tests;
