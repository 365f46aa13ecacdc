pub mod dictionary;
pub mod index_manager;
pub mod terms;
pub mod triple;
