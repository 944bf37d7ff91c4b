//! Инфраструктурный слой вокруг ядра матча:
//! - кодек снапшотов и восстановление после падения;
//! - абстракция хранения (in-memory / файл).

pub mod file_storage;
pub mod persistence;

pub use file_storage::FileMatchStorage;
pub use persistence::*;
