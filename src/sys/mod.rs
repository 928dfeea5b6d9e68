//! System Definitions (ABI).
//!
//! Contém os códigos de erro que o DevFS devolve à camada VFS.

pub mod error;

pub use error::{result_to_isize, Errno};
