//! Sistemas de arquivos.
//!
//! Submódulos:
//! - `vfs`: Interface com a VFS do kernel (tipos, trait, registro).
//! - `devfs`: Dispositivos (/dev).

pub mod devfs;
pub mod vfs;

mod tests;
