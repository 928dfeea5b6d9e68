//! Forge DevFS Library.
//!
//! Camada de handles do Device Filesystem do kernel Forge.
//! Traduz `open/read/write/seek/close/dup/fstat` por caminho em operações
//! de dispositivo, mantendo a tabela global de handles abertos.
//!
//! O kernel fornece os drivers (via `DeviceRegistry`), o sink de log e o
//! controle de interrupções; este crate fornece o resto.

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (Vec/String/Arc da tabela de handles)
extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging
pub mod klib; // Utilitários (aritmética de blocos, framework de testes)
pub mod sync; // Spinlock + hook de IRQ
pub mod sys; // Errno

// --- Sistemas de Arquivos ---
pub mod fs;

// Re-exports do caminho principal
pub use crate::fs::devfs::{DevFs, DevFsError, DeviceId, DeviceRegistry, HandleIndex};
pub use crate::fs::vfs::{FileStat, FileSystem, OpenFlags, SeekWhence};
pub use crate::sys::Errno;
