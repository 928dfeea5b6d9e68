//! Testes do módulo Filesystem
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Todos os testes de filesystem
//! cargo test --lib fs::tests
//!
//! # Apenas um módulo
//! cargo test --lib fs::tests::devfs
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `devfs.rs` - Operações de handle e data path
//! - `vfs.rs` - Registro de tipos e instalação do DevFS
//! - `concurrency.rs` - Várias threads sobre a mesma tabela
//!
//! # Convenções
//!
//! - Prefixo `test_` para todos os testes
//! - Cada teste monta seu próprio `DevFs`; apenas `vfs.rs` toca a
//!   instância global

#![cfg(test)]

pub mod vfs;

use crate::fs::devfs::testdev::MemRegistry;
use crate::fs::devfs::{DevFs, DevFsConfig};
use alloc::sync::Arc;

/// Passo pequeno para exercitar o crescimento da tabela
pub const TEST_STEP: usize = 4;

/// Helper: Cria um DevFs sobre `registry` com passo `TEST_STEP`
pub fn create_test_devfs(registry: &Arc<MemRegistry>) -> DevFs {
    let config = DevFsConfig::new().with_handles_step(TEST_STEP);
    DevFs::with_config(registry.clone(), config).expect("config de teste válida")
}

/// Helper: Registro com um disco de 4096 bytes e um tty
pub fn create_test_registry() -> Arc<MemRegistry> {
    let registry = MemRegistry::new();
    registry.add_block("/dev/disk0", 4096);
    registry.add_stream("/dev/tty0");
    Arc::new(registry)
}
