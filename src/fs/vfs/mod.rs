//! Virtual File System - interface com os filesystems
//!
//! Este módulo define apenas o lado que o DevFS enxerga da VFS:
//! - `FileSystem`: o descritor de tipo de filesystem (tabela de operações)
//! - `FsTypeRegistry`: onde os tipos são instalados no boot
//!
//! Resolução de caminhos e pontos de montagem ficam na VFS do kernel.

pub mod file;
pub mod stat;

pub use file::{OpenFlags, SeekWhence};
pub use stat::{FileStat, Timespec, S_IFBLK, S_IFCHR, S_IFMT};

use crate::sync::Spinlock;
use crate::sys::Errno;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Resultado das operações da VFS
pub type FsResult<T> = Result<T, Errno>;

/// Descritor de tipo de filesystem.
///
/// Handles são índices inteiros próprios de cada filesystem; a VFS apenas
/// os repassa.
pub trait FileSystem: Send + Sync {
    /// Nome do tipo (ex: "devfs")
    fn fs_type(&self) -> &str;

    /// Monta o filesystem
    fn mount(&self) -> FsResult<()>;

    /// Abre um caminho relativo ao ponto de montagem
    fn open(&self, path: &str, flags: OpenFlags, mode: u32) -> FsResult<i32>;

    /// Fecha um handle
    fn close(&self, handle: i32) -> FsResult<()>;

    /// Lê na posição atual do handle
    fn read(&self, handle: i32, buf: &mut [u8]) -> FsResult<usize>;

    /// Escreve na posição atual do handle
    fn write(&self, handle: i32, buf: &[u8]) -> FsResult<usize>;

    /// Reposiciona o cursor. `whence` é o valor bruto da syscall.
    fn seek(&self, handle: i32, offset: i64, whence: u32) -> FsResult<u64>;

    /// Duplica um handle
    fn dup(&self, handle: i32) -> FsResult<i32>;

    /// Metadados do handle
    fn fstat(&self, handle: i32) -> FsResult<FileStat>;
}

/// Registro de tipos de filesystem instalados.
pub struct FsTypeRegistry {
    types: Spinlock<Vec<Arc<dyn FileSystem>>>,
}

impl FsTypeRegistry {
    pub const fn new() -> Self {
        Self {
            types: Spinlock::new(Vec::new()),
        }
    }

    /// Instala um tipo. Falha com `EEXIST` se o nome já estiver registrado.
    pub fn install(&self, fs: Arc<dyn FileSystem>) -> FsResult<()> {
        let mut types = self.types.lock();
        if types.iter().any(|t| t.fs_type() == fs.fs_type()) {
            crate::kwarn!("(VFS) Tipo de filesystem já instalado");
            return Err(Errno::EEXIST);
        }
        types.push(fs);
        crate::kinfo!("(VFS) Tipos instalados=", types.len());
        Ok(())
    }

    /// Busca um tipo pelo nome
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn FileSystem>> {
        self.types
            .lock()
            .iter()
            .find(|t| t.fs_type() == name)
            .cloned()
    }

    /// Nomes dos tipos instalados (para debug)
    pub fn types(&self) -> Vec<String> {
        self.types
            .lock()
            .iter()
            .map(|t| String::from(t.fs_type()))
            .collect()
    }
}

impl Default for FsTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registro global usado pelo kernel
static FS_TYPES: FsTypeRegistry = FsTypeRegistry::new();

/// Registro global de tipos
pub(crate) fn global_types() -> &'static FsTypeRegistry {
    &FS_TYPES
}

/// Instala um tipo de filesystem no registro global
pub fn install_fs(fs: Arc<dyn FileSystem>) -> FsResult<()> {
    FS_TYPES.install(fs)
}

/// Busca um tipo de filesystem no registro global
pub fn lookup_fs(name: &str) -> Option<Arc<dyn FileSystem>> {
    FS_TYPES.lookup(name)
}
