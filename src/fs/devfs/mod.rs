//! DevFS - Device Filesystem
//!
//! Sistema de arquivos para dispositivos (/dev).
//!
//! # Arquitetura
//!
//! - O registro de dispositivos do kernel (`DeviceRegistry`) resolve
//!   caminhos e faz o I/O de bytes. O DevFS não tem drivers.
//! - O DevFS mantém a tabela global de handles abertos (`HandleTable`)
//!   atrás de um único `Spinlock`. Toda operação adquire o lock na entrada
//!   e o guard o libera em qualquer caminho de saída.
//! - Devices com tamanho 0 são streams: sem seek, cursor fixo em 0.
//!   Os demais são blocos endereçáveis em `[0, size]`.
//!
//! # Módulos
//!
//! - `config` - Constantes e `DevFsConfig`
//! - `device` - `DeviceId` e a trait `DeviceRegistry`
//! - `error` - `DevFsError`
//! - `handle` - Registro de handle e a tabela

pub mod config;
pub mod device;
pub mod error;
pub mod handle;

#[cfg(feature = "self_test")]
pub mod selftest;
#[cfg(any(test, feature = "self_test"))]
pub mod testdev;

pub use config::DevFsConfig;
pub use device::{DeviceId, DeviceIoError, DeviceRegistry};
pub use error::{DevFsError, DevFsResult};
pub use handle::{DevHandle, HandleIndex, HandleTable};

use crate::fs::vfs::{self, FileStat, FileSystem, FsResult, FsTypeRegistry, OpenFlags, SeekWhence};
use crate::sync::Spinlock;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Once;

/// Flags que mudariam identidade ou conteúdo do device
const REJECTED_FLAGS: OpenFlags = OpenFlags::TRUNC
    .union(OpenFlags::APPEND)
    .union(OpenFlags::CREATE);

/// DevFS - Device Filesystem
pub struct DevFs {
    registry: Arc<dyn DeviceRegistry>,
    handles: Spinlock<HandleTable>,
    config: DevFsConfig,
}

impl DevFs {
    /// Cria uma instância com a configuração padrão
    pub fn new(registry: Arc<dyn DeviceRegistry>) -> DevFsResult<Self> {
        Self::with_config(registry, DevFsConfig::new())
    }

    /// Cria uma instância com configuração explícita
    pub fn with_config(registry: Arc<dyn DeviceRegistry>, config: DevFsConfig) -> DevFsResult<Self> {
        config.validate()?;
        let table = HandleTable::new(config.handles_step, config.max_handles)?;
        Ok(Self {
            registry,
            handles: Spinlock::new(table),
            config,
        })
    }

    /// Mount não tem estado: sempre sucesso
    pub fn mount(&self) -> DevFsResult<()> {
        Ok(())
    }

    /// Abre um device por caminho e devolve o índice do novo handle.
    pub fn open(&self, path: &str, flags: OpenFlags, mode: u32) -> DevFsResult<HandleIndex> {
        let mut handles = self.handles.lock();

        if path.len() >= self.config.path_max {
            crate::kwarn!("(DevFS) open: caminho longo demais, len=", path.len());
            return Err(DevFsError::PathTooLong);
        }

        let device = match self.registry.resolve(path) {
            Some(device) => device,
            None => {
                crate::ktrace!("(DevFS) open: device não encontrado");
                return Err(DevFsError::NoSuchDevice);
            }
        };

        if flags.intersects(REJECTED_FLAGS) {
            crate::ktrace!("(DevFS) open: flags não suportadas=", flags.bits());
            return Err(DevFsError::UnsupportedFlags);
        }

        let size = self.registry.size(device);
        let handle = DevHandle::new(path, flags, mode, device, size);
        let index = handles.allocate(handle)?;

        crate::ktrace!("(DevFS) open: handle=", index);
        Ok(index)
    }

    /// Fecha um handle
    pub fn close(&self, index: HandleIndex) -> DevFsResult<()> {
        let mut handles = self.handles.lock();
        handles
            .release(index)
            .map_err(rejected("(DevFS) close: handle inválido=", index))?;
        crate::ktrace!("(DevFS) close: handle=", index);
        Ok(())
    }

    /// Lê na posição atual e avança o cursor.
    pub fn read(&self, index: HandleIndex, buf: &mut [u8]) -> DevFsResult<usize> {
        let mut handles = self.handles.lock();
        let handle = handles
            .get_mut(index)
            .map_err(rejected("(DevFS) read: handle inválido=", index))?;

        let (offset, len) = handle.transfer_window(buf.len());
        if len == 0 && !handle.is_stream {
            return Ok(0);
        }

        let transferred = self
            .registry
            .read(handle.device, &mut buf[..len], offset)
            .map_err(|_| {
                crate::kwarn!("(DevFS) read: falha no device=", handle.device.as_u64());
                DevFsError::DeviceIo
            })?
            .min(len);

        handle.advance(transferred);
        Ok(transferred)
    }

    /// Escreve na posição atual e avança o cursor.
    pub fn write(&self, index: HandleIndex, buf: &[u8]) -> DevFsResult<usize> {
        let mut handles = self.handles.lock();
        let handle = handles
            .get_mut(index)
            .map_err(rejected("(DevFS) write: handle inválido=", index))?;

        let (offset, len) = handle.transfer_window(buf.len());
        if len == 0 && !handle.is_stream {
            return Ok(0);
        }

        let transferred = self
            .registry
            .write(handle.device, &buf[..len], offset)
            .map_err(|_| {
                crate::kwarn!("(DevFS) write: falha no device=", handle.device.as_u64());
                DevFsError::DeviceIo
            })?
            .min(len);

        handle.advance(transferred);
        Ok(transferred)
    }

    /// Reposiciona o cursor e devolve a nova posição absoluta.
    pub fn seek(&self, index: HandleIndex, offset: i64, whence: SeekWhence) -> DevFsResult<u64> {
        let mut handles = self.handles.lock();
        let handle = handles
            .get_mut(index)
            .map_err(rejected("(DevFS) seek: handle inválido=", index))?;

        let target = handle.seek_target(offset, whence)?;
        handle.cursor = target;

        crate::ktrace!("(DevFS) seek: cursor=", target);
        Ok(target)
    }

    /// `seek` com o whence bruto da syscall
    pub fn lseek(&self, index: HandleIndex, offset: i64, whence: u32) -> DevFsResult<u64> {
        match SeekWhence::from_u32(whence) {
            Some(whence) => self.seek(index, offset, whence),
            None => {
                // Valida o handle mesmo assim: bad handle tem precedência
                self.handles
                    .lock()
                    .validate(index)
                    .map_err(rejected("(DevFS) seek: handle inválido=", index))?;
                Err(DevFsError::InvalidWhence)
            }
        }
    }

    /// Duplica um handle. A cópia é independente (cursor próprio).
    pub fn dup(&self, index: HandleIndex) -> DevFsResult<HandleIndex> {
        let mut handles = self.handles.lock();
        let copy = handles
            .get(index)
            .map_err(rejected("(DevFS) dup: handle inválido=", index))?
            .clone();
        let new_index = handles.allocate(copy)?;

        crate::ktrace!("(DevFS) dup: novo handle=", new_index);
        Ok(new_index)
    }

    /// Metadados do handle
    pub fn fstat(&self, index: HandleIndex) -> DevFsResult<FileStat> {
        let handles = self.handles.lock();
        let handle = handles
            .get(index)
            .map_err(rejected("(DevFS) fstat: handle inválido=", index))?;
        Ok(handle.stat(self.config.block_size))
    }

    /// Cópia do registro de um handle aberto (diagnóstico e testes)
    pub fn handle(&self, index: HandleIndex) -> DevFsResult<DevHandle> {
        self.handles.lock().get(index).cloned()
    }

    /// Handles abertos com seus caminhos (para debug)
    pub fn open_handles(&self) -> Vec<(HandleIndex, String)> {
        self.handles
            .lock()
            .iter_open()
            .map(|(index, handle)| (index, handle.path.clone()))
            .collect()
    }

    /// Total de slots da tabela
    pub fn capacity(&self) -> usize {
        self.handles.lock().capacity()
    }
}

/// Registra a rejeição de um handle inválido e repassa o erro
#[cfg_attr(not(feature = "log_trace"), allow(unused_variables))]
fn rejected(msg: &'static str, index: HandleIndex) -> impl FnOnce(DevFsError) -> DevFsError {
    move |err| {
        crate::ktrace!(msg, index);
        err
    }
}

impl FileSystem for DevFs {
    fn fs_type(&self) -> &str {
        config::FS_TYPE
    }

    fn mount(&self) -> FsResult<()> {
        Ok(DevFs::mount(self)?)
    }

    fn open(&self, path: &str, flags: OpenFlags, mode: u32) -> FsResult<i32> {
        Ok(DevFs::open(self, path, flags, mode)?)
    }

    fn close(&self, handle: i32) -> FsResult<()> {
        Ok(DevFs::close(self, handle)?)
    }

    fn read(&self, handle: i32, buf: &mut [u8]) -> FsResult<usize> {
        Ok(DevFs::read(self, handle, buf)?)
    }

    fn write(&self, handle: i32, buf: &[u8]) -> FsResult<usize> {
        Ok(DevFs::write(self, handle, buf)?)
    }

    fn seek(&self, handle: i32, offset: i64, whence: u32) -> FsResult<u64> {
        Ok(DevFs::lseek(self, handle, offset, whence)?)
    }

    fn dup(&self, handle: i32) -> FsResult<i32> {
        Ok(DevFs::dup(self, handle)?)
    }

    fn fstat(&self, handle: i32) -> FsResult<FileStat> {
        Ok(DevFs::fstat(self, handle)?)
    }
}

// =============================================================================
// REGISTRO NA VFS
// =============================================================================

/// Instância global criada por `init`
static DEVFS: Once<Arc<DevFs>> = Once::new();

/// Instala `devfs` em um registro de tipos específico.
pub fn register(types: &FsTypeRegistry, devfs: Arc<DevFs>) -> FsResult<()> {
    types.install(devfs)
}

/// Cria a instância global e a instala na VFS do kernel.
///
/// Só pode ser chamado uma vez por boot.
pub fn init(registry: Arc<dyn DeviceRegistry>) -> DevFsResult<Arc<DevFs>> {
    init_into(&DEVFS, vfs::global_types(), registry)
}

/// `init` sobre um slot e um registro de tipos explícitos.
///
/// O slot só é preenchido depois que a instalação na VFS deu certo.
pub(crate) fn init_into(
    slot: &Once<Arc<DevFs>>,
    types: &FsTypeRegistry,
    registry: Arc<dyn DeviceRegistry>,
) -> DevFsResult<Arc<DevFs>> {
    if slot.is_completed() {
        crate::kwarn!("(DevFS) init chamado mais de uma vez");
        return Err(DevFsError::AlreadyInitialized);
    }

    let mut created = false;
    let global = slot.try_call_once(|| {
        crate::kinfo!("(DevFS) Inicializando...");
        let devfs = Arc::new(DevFs::new(registry)?);

        if types.install(devfs.clone()).is_err() {
            crate::kerror!("(DevFS) Tipo 'devfs' já registrado na VFS");
            return Err(DevFsError::FsTypeTaken);
        }

        created = true;
        Ok(devfs)
    })?;

    if !created {
        return Err(DevFsError::AlreadyInitialized);
    }

    crate::kok!("(DevFS) Registrado na VFS");
    Ok(global.clone())
}

/// Instância global, se `init` já rodou
pub fn instance() -> Option<Arc<DevFs>> {
    DEVFS.get().cloned()
}
