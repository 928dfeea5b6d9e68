//! Erros do DevFS
//!
//! Cada condição de falha tem seu próprio variant; a VFS recebe o `Errno`
//! correspondente via `From`.

use crate::sys::Errno;
use core::fmt;

/// Falhas das operações do DevFS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevFsError {
    /// Índice de handle negativo
    NegativeHandle,
    /// Índice além do tamanho da tabela
    HandleOutOfRange,
    /// Slot livre (handle fechado ou nunca aberto)
    HandleClosed,
    /// O caminho não resolve para nenhum device
    NoSuchDevice,
    /// Caminho maior que o buffer do handle
    PathTooLong,
    /// TRUNC, APPEND ou CREATE pedidos no open
    UnsupportedFlags,
    /// Seek em handle de stream
    NotSeekable,
    /// Alvo do seek fora de [begin, end]
    SeekOutOfRange,
    /// Whence desconhecido
    InvalidWhence,
    /// O device reportou falha de I/O
    DeviceIo,
    /// Tabela atingiu `max_handles`
    TableExhausted,
    /// O alocador não conseguiu crescer a tabela
    OutOfMemory,
    /// `init` chamado mais de uma vez
    AlreadyInitialized,
    /// Outro filesystem já ocupa o nome "devfs" na VFS
    FsTypeTaken,
    /// Parâmetros de `DevFsConfig` inválidos
    InvalidConfig,
}

impl DevFsError {
    /// Código Errno equivalente
    pub const fn to_errno(self) -> Errno {
        match self {
            DevFsError::NegativeHandle => Errno::EBADF,
            DevFsError::HandleOutOfRange => Errno::EBADF,
            DevFsError::HandleClosed => Errno::EBADF,
            DevFsError::NoSuchDevice => Errno::ENOENT,
            DevFsError::PathTooLong => Errno::ENAMETOOLONG,
            DevFsError::UnsupportedFlags => Errno::EINVAL,
            DevFsError::NotSeekable => Errno::ESPIPE,
            DevFsError::SeekOutOfRange => Errno::EINVAL,
            DevFsError::InvalidWhence => Errno::EINVAL,
            DevFsError::DeviceIo => Errno::EIO,
            DevFsError::TableExhausted => Errno::ENFILE,
            DevFsError::OutOfMemory => Errno::ENOMEM,
            DevFsError::AlreadyInitialized => Errno::EBUSY,
            DevFsError::FsTypeTaken => Errno::EEXIST,
            DevFsError::InvalidConfig => Errno::EINVAL,
        }
    }

    /// Mensagem legível
    pub const fn as_str(self) -> &'static str {
        match self {
            DevFsError::NegativeHandle => "negative handle index",
            DevFsError::HandleOutOfRange => "handle index out of range",
            DevFsError::HandleClosed => "handle is not open",
            DevFsError::NoSuchDevice => "no such device",
            DevFsError::PathTooLong => "path too long",
            DevFsError::UnsupportedFlags => "unsupported open flags",
            DevFsError::NotSeekable => "stream device is not seekable",
            DevFsError::SeekOutOfRange => "seek target out of range",
            DevFsError::InvalidWhence => "invalid seek whence",
            DevFsError::DeviceIo => "device I/O error",
            DevFsError::TableExhausted => "handle table exhausted",
            DevFsError::OutOfMemory => "out of memory growing handle table",
            DevFsError::AlreadyInitialized => "devfs already initialized",
            DevFsError::FsTypeTaken => "filesystem type 'devfs' already installed",
            DevFsError::InvalidConfig => "invalid devfs configuration",
        }
    }

    /// Alguma das três formas de "bad handle"
    pub const fn is_bad_handle(self) -> bool {
        matches!(
            self,
            DevFsError::NegativeHandle | DevFsError::HandleOutOfRange | DevFsError::HandleClosed
        )
    }
}

impl fmt::Display for DevFsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DevFsError> for Errno {
    fn from(err: DevFsError) -> Self {
        err.to_errno()
    }
}

/// Resultado das operações do DevFS
pub type DevFsResult<T> = Result<T, DevFsError>;
