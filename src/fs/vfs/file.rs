//! # Open File Types
//!
//! Flags de abertura e modos de seek compartilhados entre a VFS e os
//! filesystems instalados nela.

use bitflags::bitflags;

// =============================================================================
// OPEN FLAGS
// =============================================================================

bitflags! {
    /// Flags de `open`.
    ///
    /// `O_RDONLY` é a ausência de bits de acesso (valor 0).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        /// Somente escrita
        const WRONLY    = 0x0001;
        /// Leitura e escrita
        const RDWR      = 0x0002;
        /// Criar se não existir
        const CREATE    = 0x0100;
        /// Truncar arquivo existente
        const TRUNC     = 0x0200;
        /// Append mode
        const APPEND    = 0x0400;
        /// Falhar se existir (com CREATE)
        const EXCL      = 0x0800;
        /// Abrir diretório
        const DIRECTORY = 0x1000;
        /// Non-blocking
        const NONBLOCK  = 0x2000;
    }
}

impl OpenFlags {
    /// Somente leitura
    pub const RDONLY: Self = Self::empty();
    /// Máscara de acesso
    pub const ACCMODE: Self = Self::WRONLY.union(Self::RDWR);

    pub fn can_read(&self) -> bool {
        !self.contains(Self::WRONLY) || self.contains(Self::RDWR)
    }

    pub fn can_write(&self) -> bool {
        self.intersects(Self::ACCMODE)
    }
}

// =============================================================================
// SEEK WHENCE
// =============================================================================

/// Whence para seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SeekWhence {
    /// Do início do arquivo
    Set = 0,
    /// Da posição atual
    Cur = 1,
    /// Do fim do arquivo
    End = 2,
}

impl SeekWhence {
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Set),
            1 => Some(Self::Cur),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_modes() {
        assert!(OpenFlags::RDONLY.can_read());
        assert!(!OpenFlags::RDONLY.can_write());
        assert!(!OpenFlags::WRONLY.can_read());
        assert!(OpenFlags::WRONLY.can_write());
        assert!(OpenFlags::RDWR.can_read());
        assert!(OpenFlags::RDWR.can_write());
    }

    #[test]
    fn test_whence_from_raw() {
        assert_eq!(SeekWhence::from_u32(0), Some(SeekWhence::Set));
        assert_eq!(SeekWhence::from_u32(1), Some(SeekWhence::Cur));
        assert_eq!(SeekWhence::from_u32(2), Some(SeekWhence::End));
        assert_eq!(SeekWhence::from_u32(3), None);
    }
}
