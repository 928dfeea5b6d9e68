//! # Configuração do DevFS
//!
//! Constantes e parâmetros da tabela de handles.

use super::error::DevFsError;
use crate::klib::is_power_of_two;

// =============================================================================
// CONSTANTES
// =============================================================================

/// Nome do tipo de filesystem registrado na VFS
pub const FS_TYPE: &str = "devfs";

/// Slots adicionados à tabela a cada crescimento
pub const HANDLES_STEP: usize = 1024;

/// Tamanho de bloco reportado por fstat
pub const BLOCK_SIZE: u64 = 512;

/// Tamanho do buffer de caminho (inclui o terminador do ABI C)
pub const PATH_MAX: usize = 1024;

/// Maior índice de handle representável + 1
pub const MAX_HANDLES: usize = i32::MAX as usize;

// =============================================================================
// CONFIGURAÇÃO POR INSTÂNCIA
// =============================================================================

/// Parâmetros de uma instância de DevFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevFsConfig {
    /// Slots adicionados por crescimento (e capacidade inicial)
    pub handles_step: usize,
    /// `st_blksize` reportado (potência de 2)
    pub block_size: u64,
    /// Caminhos com `path_max` bytes ou mais são rejeitados
    pub path_max: usize,
    /// Limite de slots da tabela
    pub max_handles: usize,
}

impl DevFsConfig {
    pub const fn new() -> Self {
        Self {
            handles_step: HANDLES_STEP,
            block_size: BLOCK_SIZE,
            path_max: PATH_MAX,
            max_handles: MAX_HANDLES,
        }
    }

    pub const fn with_handles_step(mut self, step: usize) -> Self {
        self.handles_step = step;
        self
    }

    pub const fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    pub const fn with_path_max(mut self, path_max: usize) -> Self {
        self.path_max = path_max;
        self
    }

    pub const fn with_max_handles(mut self, max_handles: usize) -> Self {
        self.max_handles = max_handles;
        self
    }

    /// Rejeita combinações que quebrariam a tabela ou o fstat
    pub fn validate(&self) -> Result<(), DevFsError> {
        if self.handles_step == 0 || self.max_handles == 0 {
            return Err(DevFsError::InvalidConfig);
        }
        if self.max_handles > MAX_HANDLES {
            return Err(DevFsError::InvalidConfig);
        }
        if !is_power_of_two(self.block_size) {
            return Err(DevFsError::InvalidConfig);
        }
        if self.path_max < 2 {
            return Err(DevFsError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for DevFsConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DevFsConfig::default();
        assert_eq!(config.handles_step, 1024);
        assert_eq!(config.block_size, 512);
        assert_eq!(config.path_max, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let base = DevFsConfig::new();
        assert_eq!(
            base.with_handles_step(0).validate(),
            Err(DevFsError::InvalidConfig)
        );
        assert_eq!(
            base.with_block_size(600).validate(),
            Err(DevFsError::InvalidConfig)
        );
        assert_eq!(
            base.with_max_handles(0).validate(),
            Err(DevFsError::InvalidConfig)
        );
        assert_eq!(
            base.with_path_max(1).validate(),
            Err(DevFsError::InvalidConfig)
        );
    }
}
