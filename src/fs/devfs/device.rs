//! Device - interface com o registro de dispositivos
//!
//! O DevFS não implementa drivers. Ele consome o registro do kernel por
//! esta trait: resolver caminho, perguntar tamanho, ler e escrever bytes.

/// Identificador opaco de dispositivo devolvido pelo registro
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

impl DeviceId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0 as u64
    }
}

/// Falha de I/O reportada pelo driver (o `-1` do ABI de drivers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIoError;

/// Registro de dispositivos do kernel.
///
/// As chamadas acontecem com o lock do DevFS adquirido: a implementação
/// não pode chamar o DevFS de volta, e deve terminar em tempo limitado.
pub trait DeviceRegistry: Send + Sync {
    /// Resolve um caminho para um device
    fn resolve(&self, path: &str) -> Option<DeviceId>;

    /// Tamanho em bytes. Zero indica device de stream (sem tamanho fixo).
    fn size(&self, dev: DeviceId) -> u64;

    /// Lê até `buf.len()` bytes a partir de `offset`
    fn read(&self, dev: DeviceId, buf: &mut [u8], offset: u64) -> Result<usize, DeviceIoError>;

    /// Escreve até `buf.len()` bytes a partir de `offset`
    fn write(&self, dev: DeviceId, buf: &[u8], offset: u64) -> Result<usize, DeviceIoError>;
}
