//! # Handle Table
//!
//! Tabela global de handles abertos do DevFS.
//!
//! Handles são índices (`HandleIndex`) e nunca ponteiros: todo acesso
//! passa por `get`/`get_mut`, que revalidam faixa e ocupação do slot.
//! Um índice antigo de um handle já fechado é rejeitado, mesmo que o slot
//! seja reutilizado depois por outro open.
//!
//! A tabela só cresce (em passos de `step` slots) e slots livres são
//! reaproveitados antes de crescer.

use super::device::DeviceId;
use super::error::{DevFsError, DevFsResult};
use crate::fs::vfs::{FileStat, OpenFlags, SeekWhence, S_IFBLK, S_IFCHR};
use crate::klib::div_round_up_u64;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::min;

/// Índice de handle visto pelos chamadores (equivalente a um fd)
pub type HandleIndex = i32;

// =============================================================================
// HANDLE RECORD
// =============================================================================

/// Um handle aberto sobre um device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevHandle {
    /// Caminho usado no open (apenas diagnóstico)
    pub path: String,
    /// Flags do open
    pub flags: OpenFlags,
    /// Mode do open
    pub mode: u32,
    /// Posição atual, sempre em [begin, end]
    pub cursor: u64,
    pub begin: u64,
    pub end: u64,
    /// Device sem tamanho: sem seek, cursor fixo em 0
    pub is_stream: bool,
    pub device: DeviceId,
}

impl DevHandle {
    /// Cria o registro de um open. `size == 0` indica stream.
    pub fn new(path: &str, flags: OpenFlags, mode: u32, device: DeviceId, size: u64) -> Self {
        Self {
            path: String::from(path),
            flags,
            mode,
            cursor: 0,
            begin: 0,
            end: size,
            is_stream: size == 0,
            device,
        }
    }

    /// Calcula o novo cursor de um seek sem alterar o handle.
    pub fn seek_target(&self, offset: i64, whence: SeekWhence) -> DevFsResult<u64> {
        if self.is_stream {
            return Err(DevFsError::NotSeekable);
        }

        let base = match whence {
            SeekWhence::Set => self.begin,
            SeekWhence::End => self.end,
            SeekWhence::Cur => self.cursor,
        };

        let target = base
            .checked_add_signed(offset)
            .ok_or(DevFsError::SeekOutOfRange)?;

        if target < self.begin || target > self.end {
            return Err(DevFsError::SeekOutOfRange);
        }
        Ok(target)
    }

    /// Offset no device e tamanho efetivo para transferir `len` bytes.
    ///
    /// Em devices de bloco o tamanho é limitado ao que resta até `end`.
    pub fn transfer_window(&self, len: usize) -> (u64, usize) {
        if self.is_stream {
            return (self.cursor, len);
        }
        let remaining = self.end - self.cursor;
        (self.cursor, min(len as u64, remaining) as usize)
    }

    /// Avança o cursor após uma transferência de `transferred` bytes.
    pub fn advance(&mut self, transferred: usize) {
        if self.is_stream {
            return;
        }
        let step = min(transferred as u64, self.end - self.cursor);
        self.cursor += step;
    }

    /// Projeta o handle em um `FileStat`.
    pub fn stat(&self, block_size: u64) -> FileStat {
        let size = if self.is_stream { 0 } else { self.end };
        FileStat {
            ino: self.device.as_u64(),
            mode: if self.is_stream { S_IFCHR } else { S_IFBLK },
            nlink: 1,
            size,
            blksize: block_size,
            blocks: div_round_up_u64(size, block_size),
            ..FileStat::zeroed()
        }
    }
}

// =============================================================================
// HANDLE TABLE
// =============================================================================

/// Tabela de handles.
pub struct HandleTable {
    slots: Vec<Option<DevHandle>>,
    step: usize,
    max: usize,
}

impl HandleTable {
    /// Cria a tabela já com o primeiro passo de slots livres.
    pub fn new(step: usize, max: usize) -> DevFsResult<Self> {
        if step == 0 || max == 0 || max > HandleIndex::MAX as usize {
            return Err(DevFsError::InvalidConfig);
        }
        let mut table = Self {
            slots: Vec::new(),
            step,
            max,
        };
        table.grow()?;
        Ok(table)
    }

    /// Total de slots (livres + ocupados)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots ocupados
    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Coloca `handle` no primeiro slot livre, crescendo se não houver.
    pub fn allocate(&mut self, handle: DevHandle) -> DevFsResult<HandleIndex> {
        let slot = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None => self.grow()?,
        };

        let index = HandleIndex::try_from(slot).map_err(|_| DevFsError::TableExhausted)?;
        self.slots[slot] = Some(handle);
        Ok(index)
    }

    /// Libera o slot, devolvendo o registro que estava nele.
    pub fn release(&mut self, index: HandleIndex) -> DevFsResult<DevHandle> {
        let slot = self.slot_index(index)?;
        self.slots[slot].take().ok_or(DevFsError::HandleClosed)
    }

    /// Verifica se `index` aponta para um handle aberto.
    pub fn validate(&self, index: HandleIndex) -> DevFsResult<()> {
        self.get(index).map(|_| ())
    }

    pub fn get(&self, index: HandleIndex) -> DevFsResult<&DevHandle> {
        let slot = self.slot_index(index)?;
        self.slots[slot].as_ref().ok_or(DevFsError::HandleClosed)
    }

    pub fn get_mut(&mut self, index: HandleIndex) -> DevFsResult<&mut DevHandle> {
        let slot = self.slot_index(index)?;
        self.slots[slot].as_mut().ok_or(DevFsError::HandleClosed)
    }

    /// Itera sobre os handles abertos
    pub fn iter_open(&self) -> impl Iterator<Item = (HandleIndex, &DevHandle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|h| (slot as HandleIndex, h)))
    }

    /// Faixa + sinal. Não olha a ocupação.
    fn slot_index(&self, index: HandleIndex) -> DevFsResult<usize> {
        if index < 0 {
            return Err(DevFsError::NegativeHandle);
        }
        let slot = index as usize;
        if slot >= self.slots.len() {
            return Err(DevFsError::HandleOutOfRange);
        }
        Ok(slot)
    }

    /// Adiciona até `step` slots livres. Retorna o primeiro slot novo.
    fn grow(&mut self) -> DevFsResult<usize> {
        let old_len = self.slots.len();
        let new_len = min(old_len.saturating_add(self.step), self.max);
        if new_len <= old_len {
            crate::kerror!("(DevFS) Tabela de handles esgotada, capacidade=", old_len);
            return Err(DevFsError::TableExhausted);
        }

        self.slots
            .try_reserve_exact(new_len - old_len)
            .map_err(|_| DevFsError::OutOfMemory)?;
        self.slots.resize_with(new_len, || None);

        crate::kdebug!("(DevFS) Tabela de handles cresceu para ", new_len);
        Ok(old_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(dev: u32, size: u64) -> DevHandle {
        DevHandle::new("/dev/test", OpenFlags::RDWR, 0, DeviceId::new(dev), size)
    }

    #[test]
    fn test_new_table_is_one_step_of_free_slots() {
        let table = HandleTable::new(8, 64).expect("table");
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.in_use(), 0);
        assert_eq!(table.get(0), Err(DevFsError::HandleClosed));
    }

    #[test]
    fn test_allocate_reuses_lowest_free_slot() {
        let mut table = HandleTable::new(4, 64).expect("table");
        assert_eq!(table.allocate(block(1, 10)), Ok(0));
        assert_eq!(table.allocate(block(2, 10)), Ok(1));
        assert_eq!(table.allocate(block(3, 10)), Ok(2));

        table.release(1).expect("release");
        table.release(0).expect("release");

        assert_eq!(table.allocate(block(4, 10)), Ok(0));
        assert_eq!(table.allocate(block(5, 10)), Ok(1));
        assert_eq!(table.allocate(block(6, 10)), Ok(3));
        assert_eq!(table.capacity(), 4);
    }

    #[test]
    fn test_grows_by_step_when_full() {
        let mut table = HandleTable::new(2, 64).expect("table");
        for expected in 0..2 {
            assert_eq!(table.allocate(block(expected as u32, 16)), Ok(expected));
        }
        assert_eq!(table.allocate(block(9, 16)), Ok(2));
        assert_eq!(table.capacity(), 4);
        // Slot novo não ocupado começa livre
        assert_eq!(table.get(3), Err(DevFsError::HandleClosed));
        // Os anteriores continuam intactos
        assert_eq!(table.get(0).map(|h| h.device), Ok(DeviceId::new(0)));
        assert_eq!(table.get(1).map(|h| h.device), Ok(DeviceId::new(1)));
    }

    #[test]
    fn test_exhaustion_at_max() {
        let mut table = HandleTable::new(2, 3).expect("table");
        assert_eq!(table.allocate(block(0, 1)), Ok(0));
        assert_eq!(table.allocate(block(1, 1)), Ok(1));
        assert_eq!(table.allocate(block(2, 1)), Ok(2));
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.allocate(block(3, 1)), Err(DevFsError::TableExhausted));

        table.release(1).expect("release");
        assert_eq!(table.allocate(block(4, 1)), Ok(1));
    }

    #[test]
    fn test_validate_distinguishes_bad_handles() {
        let mut table = HandleTable::new(4, 64).expect("table");
        let h = table.allocate(block(1, 1)).expect("alloc");

        assert_eq!(table.validate(h), Ok(()));
        assert_eq!(table.validate(-1), Err(DevFsError::NegativeHandle));
        assert_eq!(table.validate(4), Err(DevFsError::HandleOutOfRange));
        assert_eq!(table.validate(2), Err(DevFsError::HandleClosed));

        table.release(h).expect("release");
        assert_eq!(table.validate(h), Err(DevFsError::HandleClosed));
        assert_eq!(table.release(h), Err(DevFsError::HandleClosed));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            HandleTable::new(0, 8),
            Err(DevFsError::InvalidConfig)
        ));
        assert!(matches!(
            HandleTable::new(8, 0),
            Err(DevFsError::InvalidConfig)
        ));
    }

    #[test]
    fn test_seek_target_bounds() {
        let mut h = block(1, 100);
        assert_eq!(h.seek_target(0, SeekWhence::Set), Ok(0));
        assert_eq!(h.seek_target(100, SeekWhence::Set), Ok(100));
        assert_eq!(h.seek_target(101, SeekWhence::Set), Err(DevFsError::SeekOutOfRange));
        assert_eq!(h.seek_target(-1, SeekWhence::Set), Err(DevFsError::SeekOutOfRange));
        assert_eq!(h.seek_target(-100, SeekWhence::End), Ok(0));
        assert_eq!(h.seek_target(1, SeekWhence::End), Err(DevFsError::SeekOutOfRange));

        h.cursor = 40;
        assert_eq!(h.seek_target(-40, SeekWhence::Cur), Ok(0));
        assert_eq!(h.seek_target(60, SeekWhence::Cur), Ok(100));
        assert_eq!(h.seek_target(-41, SeekWhence::Cur), Err(DevFsError::SeekOutOfRange));
        assert_eq!(
            h.seek_target(i64::MAX, SeekWhence::Cur),
            Err(DevFsError::SeekOutOfRange)
        );
        assert_eq!(
            h.seek_target(i64::MIN, SeekWhence::End),
            Err(DevFsError::SeekOutOfRange)
        );
    }

    #[test]
    fn test_stream_is_not_seekable() {
        let h = block(7, 0);
        assert!(h.is_stream);
        assert_eq!(h.seek_target(0, SeekWhence::Set), Err(DevFsError::NotSeekable));
        assert_eq!(h.seek_target(0, SeekWhence::Cur), Err(DevFsError::NotSeekable));
    }

    #[test]
    fn test_transfer_window_clamps_to_extent() {
        let mut h = block(1, 10);
        assert_eq!(h.transfer_window(4), (0, 4));
        h.advance(4);
        assert_eq!(h.transfer_window(100), (4, 6));
        h.advance(100);
        assert_eq!(h.cursor, 10);
        assert_eq!(h.transfer_window(1), (10, 0));

        let mut s = block(2, 0);
        assert_eq!(s.transfer_window(64), (0, 64));
        s.advance(64);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn test_stat_projection() {
        let b = block(3, 4097);
        let st = b.stat(512);
        assert_eq!(st.ino, 3);
        assert_eq!(st.size, 4097);
        assert_eq!(st.blocks, 9);
        assert_eq!(st.nlink, 1);
        assert!(st.is_block_device());

        let s = block(4, 0).stat(512);
        assert_eq!(s.size, 0);
        assert_eq!(s.blocks, 0);
        assert!(s.is_char_device());
    }
}
