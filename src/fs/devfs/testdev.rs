//! Devices em memória para testes
//!
//! `MemRegistry` implementa `DeviceRegistry` com três tipos de device:
//! - bloco: buffer de tamanho fixo, endereçado por offset
//! - stream: FIFO (write enfileira, read consome), tamanho reportado 0
//! - failing: toda leitura/escrita falha
//!
//! Usado pelos testes de host e pela suite `self_test` do kernel.

use super::device::{DeviceId, DeviceIoError, DeviceRegistry};
use crate::sync::Spinlock;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;
use core::sync::atomic::{AtomicUsize, Ordering};

enum MemKind {
    Block(Vec<u8>),
    Stream(VecDeque<u8>),
    Failing(u64),
}

struct MemDevice {
    path: String,
    kind: MemKind,
    /// Máximo de bytes por chamada (simula transferência curta)
    transfer_limit: Option<usize>,
}

/// Registro de devices em memória.
pub struct MemRegistry {
    devices: Spinlock<Vec<MemDevice>>,
    io_calls: AtomicUsize,
}

impl MemRegistry {
    pub fn new() -> Self {
        Self {
            devices: Spinlock::new(Vec::new()),
            io_calls: AtomicUsize::new(0),
        }
    }

    fn add(&self, path: &str, kind: MemKind) -> DeviceId {
        let mut devices = self.devices.lock();
        devices.push(MemDevice {
            path: String::from(path),
            kind,
            transfer_limit: None,
        });
        DeviceId::new((devices.len() - 1) as u32)
    }

    /// Device de bloco zerado com `size` bytes
    pub fn add_block(&self, path: &str, size: usize) -> DeviceId {
        self.add(path, MemKind::Block(vec![0; size]))
    }

    /// Device de bloco com conteúdo inicial
    pub fn add_block_with(&self, path: &str, contents: &[u8]) -> DeviceId {
        self.add(path, MemKind::Block(contents.to_vec()))
    }

    /// Device de stream (tamanho 0)
    pub fn add_stream(&self, path: &str) -> DeviceId {
        self.add(path, MemKind::Stream(VecDeque::new()))
    }

    /// Device que reporta `size` mas falha todo I/O
    pub fn add_failing(&self, path: &str, size: u64) -> DeviceId {
        self.add(path, MemKind::Failing(size))
    }

    /// Limita quantos bytes cada chamada transfere
    pub fn set_transfer_limit(&self, dev: DeviceId, limit: Option<usize>) {
        if let Some(device) = self.devices.lock().get_mut(dev.0 as usize) {
            device.transfer_limit = limit;
        }
    }

    /// Cópia do conteúdo atual do device
    pub fn contents(&self, dev: DeviceId) -> Vec<u8> {
        match self.devices.lock().get(dev.0 as usize).map(|d| &d.kind) {
            Some(MemKind::Block(data)) => data.clone(),
            Some(MemKind::Stream(queue)) => queue.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Total de chamadas read/write que chegaram aos devices
    pub fn io_calls(&self) -> usize {
        self.io_calls.load(Ordering::Relaxed)
    }
}

impl Default for MemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry for MemRegistry {
    fn resolve(&self, path: &str) -> Option<DeviceId> {
        self.devices
            .lock()
            .iter()
            .position(|d| d.path == path)
            .map(|idx| DeviceId::new(idx as u32))
    }

    fn size(&self, dev: DeviceId) -> u64 {
        match self.devices.lock().get(dev.0 as usize).map(|d| &d.kind) {
            Some(MemKind::Block(data)) => data.len() as u64,
            Some(MemKind::Failing(size)) => *size,
            _ => 0,
        }
    }

    fn read(&self, dev: DeviceId, buf: &mut [u8], offset: u64) -> Result<usize, DeviceIoError> {
        self.io_calls.fetch_add(1, Ordering::Relaxed);
        let mut devices = self.devices.lock();
        let device = devices.get_mut(dev.0 as usize).ok_or(DeviceIoError)?;
        let want = min(buf.len(), device.transfer_limit.unwrap_or(usize::MAX));

        match &mut device.kind {
            MemKind::Block(data) => {
                let start = usize::try_from(offset).map_err(|_| DeviceIoError)?;
                if start > data.len() {
                    return Err(DeviceIoError);
                }
                let n = min(want, data.len() - start);
                buf[..n].copy_from_slice(&data[start..start + n]);
                Ok(n)
            }
            MemKind::Stream(queue) => {
                let n = min(want, queue.len());
                for (dst, src) in buf[..n].iter_mut().zip(queue.drain(..n)) {
                    *dst = src;
                }
                Ok(n)
            }
            MemKind::Failing(_) => Err(DeviceIoError),
        }
    }

    fn write(&self, dev: DeviceId, buf: &[u8], offset: u64) -> Result<usize, DeviceIoError> {
        self.io_calls.fetch_add(1, Ordering::Relaxed);
        let mut devices = self.devices.lock();
        let device = devices.get_mut(dev.0 as usize).ok_or(DeviceIoError)?;
        let want = min(buf.len(), device.transfer_limit.unwrap_or(usize::MAX));

        match &mut device.kind {
            MemKind::Block(data) => {
                let start = usize::try_from(offset).map_err(|_| DeviceIoError)?;
                if start > data.len() {
                    return Err(DeviceIoError);
                }
                let n = min(want, data.len() - start);
                data[start..start + n].copy_from_slice(&buf[..n]);
                Ok(n)
            }
            MemKind::Stream(queue) => {
                queue.extend(buf[..want].iter().copied());
                Ok(want)
            }
            MemKind::Failing(_) => Err(DeviceIoError),
        }
    }
}
