//! # Synchronization Primitives
//!
//! Primitivas de sincronização usadas pelo DevFS.
//!
//! ## Regras
//!
//! - **Spinlock**: Seções críticas curtas, não pode dormir. Toda a tabela
//!   de handles do DevFS fica atrás de um único Spinlock.
//! - **Sem reentrância**: quem segura o lock não pode chamar o DevFS de novo
//!   (ex: de dentro de um callback de device). Isso é deadlock.

/// Hook de mascaramento de interrupções (fornecido pela arquitetura)
pub mod irq;

/// Spinlock (busy-wait, não dorme)
pub mod spinlock;

pub use irq::IrqControl;
pub use spinlock::{Spinlock, SpinlockGuard};
