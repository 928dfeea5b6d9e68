//! Core Module
//!
//! Infraestrutura compartilhada pelo resto do crate.
//! Hoje contém apenas o sistema de logging (`kinfo!`, `ktrace!`, ...).

pub mod logging;
