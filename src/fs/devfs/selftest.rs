//! Testes de boot do DevFS (feature `self_test`)
//!
//! Cada caso monta um `DevFs` próprio sobre um `MemRegistry`, sem tocar
//! na instância global.

use super::testdev::MemRegistry;
use super::{DevFs, DevFsConfig, DevFsError};
use crate::fs::vfs::{OpenFlags, SeekWhence};
use crate::klib::test_framework::{run_test_suite, SuiteSummary, TestCase, TestResult};
use alloc::sync::Arc;

const DEVFS_TESTS: &[TestCase] = &[
    TestCase::new("devfs_seek_block", test_seek_block),
    TestCase::new("devfs_stream_unseekable", test_stream_unseekable),
    TestCase::new("devfs_double_close", test_double_close),
    TestCase::new("devfs_dup_independent", test_dup_independent),
    TestCase::new("devfs_table_growth", test_table_growth),
    TestCase::new("devfs_cursor_persisted", test_cursor_persisted),
];

/// Executa a suite do DevFS
pub fn run_devfs_tests() -> SuiteSummary {
    run_test_suite("DevFS", DEVFS_TESTS)
}

fn check(cond: bool) -> TestResult {
    if cond {
        TestResult::Pass
    } else {
        TestResult::Fail
    }
}

fn mount(registry: MemRegistry, config: DevFsConfig) -> Option<DevFs> {
    DevFs::with_config(Arc::new(registry), config).ok()
}

fn test_seek_block() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_block("/dev/disk0", 4096);
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(4)) else {
        return TestResult::Fail;
    };
    let Ok(h) = fs.open("/dev/disk0", OpenFlags::RDONLY, 0) else {
        return TestResult::Fail;
    };

    check(
        fs.seek(h, 0, SeekWhence::End) == Ok(4096)
            && fs.seek(h, -4096, SeekWhence::Cur) == Ok(0)
            && fs.seek(h, 1, SeekWhence::End) == Err(DevFsError::SeekOutOfRange),
    )
}

fn test_stream_unseekable() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_stream("/dev/tty0");
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(4)) else {
        return TestResult::Fail;
    };
    let Ok(h) = fs.open("/dev/tty0", OpenFlags::RDWR, 0) else {
        return TestResult::Fail;
    };

    let size_zero = matches!(fs.fstat(h), Ok(st) if st.size == 0 && st.is_char_device());
    check(size_zero && fs.seek(h, 0, SeekWhence::Set) == Err(DevFsError::NotSeekable))
}

fn test_double_close() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_block("/dev/disk0", 16);
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(4)) else {
        return TestResult::Fail;
    };
    let Ok(h) = fs.open("/dev/disk0", OpenFlags::RDONLY, 0) else {
        return TestResult::Fail;
    };

    check(fs.close(h).is_ok() && fs.close(h) == Err(DevFsError::HandleClosed))
}

fn test_dup_independent() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_block("/dev/disk0", 64);
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(4)) else {
        return TestResult::Fail;
    };
    let Ok(h) = fs.open("/dev/disk0", OpenFlags::RDONLY, 0) else {
        return TestResult::Fail;
    };
    if fs.seek(h, 10, SeekWhence::Set).is_err() {
        return TestResult::Fail;
    }
    let Ok(copy) = fs.dup(h) else {
        return TestResult::Fail;
    };

    let moved = fs.seek(copy, 20, SeekWhence::Cur) == Ok(30);
    let source_kept = matches!(fs.handle(h), Ok(rec) if rec.cursor == 10);
    check(copy != h && moved && source_kept)
}

fn test_table_growth() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_block("/dev/disk0", 8);
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(2)) else {
        return TestResult::Fail;
    };

    for expected in 0..5 {
        if fs.open("/dev/disk0", OpenFlags::RDONLY, 0) != Ok(expected) {
            return TestResult::Fail;
        }
    }
    check(fs.capacity() == 6 && fs.open_handles().len() == 5)
}

fn test_cursor_persisted() -> TestResult {
    let registry = MemRegistry::new();
    registry.add_block_with("/dev/rom0", b"forge-devfs");
    let Some(fs) = mount(registry, DevFsConfig::new().with_handles_step(4)) else {
        return TestResult::Fail;
    };
    let Ok(h) = fs.open("/dev/rom0", OpenFlags::RDONLY, 0) else {
        return TestResult::Fail;
    };

    let mut first = [0u8; 5];
    let mut second = [0u8; 6];
    let ok = fs.read(h, &mut first) == Ok(5)
        && fs.read(h, &mut second) == Ok(6)
        && &first == b"forge"
        && &second == b"-devfs";
    check(ok && fs.read(h, &mut first) == Ok(0))
}
