//! Testes para a interface VFS (registro de tipos)

#![cfg(test)]

use super::{create_test_devfs, create_test_registry};
use crate::fs::devfs::{self, DevFsError};
use crate::fs::vfs::{self, FsTypeRegistry, OpenFlags};
use crate::sys::Errno;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use spin::Once;

#[test]
fn test_register_into_local_registry() {
    let types = FsTypeRegistry::new();
    let registry = create_test_registry();

    let fs = Arc::new(create_test_devfs(&registry));
    assert_eq!(devfs::register(&types, fs.clone()), Ok(()));
    assert_eq!(types.types(), vec![String::from("devfs")]);

    // Mesmo nome duas vezes
    let other = Arc::new(create_test_devfs(&registry));
    assert_eq!(devfs::register(&types, other), Err(Errno::EEXIST));

    let found = types.lookup("devfs").expect("devfs instalado");
    let h = found.open("/dev/disk0", OpenFlags::RDONLY, 0).expect("open");
    // A instância achada é a mesma que foi registrada
    assert_eq!(fs.open_handles().len(), 1);
    assert_eq!(found.close(h), Ok(()));
    assert!(types.lookup("tmpfs").is_none());
}

#[test]
fn test_global_init_runs_once() {
    let registry = create_test_registry();

    let fs = devfs::init(registry.clone()).expect("primeiro init");
    assert!(devfs::instance().is_some_and(|global| Arc::ptr_eq(&global, &fs)));

    let installed = vfs::lookup_fs("devfs").expect("devfs na VFS");
    assert_eq!(installed.mount(), Ok(()));
    assert_eq!(installed.fs_type(), "devfs");

    // O tipo já está ocupado na VFS global
    assert_eq!(vfs::install_fs(fs.clone()), Err(Errno::EEXIST));

    assert!(matches!(
        devfs::init(registry),
        Err(DevFsError::AlreadyInitialized)
    ));
    assert_eq!(Errno::from(DevFsError::AlreadyInitialized), Errno::EBUSY);
}

#[test]
fn test_init_conflict_leaves_slot_empty() {
    let slot = Once::new();
    let types = FsTypeRegistry::new();
    let registry = create_test_registry();

    // Outro "devfs" chegou antes
    let squatter = Arc::new(create_test_devfs(&registry));
    devfs::register(&types, squatter).expect("register");

    assert!(matches!(
        devfs::init_into(&slot, &types, registry.clone()),
        Err(DevFsError::FsTypeTaken)
    ));
    assert!(slot.get().is_none());
    assert_eq!(Errno::from(DevFsError::FsTypeTaken), Errno::EEXIST);

    // O conflito se repete, nunca vira AlreadyInitialized
    assert!(matches!(
        devfs::init_into(&slot, &types, registry),
        Err(DevFsError::FsTypeTaken)
    ));
}

#[test]
fn test_init_commits_only_after_install() {
    let slot = Once::new();
    let types = FsTypeRegistry::new();
    let registry = create_test_registry();

    let fs = devfs::init_into(&slot, &types, registry.clone()).expect("init");
    assert!(slot.get().is_some_and(|global| Arc::ptr_eq(global, &fs)));
    assert!(types.lookup("devfs").is_some());

    assert!(matches!(
        devfs::init_into(&slot, &types, registry),
        Err(DevFsError::AlreadyInitialized)
    ));
    assert_eq!(types.types().len(), 1);
}
