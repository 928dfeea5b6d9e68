//! Stat - metadados devolvidos por fstat

/// Máscara do tipo de arquivo em `mode`
pub const S_IFMT: u32 = 0o170000;
/// Dispositivo de caractere
pub const S_IFCHR: u32 = 0o020000;
/// Dispositivo de bloco
pub const S_IFBLK: u32 = 0o060000;

/// Timestamp (segundos + nanossegundos)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timespec {
    pub tv_sec: i64,
    pub tv_nsec: i64,
}

/// Resultado de stat/fstat
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    /// Device number do filesystem
    pub dev: u64,
    /// Inode number
    pub ino: u64,
    /// Mode (tipo + permissões)
    pub mode: u32,
    /// Número de hard links
    pub nlink: u32,
    /// UID do dono
    pub uid: u32,
    /// GID do grupo
    pub gid: u32,
    /// Device number (se for dispositivo)
    pub rdev: u64,
    /// Tamanho em bytes
    pub size: u64,
    /// Tamanho do bloco
    pub blksize: u64,
    /// Número de blocos
    pub blocks: u64,
    pub atime: Timespec,
    pub mtime: Timespec,
    pub ctime: Timespec,
}

impl FileStat {
    /// Stat zerado
    pub const fn zeroed() -> Self {
        Self {
            dev: 0,
            ino: 0,
            mode: 0,
            nlink: 0,
            uid: 0,
            gid: 0,
            rdev: 0,
            size: 0,
            blksize: 0,
            blocks: 0,
            atime: Timespec { tv_sec: 0, tv_nsec: 0 },
            mtime: Timespec { tv_sec: 0, tv_nsec: 0 },
            ctime: Timespec { tv_sec: 0, tv_nsec: 0 },
        }
    }

    pub fn file_type_bits(&self) -> u32 {
        self.mode & S_IFMT
    }

    pub fn is_char_device(&self) -> bool {
        self.file_type_bits() == S_IFCHR
    }

    pub fn is_block_device(&self) -> bool {
        self.file_type_bits() == S_IFBLK
    }
}
