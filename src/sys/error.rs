//! # Standard Error Codes (Errno)
//!
//! Define os códigos de erro devolvidos pelo DevFS à camada VFS.
//! Segue a numeração POSIX/Linux para facilitar o mapeamento em syscalls.
//! Valores negativos são usados no retorno bruto (isize).

/// Códigos de erro POSIX usados por este crate.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    EPERM = 1,         // Operation not permitted
    ENOENT = 2,        // No such file or directory
    EIO = 5,           // I/O error
    EBADF = 9,         // Bad file number
    ENOMEM = 12,       // Out of memory
    EBUSY = 16,        // Device or resource busy
    EEXIST = 17,       // File exists
    EINVAL = 22,       // Invalid argument
    ENFILE = 23,       // File table overflow
    ESPIPE = 29,       // Illegal seek
    ENAMETOOLONG = 36, // File name too long
    ENOSYS = 38,       // Function not implemented
}

impl Errno {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }

    /// Recupera o Errno a partir de um retorno negativo.
    pub fn from_isize(code: isize) -> Option<Self> {
        if code >= 0 {
            return None;
        }
        match -code {
            1 => Some(Self::EPERM),
            2 => Some(Self::ENOENT),
            5 => Some(Self::EIO),
            9 => Some(Self::EBADF),
            12 => Some(Self::ENOMEM),
            16 => Some(Self::EBUSY),
            17 => Some(Self::EEXIST),
            22 => Some(Self::EINVAL),
            23 => Some(Self::ENFILE),
            29 => Some(Self::ESPIPE),
            36 => Some(Self::ENAMETOOLONG),
            38 => Some(Self::ENOSYS),
            _ => None,
        }
    }
}

/// Converte `Result<usize, Errno>` para o retorno bruto (valor ou -errno).
pub fn result_to_isize(result: Result<usize, Errno>) -> isize {
    match result {
        Ok(val) => val as isize,
        Err(e) => e.as_isize(),
    }
}
