// =============================================================================
// DEVFS LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do DevFS com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Evita geração de código SSE/AVX
// - SEM alocação - Apenas strings literais e hex de largura fixa
// - O destino (serial, ring buffer, ...) é um `LogSink` instalado pelo kernel
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros fatais ou críticos
// - WARN:  Situações suspeitas mas recuperáveis (ex: falha de I/O no device)
// - INFO:  Fluxo normal de execução (init, registro no VFS)
// - DEBUG: Informações de debugging (crescimento da tabela)
// - TRACE: Detalhes extremos (cada open/close/seek)
//
// COMO USAR:
//   kinfo!("(DevFS) Inicializando...");          // Apenas string
//   kinfo!("(DevFS) Handle=", 0x10);             // String + hex
//
// =============================================================================

use spin::Once;

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[OK]\x1b[0m ";
pub const P_FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m ";

// =============================================================================
// SINK
// =============================================================================

/// Destino das linhas de log.
///
/// O kernel instala um sink (tipicamente a UART) uma única vez no boot.
/// Antes disso, toda emissão é descartada.
pub trait LogSink: Sync {
    fn write_str(&self, s: &str);
}

static SINK: Once<&'static dyn LogSink> = Once::new();

/// Instala o sink global. Retorna `false` se já havia um instalado.
pub fn set_sink(sink: &'static dyn LogSink) -> bool {
    let mut installed = false;
    SINK.call_once(|| {
        installed = true;
        sink
    });
    installed
}

/// Envia uma string ao sink.
#[inline(never)]
pub fn emit_str(s: &str) {
    if let Some(sink) = SINK.get() {
        sink.write_str(s);
    }
}

/// Envia uma nova linha.
#[inline]
pub fn emit_nl() {
    emit_str("\n");
}

/// Envia um valor u64 em hexadecimal.
///
/// Formato de saída: 0x0123456789ABCDEF (sempre 18 caracteres)
#[inline(never)]
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    emit_str(format_hex(value, &mut buf));
}

/// Renderiza `value` em `buf` sem core::fmt.
pub fn format_hex(value: u64, buf: &mut [u8; 18]) -> &str {
    buf[0] = b'0';
    buf[1] = b'x';
    for i in 0..16 {
        let nibble = ((value >> (60 - i * 4)) & 0xF) as u8;
        buf[2 + i] = nibble_to_ascii(nibble);
    }
    // Apenas ASCII foi escrito
    core::str::from_utf8(&buf[..]).unwrap_or("0x????????????????")
}

#[inline(always)]
const fn nibble_to_ascii(nibble: u8) -> u8 {
    if nibble < 10 {
        b'0' + nibble
    } else {
        b'A' + (nibble - 10)
    }
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR / WARN
// =============================================================================
//
// Sempre ativos (exceto com no_logs).
//

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_ERROR);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_ERROR);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_hex($val as u64);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_WARN);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_WARN);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_hex($val as u64);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_INFO);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_INFO);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_hex($val as u64);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    any(feature = "log_trace", feature = "log_debug"),
    not(feature = "no_logs")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_DEBUG);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_DEBUG);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_hex($val as u64);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(not(all(
    any(feature = "log_trace", feature = "log_debug"),
    not(feature = "no_logs")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(feature = "log_trace", not(feature = "no_logs")))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_TRACE);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_TRACE);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_hex($val as u64);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(not(all(feature = "log_trace", not(feature = "no_logs"))))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_OK);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::core::logging::emit_str($crate::core::logging::P_FAIL);
        $crate::core::logging::emit_str($msg);
        $crate::core::logging::emit_nl();
    }};
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
