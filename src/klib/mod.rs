//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do crate.

#[cfg(any(test, feature = "self_test"))]
pub mod test_framework;

/// Verifica se `val` é potência de 2 (zero não é).
#[inline(always)]
pub const fn is_power_of_two(val: u64) -> bool {
    val != 0 && (val & (val - 1)) == 0
}

/// Quantos blocos de `block` bytes são necessários para `val` bytes.
///
/// Não transborda perto de `u64::MAX`.
#[inline]
pub const fn div_round_up_u64(val: u64, block: u64) -> u64 {
    val / block + (val % block != 0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_up() {
        assert_eq!(div_round_up_u64(0, 512), 0);
        assert_eq!(div_round_up_u64(1, 512), 1);
        assert_eq!(div_round_up_u64(4096, 512), 8);
        assert_eq!(div_round_up_u64(4097, 512), 9);
        assert_eq!(div_round_up_u64(u64::MAX, 512), u64::MAX / 512 + 1);
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(512));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(600));
    }
}
