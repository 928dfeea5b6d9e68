//! Framework de testes do kernel
//!
//! Suites simples executadas no boot (feature `self_test`), sem harness
//! do `cargo test`. Cada caso devolve `TestResult`.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Contagem de uma suite executada
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> SuiteSummary {
    crate::kinfo!("=== Executando suite:");
    crate::kinfo!(name);

    let mut summary = SuiteSummary::default();

    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::kok!(test.name);
                summary.passed += 1;
            }
            TestResult::Fail => {
                crate::kfail!(test.name);
                summary.failed += 1;
            }
            TestResult::Skip => {
                crate::kwarn!(test.name);
                summary.skipped += 1;
            }
        }
    }

    crate::kinfo!("Resultados: passed=", summary.passed);
    if summary.failed > 0 {
        crate::kerror!("Resultados: failed=", summary.failed);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> TestResult {
        TestResult::Pass
    }

    fn bad() -> TestResult {
        TestResult::Fail
    }

    fn later() -> TestResult {
        TestResult::Skip
    }

    #[test]
    fn test_suite_counts() {
        const CASES: &[TestCase] = &[
            TestCase::new("ok", ok),
            TestCase::new("bad", bad),
            TestCase::new("later", later),
            TestCase::new("ok2", ok),
        ];

        let summary = run_test_suite("counts", CASES);
        assert_eq!(
            summary,
            SuiteSummary {
                passed: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(!summary.all_passed());
    }
}
