// Shared proptest configuration for domain property tests.

pub fn proptest_config() -> proptest::test_runner::Config {
    proptest::test_runner::Config {
        cases: 256,
        ..proptest::test_runner::Config::default()
    }
}
