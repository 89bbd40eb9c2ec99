//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Machines without the cluster prerequisites skip these suites. Setting
//! `REQUIRE_TEST_CLUSTER` to a truthy value turns setup failures into test
//! failures so CI cannot quietly lose coverage.

/// Truthy values are `1`, `true` and `yes`, in any case.
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure and return `None` so the caller skips.
///
/// # Panics
/// Panics when `REQUIRE_TEST_CLUSTER` is truthy.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("test cluster setup failed: {reason}; unset REQUIRE_TEST_CLUSTER to skip");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
