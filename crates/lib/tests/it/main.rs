/*! Integration tests for couchsync.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * Every test talks to an in-process mock of the CouchDB admin API
 * (see `helpers::MockCouch`). The module structure mirrors the library:
 * - client: Tests for the HTTP transport client
 * - connector: Tests for the database, role and user synchronizers
 * - traversal: End-to-end tests of a full synchronization cycle
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("couchsync=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}
