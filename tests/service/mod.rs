//! Service-level integration tests that exercise concurrency.

mod allocation;
mod rename;
