#![allow(dead_code)]

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    test_support::logging::init();
}
