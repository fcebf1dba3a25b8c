#![cfg(windows)]

use rascred::{set_credentials, RasError};

// Talks to the live RAS subsystem. An entry this unlikely to exist makes
// rasapi32 report a phonebook failure without touching any stored
// credentials.
#[test]
fn unknown_entry_reports_a_platform_error() {
  simple_logger::SimpleLogger::new().init().ok();
  let result = set_credentials(
    "rascred test entry that should not exist",
    None,
    "user",
    "pass",
  );
  match result {
    Err(RasError::Platform { code, .. }) => assert_ne!(code, 0),
    Err(RasError::PermissionDenied) => {}
    other => panic!("expected a platform error, got {other:?}"),
  }
}
