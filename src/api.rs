//! The seam between the credential-set operation and the RAS entry points.

use crate::{EntryName, DWORD, WCHAR};

/// Capacity, in WCHARs, of the scratch buffer handed to the error-string
/// lookup.
pub const ERROR_STRING_CAPACITY: usize = 512;

/// The two rasapi32 entry points the operation touches. The production
/// implementation is `SystemRas`; tests drive the operation through a
/// recording stub.
pub trait RasApi {
  /// `RasSetCredentialsW` against the default system phonebook.
  /// `credentials` is the marshaled record; the raw platform status code
  /// is returned as-is.
  fn ras_set_credentials(&mut self, entry_name: &EntryName, credentials: &[u8], clear: bool)
    -> DWORD;

  /// `RasGetErrorStringW`. Fills `buffer` with a null-terminated message
  /// and returns the lookup's own status code. `None` means the entry
  /// point is unavailable on this platform; callers must fall back to a
  /// generic message.
  fn ras_get_error_string(&mut self, error_code: DWORD, buffer: &mut [WCHAR]) -> Option<DWORD>;
}

/// What the operation reports when the platform denies access. The two
/// behaviors correspond to the throwing and the boolean call variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessDeniedPolicy {
  /// Surface `RasError::PermissionDenied`.
  #[default]
  Fail,
  /// Report `Ok(false)` instead of an error.
  ReturnFalse,
}
