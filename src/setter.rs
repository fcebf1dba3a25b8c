//! The credential-set operation: build, marshal, call, interpret, release.

use crate::api::{AccessDeniedPolicy, RasApi, ERROR_STRING_CAPACITY};
use crate::buffer::ScopedBuffer;
use crate::record::{Credentials, RASCREDENTIALSW, RASCREDENTIALSW_SIZE};
use crate::{EntryName, RasError, DWORD, WCHAR};

/// The operation was successful.
pub const SUCCESS: DWORD = 0;
/// The caller lacked the permissions to perform the requested action.
pub const ERROR_ACCESS_DENIED: DWORD = 5;

/// Sets (or clears) the stored credentials of `entry_name` through `api`.
///
/// Returns `Ok(true)` on success; the entry's persisted credential store
/// is the only thing mutated. `Ok(false)` is produced only when the
/// platform denies access and `on_access_denied` is
/// [`AccessDeniedPolicy::ReturnFalse`]. Every other nonzero status is
/// terminal for the call: there is no retry, and the platform applies the
/// record atomically or not at all.
pub fn apply_credentials<A: RasApi>(
  api: &mut A,
  entry_name: &EntryName,
  credentials: &Credentials,
  clear: bool,
  on_access_denied: AccessDeniedPolicy,
) -> Result<bool, RasError> {
  let record = credentials.encode();
  let mut buffer = ScopedBuffer::for_value::<RASCREDENTIALSW>().map_err(|_| {
    RasError::OutOfMemory {
      requested: RASCREDENTIALSW_SIZE,
    }
  })?;
  buffer.as_mut_slice().copy_from_slice(record.as_bytes());
  let status = api.ras_set_credentials(entry_name, buffer.as_slice(), clear);
  // buffer is released by Drop at end of scope.
  match status {
    SUCCESS => {
      log::debug!("stored credentials updated for entry {entry_name}");
      Ok(true)
    }
    ERROR_ACCESS_DENIED => {
      log::error!("access denied updating credentials for entry {entry_name}");
      match on_access_denied {
        AccessDeniedPolicy::Fail => Err(RasError::PermissionDenied),
        AccessDeniedPolicy::ReturnFalse => Ok(false),
      }
    }
    code => {
      let error = resolve_platform_error(api, code);
      log::error!("failed to update credentials for entry {entry_name}: {error}");
      Err(error)
    }
  }
}

/// Best-effort translation of a nonzero status into a message. The lookup
/// gets a fixed 512-WCHAR scratch buffer and its result is cut at the
/// first terminator; a missing or failing lookup falls back to a generic
/// string carrying the raw code.
fn resolve_platform_error<A: RasApi>(api: &mut A, code: DWORD) -> RasError {
  let mut buffer = [0 as WCHAR; ERROR_STRING_CAPACITY];
  if api.ras_get_error_string(code, &mut buffer) == Some(SUCCESS) {
    let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    if end != 0 {
      return RasError::Platform {
        code,
        message: String::from_utf16_lossy(&buffer[..end]),
      };
    }
  }
  RasError::Platform {
    code,
    message: format!("RAS error code: {code}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::buffer;

  struct CountingRas {
    calls: usize,
  }

  impl RasApi for CountingRas {
    fn ras_set_credentials(
      &mut self,
      _entry_name: &EntryName,
      _credentials: &[u8],
      _clear: bool,
    ) -> DWORD {
      self.calls += 1;
      SUCCESS
    }

    fn ras_get_error_string(&mut self, _error_code: DWORD, _buffer: &mut [WCHAR]) -> Option<DWORD> {
      None
    }
  }

  #[test]
  fn allocation_failure_aborts_before_the_platform_call() {
    let _guard = buffer::ALLOCATION_TEST_LOCK.lock().unwrap();
    let before = buffer::live_allocations();
    let mut ras = CountingRas { calls: 0 };
    let entry_name = EntryName::new("Corp VPN").unwrap();
    let credentials = Credentials::new("alice", "s3cr3t", None).unwrap();
    buffer::fail_next_allocation();
    let outcome = apply_credentials(
      &mut ras,
      &entry_name,
      &credentials,
      false,
      AccessDeniedPolicy::Fail,
    );
    assert_eq!(
      outcome,
      Err(RasError::OutOfMemory {
        requested: RASCREDENTIALSW_SIZE
      })
    );
    assert_eq!(ras.calls, 0);
    assert_eq!(buffer::live_allocations(), before);
  }
}
