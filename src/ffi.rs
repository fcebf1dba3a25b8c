//! rasapi32 bindings and the production [`RasApi`] implementation.
//!
//! winapi does not cover rasapi32, so the import is declared by hand and
//! linked from build.rs. `RasGetErrorStringW` is resolved dynamically:
//! platform configurations that lack the symbol degrade to the generic
//! fallback message instead of failing at load time.

use std::ptr::null;

use cutils::{cstr, widecstr};
use winapi::shared::minwindef::{BOOL, DWORD, FALSE, TRUE, UINT};
use winapi::shared::ntdef::{LPCWSTR, LPWSTR};
use winapi::um::libloaderapi::{GetModuleHandleW, GetProcAddress};

use crate::api::{AccessDeniedPolicy, RasApi};
use crate::record::{Credentials, RASCREDENTIALSW, RASCREDENTIALSW_SIZE};
use crate::setter::apply_credentials;
use crate::{EntryName, RasError, WCHAR};

extern "system" {
  fn RasSetCredentialsW(
    lpszPhonebook: LPCWSTR,
    lpszEntryName: LPCWSTR,
    lpCredentials: *mut RASCREDENTIALSW,
    fClearCredentials: BOOL,
  ) -> DWORD;
}

type RasGetErrorStringWFn =
  unsafe extern "system" fn(uErrorValue: UINT, lpszErrorString: LPWSTR, cBufSize: DWORD) -> DWORD;

fn ras_get_error_string_w() -> Option<RasGetErrorStringWFn> {
  // rasapi32 is a static import of this crate, so the module handle cannot
  // disappear underneath us.
  let rasapi32 = unsafe { GetModuleHandleW(widecstr!("rasapi32.dll").as_ptr()) };
  if rasapi32.is_null() {
    return None;
  }
  let lookup = unsafe { GetProcAddress(rasapi32, cstr!("RasGetErrorStringW").as_ptr().cast()) };
  if lookup.is_null() {
    return None;
  }
  Some(unsafe { std::mem::transmute(lookup) })
}

/// Talks to the live RAS subsystem through rasapi32.
pub struct SystemRas;

impl RasApi for SystemRas {
  fn ras_set_credentials(
    &mut self,
    entry_name: &EntryName,
    credentials: &[u8],
    clear: bool,
  ) -> DWORD {
    debug_assert_eq!(credentials.len(), RASCREDENTIALSW_SIZE);
    let entry_name: Vec<u16> = entry_name
      .as_str()
      .encode_utf16()
      .chain(std::iter::once(0))
      .collect();
    // Null phonebook path selects the default system phonebook.
    unsafe {
      RasSetCredentialsW(
        null(),
        entry_name.as_ptr(),
        credentials.as_ptr() as *mut RASCREDENTIALSW,
        if clear { TRUE } else { FALSE },
      )
    }
  }

  fn ras_get_error_string(&mut self, error_code: DWORD, buffer: &mut [WCHAR]) -> Option<DWORD> {
    let lookup = ras_get_error_string_w()?;
    Some(unsafe { lookup(error_code, buffer.as_mut_ptr(), buffer.len() as DWORD) })
  }
}

/// Sets the stored credentials of `entry_name` in the default system
/// phonebook. Access denied surfaces as [`RasError::PermissionDenied`].
pub fn set_credentials(
  entry_name: &str,
  domain: Option<&str>,
  user_name: &str,
  password: &str,
) -> Result<(), RasError> {
  let entry_name = EntryName::new(entry_name)?;
  let credentials = Credentials::new(user_name, password, domain)?;
  apply_credentials(
    &mut SystemRas,
    &entry_name,
    &credentials,
    false,
    AccessDeniedPolicy::Fail,
  )
  .map(|_| ())
}

/// Like [`set_credentials`], but reports access denied as `Ok(false)`
/// instead of an error.
pub fn try_set_credentials(
  entry_name: &str,
  domain: Option<&str>,
  user_name: &str,
  password: &str,
) -> Result<bool, RasError> {
  let entry_name = EntryName::new(entry_name)?;
  let credentials = Credentials::new(user_name, password, domain)?;
  apply_credentials(
    &mut SystemRas,
    &entry_name,
    &credentials,
    false,
    AccessDeniedPolicy::ReturnFalse,
  )
}

/// Clears the stored user name, password and domain of `entry_name` by
/// transmitting an empty record with the clear flag raised.
pub fn clear_credentials(entry_name: &str) -> Result<(), RasError> {
  let entry_name = EntryName::new(entry_name)?;
  apply_credentials(
    &mut SystemRas,
    &entry_name,
    &Credentials::empty(),
    true,
    AccessDeniedPolicy::Fail,
  )
  .map(|_| ())
}
