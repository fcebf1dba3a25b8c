//! Stored-credential management for Windows RAS phonebook entries.
//!
//! The crate builds the fixed-layout `RASCREDENTIALSW` record, hands it to
//! rasapi32's `RasSetCredentialsW` and maps the numeric status code to a
//! typed outcome. The platform boundary sits behind the [`RasApi`] trait,
//! so the whole operation can be exercised without a live RAS subsystem;
//! the production implementation is `SystemRas`.

#[cfg(windows)]
pub use winapi::shared::minwindef::DWORD;
#[cfg(not(windows))]
pub type DWORD = u32;
#[cfg(windows)]
pub use winapi::shared::ntdef::WCHAR;
#[cfg(not(windows))]
pub type WCHAR = u16;

mod api;
mod buffer;
mod error;
#[cfg(windows)]
mod ffi;
mod record;
mod setter;

pub use api::{AccessDeniedPolicy, RasApi, ERROR_STRING_CAPACITY};
pub use buffer::ScopedBuffer;
pub use error::RasError;
#[cfg(windows)]
pub use ffi::{clear_credentials, set_credentials, try_set_credentials, SystemRas};
pub use record::{
  CredentialField, Credentials, CredentialsError, DNLEN, PWLEN, RASCM_DOMAIN, RASCM_PASSWORD,
  RASCM_USER_NAME, RASCREDENTIALSW, RASCREDENTIALSW_SIZE, UNLEN,
};
#[cfg(any(feature = "windows7", feature = "windows10"))]
pub use record::{
  RASCM_DDM_PRE_SHARED_KEY, RASCM_DEFAULT_CREDS, RASCM_PRE_SHARED_KEY, RASCM_SERVER_PRE_SHARED_KEY,
};
pub use setter::{apply_credentials, ERROR_ACCESS_DENIED, SUCCESS};

/// Maximum length of a phonebook entry name, in UTF-16 code units.
pub const RAS_MAX_ENTRY_NAME: usize = 256;

/// Name of an existing phonebook entry, validated before any platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName(String);

impl EntryName {
  pub fn new(value: impl Into<String>) -> Result<Self, EntryNameError> {
    let value = value.into();
    if value.is_empty() {
      return Err(EntryNameError::Empty);
    }
    if value.encode_utf16().count() > RAS_MAX_ENTRY_NAME {
      return Err(EntryNameError::TooLong);
    }
    Ok(Self(value))
  }
  pub fn as_str(&self) -> &str {
    &self.0
  }
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl std::fmt::Display for EntryName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryNameError {
  Empty,
  TooLong,
}

impl std::fmt::Display for EntryNameError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Empty => "Phonebook entry name can not be empty",
      Self::TooLong => "Phonebook entry name is too long (consider RAS_MAX_ENTRY_NAME)",
    })
  }
}

impl std::error::Error for EntryNameError {}

impl TryFrom<&str> for EntryName {
  type Error = EntryNameError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl TryFrom<String> for EntryName {
  type Error = EntryNameError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entry_name_rejects_empty() {
    assert_eq!(EntryName::new(""), Err(EntryNameError::Empty));
  }

  #[test]
  fn entry_name_length_counts_utf16_units() {
    assert!(EntryName::new("a".repeat(RAS_MAX_ENTRY_NAME)).is_ok());
    assert_eq!(
      EntryName::new("a".repeat(RAS_MAX_ENTRY_NAME + 1)),
      Err(EntryNameError::TooLong)
    );
    // Each crab is a surrogate pair, so 129 of them exceed the limit.
    assert_eq!(
      EntryName::new("\u{1F980}".repeat(129)),
      Err(EntryNameError::TooLong)
    );
  }

  #[test]
  fn entry_name_round_trips() {
    let name = EntryName::new("Corp VPN").unwrap();
    assert_eq!(name.as_str(), "Corp VPN");
    assert_eq!(name.to_string(), "Corp VPN");
    assert_eq!(name.into_inner(), "Corp VPN");
  }
}
