//! Typed outcomes of the credential-set operation.

use crate::record::CredentialsError;
use crate::{EntryNameError, DWORD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasError {
  /// The entry name failed validation; no platform call was made.
  InvalidEntryName(EntryNameError),
  /// A credential field failed validation; no platform call was made.
  InvalidCredentials(CredentialsError),
  /// The unmanaged record buffer could not be acquired; no partial call
  /// was attempted.
  OutOfMemory { requested: usize },
  /// The platform returned ERROR_ACCESS_DENIED. No message lookup is
  /// performed for this code.
  PermissionDenied,
  /// Any other nonzero platform status, with a best-effort message from
  /// `RasGetErrorStringW`.
  Platform { code: DWORD, message: String },
}

impl RasError {
  /// The platform status code, where one exists.
  pub fn code(&self) -> Option<DWORD> {
    match self {
      Self::PermissionDenied => Some(crate::setter::ERROR_ACCESS_DENIED),
      Self::Platform { code, .. } => Some(*code),
      _ => None,
    }
  }
}

impl std::fmt::Display for RasError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::InvalidEntryName(err) => write!(f, "{err}"),
      Self::InvalidCredentials(err) => write!(f, "{err}"),
      Self::OutOfMemory { requested } => {
        write!(f, "Failed to allocate {requested} bytes for the credential record")
      }
      Self::PermissionDenied => f.write_str("Access to the phonebook entry was denied (error 5)"),
      Self::Platform { code, message } => write!(f, "{message} (error {code})"),
    }
  }
}

impl std::error::Error for RasError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::InvalidEntryName(err) => Some(err),
      Self::InvalidCredentials(err) => Some(err),
      _ => None,
    }
  }
}

impl From<EntryNameError> for RasError {
  fn from(err: EntryNameError) -> Self {
    Self::InvalidEntryName(err)
  }
}

impl From<CredentialsError> for RasError {
  fn from(err: CredentialsError) -> Self {
    Self::InvalidCredentials(err)
  }
}
