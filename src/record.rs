//! Wire layout of the RAS credential record and its safe construction.
//!
//! `RASCREDENTIALSW` mirrors the rasapi32 structure byte for byte: two
//! DWORDs followed by three fixed-width, null-padded UTF-16 text fields.
//! A fresh record is built for every call and `dwSize` is computed from
//! the layout at encode time, never hardcoded.

use crate::{DWORD, WCHAR};

/// Maximum length of a user name, in UTF-16 code units.
pub const UNLEN: usize = 256;
/// Maximum length of a password, in UTF-16 code units.
pub const PWLEN: usize = 256;
/// Maximum length of a domain name, in UTF-16 code units.
pub const DNLEN: usize = 15;

/// The user name member is valid.
pub const RASCM_USER_NAME: DWORD = 0x1;
/// The password member is valid.
pub const RASCM_PASSWORD: DWORD = 0x2;
/// The domain member is valid.
pub const RASCM_DOMAIN: DWORD = 0x4;
/// The credentials are the default credentials of an all-user connection.
#[cfg(any(feature = "windows7", feature = "windows10"))]
pub const RASCM_DEFAULT_CREDS: DWORD = 0x8;
/// A pre-shared key should be retrieved.
#[cfg(any(feature = "windows7", feature = "windows10"))]
pub const RASCM_PRE_SHARED_KEY: DWORD = 0x10;
/// Sets the pre-shared key on the remote access server.
#[cfg(any(feature = "windows7", feature = "windows10"))]
pub const RASCM_SERVER_PRE_SHARED_KEY: DWORD = 0x20;
/// Sets the pre-shared key of a demand dial interface.
#[cfg(any(feature = "windows7", feature = "windows10"))]
pub const RASCM_DDM_PRE_SHARED_KEY: DWORD = 0x40;

/// User credentials associated with a phonebook entry, in the exact shape
/// rasapi32 expects.
#[repr(C)]
#[allow(non_snake_case)]
#[derive(Clone, Copy)]
pub struct RASCREDENTIALSW {
  pub dwSize: DWORD,
  pub dwMask: DWORD,
  pub szUserName: [WCHAR; UNLEN + 1],
  pub szPassword: [WCHAR; PWLEN + 1],
  pub szDomain: [WCHAR; DNLEN + 1],
}

pub const RASCREDENTIALSW_SIZE: usize = std::mem::size_of::<RASCREDENTIALSW>();

// Two DWORDs plus three null-terminated WCHAR arrays, densely packed. The
// OS rejects the call if dwSize disagrees with this layout.
const _: () =
  assert!(RASCREDENTIALSW_SIZE == 2 * 4 + 2 * ((UNLEN + 1) + (PWLEN + 1) + (DNLEN + 1)));

impl RASCREDENTIALSW {
  /// The exact bytes transmitted to the platform. The layout assert above
  /// guarantees the struct carries no padding.
  pub fn as_bytes(&self) -> &[u8] {
    unsafe { std::slice::from_raw_parts((self as *const Self).cast(), RASCREDENTIALSW_SIZE) }
  }

  /// Reads a record back from its serialized form. `None` unless `bytes`
  /// is exactly one record long.
  pub fn read(bytes: &[u8]) -> Option<Self> {
    if bytes.len() != RASCREDENTIALSW_SIZE {
      return None;
    }
    Some(unsafe { std::ptr::read_unaligned(bytes.as_ptr().cast()) })
  }

  pub fn user_name(&self) -> String {
    read_field(&self.szUserName)
  }
  pub fn password(&self) -> String {
    read_field(&self.szPassword)
  }
  pub fn domain(&self) -> String {
    read_field(&self.szDomain)
  }
}

/// The three text members of a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
  UserName,
  Password,
  Domain,
}

impl CredentialField {
  pub const fn max_len(self) -> usize {
    match self {
      Self::UserName => UNLEN,
      Self::Password => PWLEN,
      Self::Domain => DNLEN,
    }
  }
}

impl std::fmt::Display for CredentialField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::UserName => "user name",
      Self::Password => "password",
      Self::Domain => "domain",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
  TooLong { field: CredentialField, len: usize },
}

impl std::fmt::Display for CredentialsError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::TooLong { field, len } => write!(
        f,
        "{field} is {len} utf-16 units long (limit {})",
        field.max_len()
      ),
    }
  }
}

impl std::error::Error for CredentialsError {}

/// Validated credentials for a phonebook entry. An absent domain is
/// normalized to the empty string; the record still asserts the domain
/// flag, matching what the platform stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  user_name: String,
  password: String,
  domain: String,
}

impl Credentials {
  pub fn new(
    user_name: impl Into<String>,
    password: impl Into<String>,
    domain: Option<&str>,
  ) -> Result<Self, CredentialsError> {
    let user_name = user_name.into();
    let password = password.into();
    let domain = domain.unwrap_or_default().to_owned();
    check_len(CredentialField::UserName, &user_name)?;
    check_len(CredentialField::Password, &password)?;
    check_len(CredentialField::Domain, &domain)?;
    Ok(Self {
      user_name,
      password,
      domain,
    })
  }

  /// All-empty credentials, used when clearing an entry.
  pub fn empty() -> Self {
    Self {
      user_name: String::new(),
      password: String::new(),
      domain: String::new(),
    }
  }

  pub fn user_name(&self) -> &str {
    &self.user_name
  }
  pub fn password(&self) -> &str {
    &self.password
  }
  pub fn domain(&self) -> &str {
    &self.domain
  }

  /// Marshals into the fixed platform layout. `dwSize` is set to the
  /// exact struct size and the mask always carries all three field flags,
  /// domain included, even when the domain is empty.
  pub fn encode(&self) -> RASCREDENTIALSW {
    let mut record: RASCREDENTIALSW = unsafe { std::mem::zeroed() };
    record.dwSize = RASCREDENTIALSW_SIZE as DWORD;
    record.dwMask = RASCM_USER_NAME | RASCM_PASSWORD | RASCM_DOMAIN;
    write_field(&mut record.szUserName, &self.user_name);
    write_field(&mut record.szPassword, &self.password);
    write_field(&mut record.szDomain, &self.domain);
    record
  }
}

fn check_len(field: CredentialField, value: &str) -> Result<(), CredentialsError> {
  let len = value.encode_utf16().count();
  if len > field.max_len() {
    return Err(CredentialsError::TooLong { field, len });
  }
  Ok(())
}

// The buffer arrives zeroed, so anything past the value stays null padding.
// Validation guarantees the value fits with its terminator.
fn write_field(buffer: &mut [WCHAR], value: &str) {
  for (dst, src) in buffer.iter_mut().zip(value.encode_utf16()) {
    *dst = src;
  }
}

fn read_field(buffer: &[WCHAR]) -> String {
  let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
  String::from_utf16_lossy(&buffer[..end])
}
