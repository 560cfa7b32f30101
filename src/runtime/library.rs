//! The owned library object.

use super::native_fn::NativeFn;
use super::symbols::{annotate, AnnotatedSymbolTable, SymbolSource};
use crate::descriptor::{BindingRegistry, RegistryError};
use crate::errors::{Error, Result, ResultExt};
use crate::header::{embedded_table, SignatureTable};
use crate::protocol::{DwfError, DwfParam, ErrorCode, LAST_ERROR_MSG_FAILED, RESULT_SUCCESS};
use libloading::Library;
use serde::{Deserialize, Serialize};
use std::ffi::{c_char, CStr};
use std::path::PathBuf;

type GetLastErrorFn = unsafe extern "C" fn(*mut i32) -> i32;
type GetLastErrorMsgFn = unsafe extern "C" fn(*mut c_char) -> i32;
type GetVersionFn = unsafe extern "C" fn(*mut c_char) -> i32;
type ParamSetFn = unsafe extern "C" fn(i32, i32) -> i32;
type ParamGetFn = unsafe extern "C" fn(i32, *mut i32) -> i32;

/// Where to find the native library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Explicit path; the platform default when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LibraryConfig {
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_library_path()))
    }
}

/// The name or path the vendor installs the library under.
#[must_use]
pub fn default_library_path() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "dwf.dll"
    }
    #[cfg(target_os = "macos")]
    {
        "/Library/Frameworks/dwf.framework/dwf"
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        "libdwf.so"
    }
}

/// The loaded native library and its annotated symbols.
///
/// Every call goes through a symbol whose ABI signature was checked against
/// the header, and every failed call is turned into a [`DwfError`] through
/// the library's last-error queries.
pub struct DwfLibrary {
    symbols: AnnotatedSymbolTable,
    // Keeps the symbol addresses valid; `None` for static symbol sources.
    library: Option<Library>,
}

impl std::fmt::Debug for DwfLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DwfLibrary")
            .field("symbols", &self.symbols.len())
            .field("dynamic", &self.library.is_some())
            .finish()
    }
}

impl DwfLibrary {
    /// Open the native library and annotate the embedded signature table.
    pub fn load(config: &LibraryConfig) -> Result<Self> {
        let path = config.resolved_path();
        // SAFETY: loading runs the library's initializers; the vendor library
        // has no initialization requirements beyond being loaded once.
        let library = unsafe { Library::new(&path) }.map_err(|source| Error::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        let table = embedded_table().context("Embedded signature artifact is invalid")?;
        let symbols = annotate(&library, table, &mut BindingRegistry::new())
            .context(format!("Cannot annotate symbols of {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            symbols = symbols.len(),
            declared = table.len(),
            "Loaded native library"
        );

        Ok(Self {
            symbols,
            library: Some(library),
        })
    }

    /// Annotate `table` against any symbol source. The source's addresses
    /// must stay valid for the lifetime of the returned value.
    pub fn with_source<S: SymbolSource + ?Sized>(
        source: &S,
        table: &SignatureTable,
    ) -> std::result::Result<Self, RegistryError> {
        Ok(Self {
            symbols: annotate(source, table, &mut BindingRegistry::new())?,
            library: None,
        })
    }

    #[must_use]
    pub fn symbols(&self) -> &AnnotatedSymbolTable {
        &self.symbols
    }

    /// The function `name`, typed as `F`.
    pub fn function<F: NativeFn>(&self, name: &str) -> std::result::Result<F, DwfError> {
        self.symbols
            .get(name)
            .ok_or_else(|| DwfError::Unbound {
                function: name.to_string(),
            })?
            .bind::<F>()
    }

    /// Bind `name` as `F`, invoke it through `invoke`, and check the result.
    pub fn call<F: NativeFn>(
        &self,
        name: &str,
        invoke: impl FnOnce(F) -> i32,
    ) -> std::result::Result<(), DwfError> {
        let function = self.function::<F>(name)?;
        self.check(invoke(function))
    }

    /// Map a native result to `Ok` on the success sentinel, else to the
    /// library's last error.
    pub fn check(&self, result: i32) -> std::result::Result<(), DwfError> {
        if result == RESULT_SUCCESS {
            Ok(())
        } else {
            Err(self.last_error())
        }
    }

    /// The error describing the most recent failed call.
    ///
    /// Never goes through [`DwfLibrary::check`]: a failing error query ends
    /// in a meta-failure message instead of another query.
    #[must_use]
    pub fn last_error(&self) -> DwfError {
        match self.query_last_error_code() {
            None => DwfError::last_error_unavailable(),
            Some(raw) => DwfError::from_last_error(raw, self.query_last_error_message()),
        }
    }

    pub fn last_error_code(&self) -> std::result::Result<ErrorCode, DwfError> {
        let raw = self
            .query_last_error_code()
            .ok_or_else(DwfError::last_error_unavailable)?;
        Ok(ErrorCode::from_raw(raw)?)
    }

    pub fn last_error_message(&self) -> std::result::Result<String, DwfError> {
        self.query_last_error_message()
            .ok_or_else(|| DwfError::NativeCall {
                code: None,
                message: LAST_ERROR_MSG_FAILED.to_string(),
            })
    }

    /// The library version string, e.g. `3.14.3`.
    pub fn version(&self) -> std::result::Result<String, DwfError> {
        let mut buffer = vec![0u8; self.output_buffer_len("FDwfGetVersion", 0)?];
        self.call::<GetVersionFn>("FDwfGetVersion", |get_version| {
            // SAFETY: the buffer has the length the header declares.
            unsafe { get_version(buffer.as_mut_ptr().cast()) }
        })?;
        Ok(string_from_buffer(&buffer))
    }

    pub fn param_set(&self, param: DwfParam, value: i32) -> std::result::Result<(), DwfError> {
        self.call::<ParamSetFn>("FDwfParamSet", |param_set| {
            // SAFETY: by-value arguments only.
            unsafe { param_set(param.raw(), value) }
        })
    }

    pub fn param_get(&self, param: DwfParam) -> std::result::Result<i32, DwfError> {
        let mut value = 0;
        self.call::<ParamGetFn>("FDwfParamGet", |param_get| {
            // SAFETY: `value` outlives the call.
            unsafe { param_get(param.raw(), &mut value) }
        })?;
        Ok(value)
    }

    /// Annotated length of the fixed-size buffer parameter `index` of
    /// `function`, for sizing output buffers.
    pub fn output_buffer_len(
        &self,
        function: &str,
        index: usize,
    ) -> std::result::Result<usize, DwfError> {
        self.symbols
            .get(function)
            .ok_or_else(|| DwfError::Unbound {
                function: function.to_string(),
            })?
            .buffer_len(index)
    }

    fn query_last_error_code(&self) -> Option<i32> {
        let get_last_error = self.function::<GetLastErrorFn>("FDwfGetLastError").ok()?;
        let mut code = 0;
        // SAFETY: `code` outlives the call.
        let result = unsafe { get_last_error(&mut code) };
        (result == RESULT_SUCCESS).then_some(code)
    }

    fn query_last_error_message(&self) -> Option<String> {
        let get_message = self
            .function::<GetLastErrorMsgFn>("FDwfGetLastErrorMsg")
            .ok()?;
        let mut buffer = vec![0u8; self.output_buffer_len("FDwfGetLastErrorMsg", 0).ok()?];
        // SAFETY: the buffer has the length the header declares.
        let result = unsafe { get_message(buffer.as_mut_ptr().cast()) };
        (result == RESULT_SUCCESS).then(|| string_from_buffer(&buffer))
    }
}

/// Text up to the first NUL, or the whole buffer when there is none.
fn string_from_buffer(buffer: &[u8]) -> String {
    match CStr::from_bytes_until_nul(buffer) {
        Ok(text) => text.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(buffer).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_wins() {
        let config = LibraryConfig {
            path: Some(PathBuf::from("/opt/digilent/libdwf.so.3")),
        };
        assert_eq!(
            config.resolved_path(),
            PathBuf::from("/opt/digilent/libdwf.so.3")
        );
    }

    #[test]
    fn test_platform_default_path() {
        let path = LibraryConfig::default().resolved_path();
        #[cfg(target_os = "windows")]
        assert_eq!(path, PathBuf::from("dwf.dll"));
        #[cfg(target_os = "macos")]
        assert_eq!(path, PathBuf::from("/Library/Frameworks/dwf.framework/dwf"));
        #[cfg(target_os = "linux")]
        assert_eq!(path, PathBuf::from("libdwf.so"));
    }

    #[test]
    fn test_string_from_buffer() {
        assert_eq!(string_from_buffer(b"3.14.3\0\0\0"), "3.14.3");
        assert_eq!(string_from_buffer(b"abc"), "abc");
    }

    #[test]
    fn test_load_missing_library_is_an_error() {
        let config = LibraryConfig {
            path: Some(PathBuf::from("/nonexistent/libdwf.so")),
        };
        assert!(matches!(
            DwfLibrary::load(&config),
            Err(Error::LibraryLoad { .. })
        ));
    }
}
