//! Runtime-loaded TileDB-VCF shared library
//!
//! Opens libtiledbvcf with `libloading`, resolves the C entry points once,
//! and wraps every unsafe call in a method that copies library-owned strings
//! into owned `String`s before returning.
//!
//! # Invariants
//!
//! 1. Resolved function pointers never outlive the `Library` they came from
//!    (both live in the same `VcfLibrary`).
//! 2. Error objects obtained from the library are released before the call
//!    that fetched them returns.
//! 3. The process-wide instance is loaded at most once and never unloaded.

use libloading::Library;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config::LibraryConfig;
use crate::error::VcfError;
use crate::handles::{ReaderHandle, WriterHandle};
use crate::sys::{self, tiledb_vcf_error_t, TILEDB_VCF_OK};

/// An opened libtiledbvcf with its entry points resolved
pub struct VcfLibrary {
    path: PathBuf,
    version: sys::VersionFn,
    reader_get_last_error: sys::ReaderGetLastErrorFn,
    writer_get_last_error: sys::WriterGetLastErrorFn,
    error_get_message: sys::ErrorGetMessageFn,
    error_free: Option<sys::ErrorFreeFn>,
    _library: Library,
}

impl std::fmt::Debug for VcfLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VcfLibrary")
            .field("path", &self.path)
            .field("has_error_free", &self.error_free.is_some())
            .finish()
    }
}

/// Resolve a required symbol as a plain function pointer.
///
/// # Safety
///
/// `T` must match the C signature of `name`.
unsafe fn resolve<T: Copy>(library: &Library, name: &[u8]) -> Result<T, VcfError> {
    library.get::<T>(name).map(|sym| *sym).map_err(|e| {
        VcfError::Load(format!(
            "missing symbol {}: {}",
            String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name)),
            e
        ))
    })
}

/// Copy a library-owned C string. Null yields `None`.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that stays valid
/// for the duration of this call.
unsafe fn copy_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

impl VcfLibrary {
    /// Open the shared library at `path` and resolve its entry points.
    ///
    /// # Errors
    ///
    /// Returns [`VcfError::Load`] if the file cannot be loaded or a required
    /// symbol is missing. `tiledb_vcf_error_free` is optional.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VcfError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening TileDB-VCF library");

        // SAFETY: loading runs the library's initializers; libtiledbvcf has
        // no unusual load-time requirements.
        let library = unsafe { Library::new(path) }
            .map_err(|e| VcfError::Load(format!("{}: {}", path.display(), e)))?;

        // SAFETY: each type alias in `sys` matches the published C header.
        unsafe {
            let version = resolve::<sys::VersionFn>(&library, sys::SYM_VERSION)?;
            let reader_get_last_error =
                resolve::<sys::ReaderGetLastErrorFn>(&library, sys::SYM_READER_GET_LAST_ERROR)?;
            let writer_get_last_error =
                resolve::<sys::WriterGetLastErrorFn>(&library, sys::SYM_WRITER_GET_LAST_ERROR)?;
            let error_get_message =
                resolve::<sys::ErrorGetMessageFn>(&library, sys::SYM_ERROR_GET_MESSAGE)?;
            let error_free = resolve::<sys::ErrorFreeFn>(&library, sys::SYM_ERROR_FREE).ok();

            Ok(Self {
                path: path.to_path_buf(),
                version,
                reader_get_last_error,
                writer_get_last_error,
                error_get_message,
                error_free,
                _library: library,
            })
        }
    }

    /// Try each candidate from `config` and return the first that opens.
    pub fn load(config: &LibraryConfig) -> Result<Self, VcfError> {
        let mut failures = Vec::new();
        for candidate in config.candidates() {
            match Self::open(&candidate) {
                Ok(library) => return Ok(library),
                Err(e) => {
                    debug!(error = %e, "candidate rejected");
                    failures.push(e.to_string());
                }
            }
        }
        Err(VcfError::Load(failures.join("; ")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version string reported by `tiledb_vcf_version`, if any.
    pub fn version(&self) -> Option<String> {
        let mut version: *const c_char = ptr::null();
        // SAFETY: `version` is a valid out-pointer; the returned string is a
        // static owned by the library.
        unsafe {
            (self.version)(&mut version);
            copy_c_str(version)
        }
    }

    /// Message of the last error recorded on `reader`, if one is retrievable.
    pub fn reader_last_error(&self, reader: ReaderHandle) -> Option<String> {
        let mut error: *mut tiledb_vcf_error_t = ptr::null_mut();
        // SAFETY: the handle is non-null and live per `ReaderHandle::from_raw`.
        let rc = unsafe { (self.reader_get_last_error)(reader.as_ptr(), &mut error) };
        if rc != TILEDB_VCF_OK {
            debug!(rc, "tiledb_vcf_reader_get_last_error failed");
            return None;
        }
        self.take_message(error)
    }

    /// Message of the last error recorded on `writer`, if one is retrievable.
    pub fn writer_last_error(&self, writer: WriterHandle) -> Option<String> {
        let mut error: *mut tiledb_vcf_error_t = ptr::null_mut();
        // SAFETY: the handle is non-null and live per `WriterHandle::from_raw`.
        let rc = unsafe { (self.writer_get_last_error)(writer.as_ptr(), &mut error) };
        if rc != TILEDB_VCF_OK {
            debug!(rc, "tiledb_vcf_writer_get_last_error failed");
            return None;
        }
        self.take_message(error)
    }

    /// Copy the message out of `error`, then release `error`.
    fn take_message(&self, mut error: *mut tiledb_vcf_error_t) -> Option<String> {
        if error.is_null() {
            debug!("library returned no error object");
            return None;
        }

        let mut message: *const c_char = ptr::null();
        // SAFETY: `error` is non-null and was just handed out by the library.
        // The message is copied before the error object is freed.
        unsafe {
            let rc = (self.error_get_message)(error, &mut message);
            let copied = if rc == TILEDB_VCF_OK {
                copy_c_str(message)
            } else {
                None
            };
            if let Some(free) = self.error_free {
                free(&mut error);
            }
            copied
        }
    }
}

static GLOBAL: OnceLock<Option<VcfLibrary>> = OnceLock::new();

/// The process-wide library, loaded on first use from [`LibraryConfig::from_env`].
///
/// Returns `None` when no candidate could be opened; the failure is logged
/// once and not retried.
pub fn global() -> Option<&'static VcfLibrary> {
    GLOBAL
        .get_or_init(|| match VcfLibrary::load(&LibraryConfig::from_env()) {
            Ok(library) => {
                debug!(path = %library.path().display(), "TileDB-VCF library loaded");
                Some(library)
            }
            Err(e) => {
                warn!(error = %e, "TileDB-VCF library unavailable");
                None
            }
        })
        .as_ref()
}


#[cfg(all(test, unix))]
mod stub_tests {
    use super::*;
    use crate::api::Binding;
    use crate::sys::{tiledb_vcf_reader_t, tiledb_vcf_writer_t, TILEDB_VCF_ERR};
    use std::cell::Cell;
    use std::ptr::NonNull;

    thread_local! {
        static FREED: Cell<usize> = Cell::new(0);
    }

    unsafe extern "C" fn version_null(out: *mut *const c_char) {
        *out = ptr::null();
    }

    unsafe extern "C" fn version_set(out: *mut *const c_char) {
        *out = b"0.38.1\0".as_ptr() as *const c_char;
    }

    unsafe extern "C" fn reader_has_error(
        _reader: *mut tiledb_vcf_reader_t,
        error: *mut *mut tiledb_vcf_error_t,
    ) -> i32 {
        *error = NonNull::dangling().as_ptr();
        TILEDB_VCF_OK
    }

    unsafe extern "C" fn reader_fails(
        _reader: *mut tiledb_vcf_reader_t,
        _error: *mut *mut tiledb_vcf_error_t,
    ) -> i32 {
        TILEDB_VCF_ERR
    }

    unsafe extern "C" fn writer_has_error(
        _writer: *mut tiledb_vcf_writer_t,
        error: *mut *mut tiledb_vcf_error_t,
    ) -> i32 {
        *error = NonNull::dangling().as_ptr();
        TILEDB_VCF_OK
    }

    unsafe extern "C" fn writer_no_error(
        _writer: *mut tiledb_vcf_writer_t,
        error: *mut *mut tiledb_vcf_error_t,
    ) -> i32 {
        *error = ptr::null_mut();
        TILEDB_VCF_OK
    }

    unsafe extern "C" fn message_disk_full(
        _error: *mut tiledb_vcf_error_t,
        message: *mut *const c_char,
    ) -> i32 {
        *message = b"disk full\0".as_ptr() as *const c_char;
        TILEDB_VCF_OK
    }

    unsafe extern "C" fn message_fails(
        _error: *mut tiledb_vcf_error_t,
        _message: *mut *const c_char,
    ) -> i32 {
        TILEDB_VCF_ERR
    }

    unsafe extern "C" fn count_free(error: *mut *mut tiledb_vcf_error_t) {
        FREED.with(|freed| freed.set(freed.get() + 1));
        *error = ptr::null_mut();
    }

    fn freed() -> usize {
        FREED.with(Cell::get)
    }

    /// Library whose entry points are the stubs above.
    fn stub_library(
        version: sys::VersionFn,
        reader_get_last_error: sys::ReaderGetLastErrorFn,
        writer_get_last_error: sys::WriterGetLastErrorFn,
        error_get_message: sys::ErrorGetMessageFn,
        error_free: Option<sys::ErrorFreeFn>,
    ) -> VcfLibrary {
        VcfLibrary {
            path: PathBuf::from("stub"),
            version,
            reader_get_last_error,
            writer_get_last_error,
            error_get_message,
            error_free,
            _library: libloading::os::unix::Library::this().into(),
        }
    }

    fn reader() -> ReaderHandle {
        unsafe { ReaderHandle::from_raw(NonNull::dangling().as_ptr()) }.unwrap()
    }

    fn writer() -> WriterHandle {
        unsafe { WriterHandle::from_raw(NonNull::dangling().as_ptr()) }.unwrap()
    }

    #[test]
    fn test_null_version_is_unknown_and_unavailable() {
        let library = stub_library(
            version_null,
            reader_has_error,
            writer_has_error,
            message_disk_full,
            Some(count_free),
        );
        assert_eq!(library.version(), None);

        let binding = Binding::new(library);
        assert_eq!(binding.version(), "unknown");
        assert!(!binding.is_available());
    }

    #[test]
    fn test_version_is_copied() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_has_error,
            message_disk_full,
            Some(count_free),
        ));
        assert_eq!(binding.version(), "0.38.1");
        assert!(binding.is_available());
        assert_eq!(binding.status().library_path, Some(PathBuf::from("stub")));
    }

    #[test]
    fn test_reader_message_copied_then_freed_once() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_has_error,
            message_disk_full,
            Some(count_free),
        ));
        let before = freed();

        let err = binding.reader_error(Some(reader()), "read");
        assert_eq!(err.to_string(), "tiledbvcf reader error in read: disk full");
        assert_eq!(freed() - before, 1);
    }

    #[test]
    fn test_writer_message_copied_then_freed_once() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_has_error,
            message_disk_full,
            Some(count_free),
        ));
        let before = freed();

        let err = binding.writer_error(Some(writer()), "store");
        assert!(err.to_string().contains("disk full"));
        assert_eq!(freed() - before, 1);
    }

    #[test]
    fn test_failed_get_last_error_uses_placeholder() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_fails,
            writer_has_error,
            message_disk_full,
            Some(count_free),
        ));
        let before = freed();

        let err = binding.reader_error(Some(reader()), "read");
        assert_eq!(err.to_string(), "tiledbvcf reader error in read: Unknown reader error");
        // No error object was handed out, so nothing is freed
        assert_eq!(freed(), before);
    }

    #[test]
    fn test_null_error_object_uses_placeholder() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_no_error,
            message_disk_full,
            Some(count_free),
        ));
        let before = freed();

        let err = binding.writer_error(Some(writer()), "store");
        assert_eq!(err.to_string(), "tiledbvcf writer error in store: Unknown writer error");
        assert_eq!(freed(), before);
    }

    #[test]
    fn test_failed_get_message_uses_placeholder_and_still_frees() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_has_error,
            message_fails,
            Some(count_free),
        ));
        let before = freed();

        let err = binding.reader_error(Some(reader()), "read");
        assert!(err.to_string().contains("Unknown reader error"));
        assert_eq!(freed() - before, 1);
    }

    #[test]
    fn test_missing_error_free_is_tolerated() {
        let binding = Binding::new(stub_library(
            version_set,
            reader_has_error,
            writer_has_error,
            message_disk_full,
            None,
        ));
        let before = freed();

        let err = binding.check_reader(Some(reader()), TILEDB_VCF_ERR, "read").unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert_eq!(freed(), before);
    }
}
