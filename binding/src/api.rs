//! Binding operations
//!
//! [`VcfApi`] is the seam between this crate and libtiledbvcf: the native
//! implementation forwards to the loaded library, tests substitute their own.
//! [`Binding`] turns what the API reports into host-level values and
//! [`VcfError`]s.
//!
//! # Example
//!
//! ```rust
//! use tiledbvcf_binding_rs::{get_version, is_available};
//!
//! let version = get_version();
//! if is_available() {
//!     assert_ne!(version, "unknown");
//! } else {
//!     assert_eq!(version, "unknown");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{VcfError, UNKNOWN_READER_ERROR, UNKNOWN_WRITER_ERROR};
use crate::handles::{ReaderHandle, WriterHandle};
use crate::library::{self, VcfLibrary};
use crate::sys::TILEDB_VCF_OK;

/// Version reported when the library yields none.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Calls into the external library
///
/// Implementations return owned copies; nothing handed back may borrow
/// library state.
pub trait VcfApi {
    /// Result of `tiledb_vcf_version`; `None` for a null pointer.
    fn version(&self) -> Option<String>;

    /// Message of the last error on `reader`, if the library has one.
    fn reader_last_error(&self, reader: ReaderHandle) -> Option<String>;

    /// Message of the last error on `writer`, if the library has one.
    fn writer_last_error(&self, writer: WriterHandle) -> Option<String>;

    /// Filesystem path of the backing library, if any.
    fn library_path(&self) -> Option<PathBuf> {
        None
    }
}

impl VcfApi for VcfLibrary {
    fn version(&self) -> Option<String> {
        VcfLibrary::version(self)
    }

    fn reader_last_error(&self, reader: ReaderHandle) -> Option<String> {
        VcfLibrary::reader_last_error(self, reader)
    }

    fn writer_last_error(&self, writer: WriterHandle) -> Option<String> {
        VcfLibrary::writer_last_error(self, writer)
    }

    fn library_path(&self) -> Option<PathBuf> {
        Some(self.path().to_path_buf())
    }
}

/// The process-wide library; behaves as a null-returning API when it
/// could not be loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeApi;

impl VcfApi for NativeApi {
    fn version(&self) -> Option<String> {
        library::global().and_then(VcfLibrary::version)
    }

    fn reader_last_error(&self, reader: ReaderHandle) -> Option<String> {
        library::global().and_then(|lib| lib.reader_last_error(reader))
    }

    fn writer_last_error(&self, writer: WriterHandle) -> Option<String> {
        library::global().and_then(|lib| lib.writer_last_error(writer))
    }

    fn library_path(&self) -> Option<PathBuf> {
        library::global().map(|lib| lib.path().to_path_buf())
    }
}

/// Point-in-time view of the library, serializable for hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub available: bool,
    pub version: String,
    pub library_path: Option<PathBuf>,
}

/// Translates [`VcfApi`] results into host values and errors
#[derive(Debug, Clone, Default)]
pub struct Binding<A> {
    api: A,
}

impl<A: VcfApi> Binding<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Library version, or `"unknown"` if none is reported.
    pub fn version(&self) -> String {
        self.api
            .version()
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// True iff the library reports a version.
    ///
    /// A link check only; it says nothing about whether readers or writers
    /// will work.
    pub fn is_available(&self) -> bool {
        self.api.version().is_some()
    }

    pub fn status(&self) -> Status {
        let version = self.api.version();
        Status {
            available: version.is_some(),
            version: version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            library_path: self.api.library_path(),
        }
    }

    /// Error for a failed reader operation.
    ///
    /// Uses the reader's last recorded message, or `"Unknown reader error"`
    /// when there is no reader or no message.
    pub fn reader_error(&self, reader: Option<ReaderHandle>, function: &str) -> VcfError {
        let message = reader
            .and_then(|r| self.api.reader_last_error(r))
            .unwrap_or_else(|| UNKNOWN_READER_ERROR.to_string());
        VcfError::Reader {
            function: function.to_string(),
            message,
        }
    }

    /// Error for a failed writer operation.
    ///
    /// Uses the writer's last recorded message, or `"Unknown writer error"`
    /// when there is no writer or no message.
    pub fn writer_error(&self, writer: Option<WriterHandle>, function: &str) -> VcfError {
        let message = writer
            .and_then(|w| self.api.writer_last_error(w))
            .unwrap_or_else(|| UNKNOWN_WRITER_ERROR.to_string());
        VcfError::Writer {
            function: function.to_string(),
            message,
        }
    }

    /// `Ok(())` for `TILEDB_VCF_OK`, otherwise the reader's error.
    pub fn check_reader(
        &self,
        reader: Option<ReaderHandle>,
        rc: i32,
        function: &str,
    ) -> Result<(), VcfError> {
        if rc == TILEDB_VCF_OK {
            Ok(())
        } else {
            Err(self.reader_error(reader, function))
        }
    }

    /// `Ok(())` for `TILEDB_VCF_OK`, otherwise the writer's error.
    pub fn check_writer(
        &self,
        writer: Option<WriterHandle>,
        rc: i32,
        function: &str,
    ) -> Result<(), VcfError> {
        if rc == TILEDB_VCF_OK {
            Ok(())
        } else {
            Err(self.writer_error(writer, function))
        }
    }
}

/// Binding over the process-wide library.
pub fn native() -> Binding<NativeApi> {
    Binding::new(NativeApi)
}

/// Version of the process-wide library, or `"unknown"`.
pub fn get_version() -> String {
    native().version()
}

/// Whether the process-wide library reports a version.
pub fn is_available() -> bool {
    native().is_available()
}

/// Status snapshot of the process-wide library.
pub fn status() -> Status {
    native().status()
}
