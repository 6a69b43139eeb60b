//! TileDB-VCF Bindings - Rust Layer
//!
//! Thin binding over the TileDB-VCF C API: version query, availability check
//! and translation of reader/writer last-error state into typed errors.
//!
//! # Architecture
//!
//! - **sys**: Raw C declarations (opaque handles, status codes, signatures)
//! - **config**: Where to find libtiledbvcf
//! - **library**: Runtime loading and the unsafe calls
//! - **handles**: Non-null borrowed reader/writer handles
//! - **error**: `VcfError` kinds
//! - **api**: `VcfApi` seam and the `Binding` operations
//! - **ffi**: Python extension module (feature `pyo3`)
//!
//! # Critical Invariants
//!
//! 1. External handles are never retained beyond a single call
//! 2. Every failure is surfaced immediately as an error, never a sentinel
//! 3. Version and availability queries never fail

// Module declarations
pub mod api;
pub mod config;
pub mod error;
pub mod handles;
pub mod library;
pub mod sys;

// Re-exports for convenience
pub use api::{
    get_version, is_available, native, status, Binding, NativeApi, Status, VcfApi,
    UNKNOWN_VERSION,
};
pub use config::{LibraryConfig, LIBRARY_PATH_ENV};
pub use error::{general_error, VcfError, UNKNOWN_READER_ERROR, UNKNOWN_WRITER_ERROR};
pub use handles::{check_null, ReaderHandle, WriterHandle};
pub use library::VcfLibrary;
pub use sys::{TILEDB_VCF_ERR, TILEDB_VCF_OK};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn tiledbvcf_binding_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::functions::py_tiledb_vcf_version, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::functions::py_tiledb_vcf_available, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::functions::py_tiledb_vcf_status, m)?)?;
    Ok(())
}
