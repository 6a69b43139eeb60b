//! Python-callable entry points
//!
//! Registered on the extension module under the same names the C API uses.
//!
//! # Example (from Python)
//!
//! ```python
//! from tiledbvcf_binding_rs import tiledb_vcf_available, tiledb_vcf_version
//!
//! if tiledb_vcf_available():
//!     print(f"TileDB-VCF {tiledb_vcf_version()}")
//! ```

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::api;

/// Get the TileDB-VCF version string.
///
/// Returns "unknown" when the library reports no version.
#[pyfunction]
#[pyo3(name = "tiledb_vcf_version")]
pub fn py_tiledb_vcf_version() -> String {
    api::get_version()
}

/// Check whether the TileDB-VCF library is available.
///
/// True iff the library can be loaded and reports a version.
#[pyfunction]
#[pyo3(name = "tiledb_vcf_available")]
pub fn py_tiledb_vcf_available() -> bool {
    api::is_available()
}

/// Get a JSON status snapshot of the library.
///
/// Returns a JSON string:
/// `{"available": bool, "version": "...", "library_path": "..." | null}`
#[pyfunction]
#[pyo3(name = "tiledb_vcf_status")]
pub fn py_tiledb_vcf_status() -> PyResult<String> {
    serde_json::to_string(&api::status()).map_err(|e| {
        PyErr::new::<PyRuntimeError, _>(format!("Failed to serialize status: {}", e))
    })
}
