//! Raw TileDB-VCF C API declarations
//!
//! Mirrors the subset of `tiledbvcf/tiledbvcf.h` this crate consumes. The
//! functions are resolved at runtime by symbol name (see [`crate::library`]),
//! so only their signatures are declared here.

#![allow(non_camel_case_types)]

use std::os::raw::c_char;

/// Status code returned by TileDB-VCF on success.
pub const TILEDB_VCF_OK: i32 = 0;

/// Status code returned by TileDB-VCF on failure.
pub const TILEDB_VCF_ERR: i32 = -1;

/// Opaque reader handle (`tiledb_vcf_reader_t`).
#[repr(C)]
pub struct tiledb_vcf_reader_t {
    _private: [u8; 0],
}

/// Opaque writer handle (`tiledb_vcf_writer_t`).
#[repr(C)]
pub struct tiledb_vcf_writer_t {
    _private: [u8; 0],
}

/// Opaque error handle (`tiledb_vcf_error_t`).
#[repr(C)]
pub struct tiledb_vcf_error_t {
    _private: [u8; 0],
}

/// `void tiledb_vcf_version(const char** version)`
pub type VersionFn = unsafe extern "C" fn(version: *mut *const c_char);

/// `int32_t tiledb_vcf_reader_get_last_error(tiledb_vcf_reader_t*, tiledb_vcf_error_t**)`
pub type ReaderGetLastErrorFn = unsafe extern "C" fn(
    reader: *mut tiledb_vcf_reader_t,
    error: *mut *mut tiledb_vcf_error_t,
) -> i32;

/// `int32_t tiledb_vcf_writer_get_last_error(tiledb_vcf_writer_t*, tiledb_vcf_error_t**)`
pub type WriterGetLastErrorFn = unsafe extern "C" fn(
    writer: *mut tiledb_vcf_writer_t,
    error: *mut *mut tiledb_vcf_error_t,
) -> i32;

/// `int32_t tiledb_vcf_error_get_message(tiledb_vcf_error_t*, const char**)`
pub type ErrorGetMessageFn =
    unsafe extern "C" fn(error: *mut tiledb_vcf_error_t, message: *mut *const c_char) -> i32;

/// `void tiledb_vcf_error_free(tiledb_vcf_error_t**)`
pub type ErrorFreeFn = unsafe extern "C" fn(error: *mut *mut tiledb_vcf_error_t);

pub const SYM_VERSION: &[u8] = b"tiledb_vcf_version\0";
pub const SYM_READER_GET_LAST_ERROR: &[u8] = b"tiledb_vcf_reader_get_last_error\0";
pub const SYM_WRITER_GET_LAST_ERROR: &[u8] = b"tiledb_vcf_writer_get_last_error\0";
pub const SYM_ERROR_GET_MESSAGE: &[u8] = b"tiledb_vcf_error_get_message\0";
pub const SYM_ERROR_FREE: &[u8] = b"tiledb_vcf_error_free\0";
