//! Borrowed reader/writer handles
//!
//! The binding layer never creates or frees readers and writers; it only
//! receives them from callers and passes them back into the library. These
//! wrappers guarantee non-null and carry no ownership.

use std::ptr::NonNull;

use crate::error::VcfError;
use crate::sys::{tiledb_vcf_reader_t, tiledb_vcf_writer_t};

/// Non-null `tiledb_vcf_reader_t*` owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderHandle {
    inner: NonNull<tiledb_vcf_reader_t>,
}

/// Non-null `tiledb_vcf_writer_t*` owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterHandle {
    inner: NonNull<tiledb_vcf_writer_t>,
}

impl ReaderHandle {
    /// Wrap a raw reader pointer. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live reader for as long as the handle
    /// is passed to the library.
    pub unsafe fn from_raw(ptr: *mut tiledb_vcf_reader_t) -> Option<Self> {
        NonNull::new(ptr).map(|inner| Self { inner })
    }

    pub fn as_ptr(&self) -> *mut tiledb_vcf_reader_t {
        self.inner.as_ptr()
    }
}

impl WriterHandle {
    /// Wrap a raw writer pointer. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live writer for as long as the handle
    /// is passed to the library.
    pub unsafe fn from_raw(ptr: *mut tiledb_vcf_writer_t) -> Option<Self> {
        NonNull::new(ptr).map(|inner| Self { inner })
    }

    pub fn as_ptr(&self) -> *mut tiledb_vcf_writer_t {
        self.inner.as_ptr()
    }
}

/// Reject a null pointer with a [`VcfError::NullHandle`] carrying `message`.
pub fn check_null<T>(ptr: *mut T, message: &str) -> Result<NonNull<T>, VcfError> {
    NonNull::new(ptr).ok_or_else(|| VcfError::NullHandle(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_null_reader_is_rejected() {
        let handle = unsafe { ReaderHandle::from_raw(ptr::null_mut()) };
        assert!(handle.is_none());
    }

    #[test]
    fn test_non_null_writer_round_trips_pointer() {
        let raw = NonNull::<tiledb_vcf_writer_t>::dangling().as_ptr();
        let handle = unsafe { WriterHandle::from_raw(raw) }.unwrap();
        assert_eq!(handle.as_ptr(), raw);
    }

    #[test]
    fn test_check_null() {
        let err = check_null(ptr::null_mut::<u8>(), "buffer is null").unwrap_err();
        assert_eq!(err, VcfError::NullHandle("buffer is null".to_string()));

        let mut value = 7u8;
        let ok = check_null(&mut value as *mut u8, "unused").unwrap();
        assert_eq!(unsafe { *ok.as_ptr() }, 7);
    }
}
