//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the binding layer to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only version, availability and status cross it
//! 2. **Simple types**: `str` and `bool` at the boundary, JSON for compound values
//! 3. **No references**: Python gets copies, never library-owned memory

pub mod functions;
