//! Browser implementations of the session core's I/O seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends API requests with `gloo-net`; `storage` keeps the bearer
//! token in `localStorage`. Both compile to inert stubs without the `csr`
//! feature so pure helpers stay testable natively.

pub mod storage;
pub mod transport;
