//! Campus navigation CLI library.
//!
//! Argument helpers and output rendering shared by the `campusnav` binary.

pub mod output;
pub mod walkway;
