//! Tool bridge building blocks: the built-in catalog, call parsing, the
//! permission gate, dispatch and result formatting.

pub mod catalog;
pub mod dispatch;
pub mod formatter;
pub mod parser;
pub mod permission;
pub mod toolkit;
