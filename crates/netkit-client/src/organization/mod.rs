//! Organization resources (regions, sites)
//!
//! Each collection holds a shared [`Auth`](crate::Auth) reference, fetches
//! its raw records at most once, and hands out typed read-only views over
//! them. Records keep their raw JSON shape; accessors look fields up by
//! name and default absent keys to `None` instead of failing.

pub mod regions;
pub mod sites;
