//! Local filesystem backend.
//!
//! Scans a folder for git repositories and reads files with `git show`.
//! A folder holding a `.git` directory is a working copy; a folder whose name
//! ends in `.git` is a bare repository and is not descended into.

mod client;

pub use client::LocalClient;
