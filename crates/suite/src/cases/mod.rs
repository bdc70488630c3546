//! The conformance cases, in the order they run.
//!
//! Every case starts with the fixture's short per-case directory as the
//! working directory and exercises one operation with short and long
//! arguments from a short and a long working directory.

use crate::{Fixture, SuiteError};

mod entries;
mod iteration;
mod links;
mod metadata;
mod paths;

/// Signature shared by every case.
pub type CaseFn = fn(&Fixture) -> Result<(), SuiteError>;

/// A named conformance case.
#[derive(Clone, Copy, Debug)]
pub struct Case {
    /// Name used for the per-case directories and in reports.
    pub name: &'static str,
    /// Body of the case.
    pub run: CaseFn,
}

impl Case {
    /// Creates a case from its name and body.
    #[must_use]
    pub const fn new(name: &'static str, run: CaseFn) -> Self {
        Self { name, run }
    }
}

/// Every case in canonical order.
pub const ALL: &[Case] = &[
    Case::new("test_current_path", paths::test_current_path),
    Case::new("test_create_directory", entries::test_create_directory),
    Case::new("test_create_hard_link", links::test_create_hard_link),
    Case::new("test_create_symlink", links::test_create_symlink),
    Case::new(
        "test_create_directory_symlink",
        links::test_create_directory_symlink,
    ),
    Case::new("test_remove", entries::test_remove),
    Case::new("test_rename", entries::test_rename),
    Case::new("test_absolute", paths::test_absolute),
    Case::new("test_canonical", paths::test_canonical),
    Case::new("test_weakly_canonical", paths::test_weakly_canonical),
    Case::new("test_copy_file", entries::test_copy_file),
    Case::new("test_is_empty", metadata::test_is_empty),
    Case::new("test_file_size", metadata::test_file_size),
    Case::new("test_resize_file", metadata::test_resize_file),
    Case::new("test_last_write_time", metadata::test_last_write_time),
    Case::new("test_permissions", metadata::test_permissions),
    Case::new("test_status", metadata::test_status),
    Case::new("test_symlink_status", links::test_symlink_status),
    Case::new("test_read_symlink", links::test_read_symlink),
    Case::new("test_hard_link_count", links::test_hard_link_count),
    Case::new("test_equivalent", links::test_equivalent),
    Case::new("test_directory_iterator", iteration::test_directory_iterator),
    Case::new(
        "test_recursive_directory_iterator",
        iteration::test_recursive_directory_iterator,
    ),
];

/// Looks up a case by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Case> {
    ALL.iter().find(|case| case.name == name)
}

/// Iterates over the case names in canonical order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ALL.iter().map(|case| case.name)
}
