pub use package_tables::PackageTable;
pub use user_tables::UserTable;

pub mod package_tables;
pub mod user_tables;
