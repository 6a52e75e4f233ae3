pub mod package;
pub mod user;

pub use package::{NewPackage, Package, PackageScores};
pub use user::{NewUser, Permissions, User};
