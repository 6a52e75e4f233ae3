/// Provides constants and utilities for working with
/// the "packages" database table.
pub struct PackageTable;

impl PackageTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "packages";

    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the unique package name.
    pub const COLUMN_NAME: &'static str = "name";

    /// The column name for the package source location.
    pub const COLUMN_URL: &'static str = "url";

    pub const COLUMN_VERSION: &'static str = "version";

    // Metric columns, filled by the scoring pipeline.
    pub const COLUMN_LICENSE_SCORE: &'static str = "license_score";
    pub const COLUMN_NETSCORE: &'static str = "netscore";
    pub const COLUMN_DEPENDENCY_PINNING_SCORE: &'static str = "dependency_pinning_score";
    pub const COLUMN_RAMPUP_SCORE: &'static str = "rampup_score";
    pub const COLUMN_REVIEW_PERCENTAGE_SCORE: &'static str = "review_percentage_score";
    pub const COLUMN_BUS_FACTOR: &'static str = "bus_factor";
    pub const COLUMN_CORRECTNESS: &'static str = "correctness";
    pub const COLUMN_RESPONSIVE_MAINTAINER: &'static str = "responsive_maintainer";

    /// SQL statement for creating the packages table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL UNIQUE,
                {} TEXT NOT NULL,
                {} TEXT,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER,
                {} INTEGER
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_URL,
            Self::COLUMN_VERSION,
            Self::COLUMN_LICENSE_SCORE,
            Self::COLUMN_NETSCORE,
            Self::COLUMN_DEPENDENCY_PINNING_SCORE,
            Self::COLUMN_RAMPUP_SCORE,
            Self::COLUMN_REVIEW_PERCENTAGE_SCORE,
            Self::COLUMN_BUS_FACTOR,
            Self::COLUMN_CORRECTNESS,
            Self::COLUMN_RESPONSIVE_MAINTAINER
        )
    }

    /// Every column in declaration order.
    pub fn columns() -> [&'static str; 12] {
        [
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_URL,
            Self::COLUMN_VERSION,
            Self::COLUMN_LICENSE_SCORE,
            Self::COLUMN_NETSCORE,
            Self::COLUMN_DEPENDENCY_PINNING_SCORE,
            Self::COLUMN_RAMPUP_SCORE,
            Self::COLUMN_REVIEW_PERCENTAGE_SCORE,
            Self::COLUMN_BUS_FACTOR,
            Self::COLUMN_CORRECTNESS,
            Self::COLUMN_RESPONSIVE_MAINTAINER,
        ]
    }
}
