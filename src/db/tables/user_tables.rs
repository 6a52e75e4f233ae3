/// Provides constants and utilities for working with
/// the "users" database table.
pub struct UserTable;

impl UserTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "users";

    /// The column name for the auto-assigned primary key of a user.
    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the unique login name.
    pub const COLUMN_USERNAME: &'static str = "username";

    /// The column name for the password hash. Never holds plaintext.
    pub const COLUMN_HASHED_PASSWORD: &'static str = "hashed_password";

    pub const COLUMN_CAN_SEARCH: &'static str = "can_search";
    pub const COLUMN_CAN_DOWNLOAD: &'static str = "can_download";
    pub const COLUMN_CAN_UPLOAD: &'static str = "can_upload";

    /// The column name for the free-form group label.
    pub const COLUMN_USER_GROUP: &'static str = "user_group";

    /// The column name for the issuance time (epoch seconds) of the current token.
    pub const COLUMN_TOKEN_START_TIME: &'static str = "token_start_time";

    /// The column name for the number of API calls made under the current token.
    pub const COLUMN_TOKEN_API_INTERACTIONS: &'static str = "token_api_interactions";

    pub const COLUMN_PASSWORD_SALT: &'static str = "password_salt";

    /// The column name for the hashing cost factor used for `hashed_password`.
    pub const COLUMN_PASSWORD_ROUNDS: &'static str = "password_rounds";

    /// SQL statement for creating the users table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL UNIQUE,
                {} TEXT,
                {} BOOLEAN,
                {} BOOLEAN,
                {} BOOLEAN,
                {} TEXT,
                {} int,
                {} INTEGER,
                {} TEXT,
                {} INTEGER
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_USERNAME,
            Self::COLUMN_HASHED_PASSWORD,
            Self::COLUMN_CAN_SEARCH,
            Self::COLUMN_CAN_DOWNLOAD,
            Self::COLUMN_CAN_UPLOAD,
            Self::COLUMN_USER_GROUP,
            Self::COLUMN_TOKEN_START_TIME,
            Self::COLUMN_TOKEN_API_INTERACTIONS,
            Self::COLUMN_PASSWORD_SALT,
            Self::COLUMN_PASSWORD_ROUNDS
        )
    }

    /// Every column in declaration order.
    pub fn columns() -> [&'static str; 11] {
        [
            Self::COLUMN_ID,
            Self::COLUMN_USERNAME,
            Self::COLUMN_HASHED_PASSWORD,
            Self::COLUMN_CAN_SEARCH,
            Self::COLUMN_CAN_DOWNLOAD,
            Self::COLUMN_CAN_UPLOAD,
            Self::COLUMN_USER_GROUP,
            Self::COLUMN_TOKEN_START_TIME,
            Self::COLUMN_TOKEN_API_INTERACTIONS,
            Self::COLUMN_PASSWORD_SALT,
            Self::COLUMN_PASSWORD_ROUNDS,
        ]
    }
}
