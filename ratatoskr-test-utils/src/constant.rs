//! Test constants for identity fixtures.
//!
//! None of these values are real credentials.

/// Path of the mock OAuth userinfo endpoint on the mockito server.
pub static TEST_USERINFO_PATH: &str = "/oauth2/userinfo";

/// Bearer token accepted by the default userinfo mock.
pub static TEST_ACCESS_TOKEN: &str = "test_access_token";

/// Subject identifier returned by the default userinfo mock.
pub static TEST_USER_ID: i64 = 1_000_001;

pub static TEST_NICKNAME: &str = "test_player";

pub static TEST_EMAIL: &str = "player@example.com";

/// Roles every user table is seeded with, as `(name, display_name, description)`.
pub static TEST_SYSTEM_ROLES: [(&str, &str, &str); 3] = [
    ("SUPER_ADMIN", "Super administrator", "Full access to every resource"),
    ("ADMIN", "Administrator", "Manages users and game profiles"),
    ("PLAYER", "Player", "Regular player account"),
];
