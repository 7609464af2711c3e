//! Database model type aliases.
//!
//! Shorthand for the SeaORM models generated in the `entity` crate.

/// System role such as `PLAYER` or `ADMIN`.
pub type RoleModel = entity::role::Model;

/// Local user record, keyed by the identity provider's subject id.
///
/// # Fields (from `entity::user::Model`)
/// - `id` - Subject id issued by the identity provider
/// - `username` - Nickname reported at first sign-in
/// - `email` / `phone` - Optional contact details
/// - `role_name` - Foreign key to `role.name`
/// - `has_ban` - Whether the account is banned
/// - `jailed_at` - Optional time the account is restricted until
pub type UserModel = entity::user::Model;

/// One allocated game profile slot.
pub type GameProfileModel = entity::game_profile::Model;

/// Per-user game profile capacity (`total`) and consumption (`used`).
pub type GameProfileQuotaModel = entity::game_profile_quota::Model;

/// Immutable audit record of one quota mutation.
pub type GameProfileQuotaLogModel = entity::game_profile_quota_log::Model;
