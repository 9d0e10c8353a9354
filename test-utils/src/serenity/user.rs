//! Test factory for creating Serenity User objects.
//!
//! Creates valid User objects by deserializing JSON, simulating what Discord's
//! API would return.

use serenity::all::User;

/// Creates a test Serenity User with customizable fields.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Unique username
/// - `global_name` - Optional display name shown instead of the username
/// - `avatar_hash` - Optional avatar hash (padded to 32 characters if shorter)
///
/// # Returns
/// - `User` - A valid Serenity User struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::user::create_test_user;
///
/// let user = create_test_user(123456789, "rod", Some("Rod"), Some("abc123"));
/// assert_eq!(user.display_name(), "Rod");
/// assert!(user.avatar_url().is_some());
/// ```
pub fn create_test_user(
    user_id: u64,
    username: &str,
    global_name: Option<&str>,
    avatar_hash: Option<&str>,
) -> User {
    let formatted_avatar = avatar_hash.map(|hash| {
        if hash.len() < 32 {
            format!("{:0<32}", hash)
        } else {
            hash.to_string()
        }
    });

    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": formatted_avatar,
        "bot": false,
        "system": false,
        "public_flags": 0,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
