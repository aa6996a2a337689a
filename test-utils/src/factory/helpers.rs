//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Monotonic counter backing unique test values.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// bcrypt cost used for factory passwords; the minimum keeps tests fast.
pub const TEST_HASH_COST: u32 = 4;

/// Plaintext password every factory account is created with.
pub const DEFAULT_PASSWORD: &str = "Password1!";

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Hashes a plaintext password with the cheap test cost.
///
/// # Panics
/// Panics if bcrypt fails, which only happens for passwords over 72 bytes.
pub fn hash_password(password: &str) -> String {
    bcrypt::hash(password, TEST_HASH_COST).expect("bcrypt hash in test factory")
}

/// Builds a unique license plate in the `AA 999` format from a counter value.
pub fn license_plate_for(id: u64) -> String {
    let first = (b'A' + ((id / 1000) % 26) as u8) as char;
    let second = (b'A' + ((id / 26_000) % 26) as u8) as char;
    format!("{}{} {:03}", first, second, id % 1000)
}

/// Builds a unique 17 character VIN from a counter value.
pub fn vin_for(id: u64) -> String {
    format!("TESTVIN{:010}", id)
}

/// Creates an available vehicle together with a reservation-ready customer.
///
/// # Returns
/// - `Ok((user, vehicle))` - The created customer and vehicle
/// - `Err(DbErr)` - Database error during creation
pub async fn create_customer_and_vehicle(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::vehicle::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let vehicle = crate::factory::vehicle::create_vehicle(db).await?;

    Ok((user, vehicle))
}
