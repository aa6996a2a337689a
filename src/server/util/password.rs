//! bcrypt helpers shared by registration, login and admin management.

use crate::server::error::AppError;

/// Work factor for new hashes. Tests use the minimum so suites stay fast.
const HASH_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Returns `Ok(false)` on mismatch; only a malformed stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("Secret1!").unwrap();

        assert!(verify_password("Secret1!", &hash).unwrap());
        assert!(!verify_password("secret1!", &hash).unwrap());
    }
}
