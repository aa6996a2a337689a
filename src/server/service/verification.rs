//! One-time verification codes for email confirmation and password reset.
//!
//! Codes live only in memory, keyed by normalized email address. Each code is six
//! digits, expires ten minutes after issue and is consumed by the first successful
//! verification. Issuing a new code for the same email replaces the previous one.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Time-to-live for issued codes.
const CODE_TTL: Duration = Duration::from_secs(600);

#[derive(Clone)]
struct IssuedCode {
    code: String,
    expires_at: Instant,
}

impl IssuedCode {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared store of outstanding verification codes.
///
/// Cloning is cheap and every clone sees the same codes, so one instance is created at
/// startup and handed to handlers through `AppState`. Separate instances are used for
/// signup verification and password reset so the two flows never consume each
/// other's codes.
#[derive(Clone, Default)]
pub struct VerificationCodeStore {
    codes: Arc<RwLock<HashMap<String, IssuedCode>>>,
}

impl VerificationCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh code for `email`, replacing any outstanding one.
    ///
    /// # Returns
    /// - `String` - The six-digit code to deliver to the user
    pub async fn issue(&self, email: &str) -> String {
        self.issue_at(email, Instant::now()).await
    }

    /// Issues a code as if the current time were `now`.
    pub async fn issue_at(&self, email: &str, now: Instant) -> String {
        let code = Self::generate_code();
        let issued = IssuedCode {
            code: code.clone(),
            expires_at: now + CODE_TTL,
        };
        self.codes.write().await.insert(normalize(email), issued);
        code
    }

    /// Checks `code` against the outstanding code for `email`.
    ///
    /// A match consumes the code. An expired entry is evicted. A mismatch leaves the
    /// entry in place so the user can retry.
    ///
    /// # Returns
    /// - `true` - Code matched and had not expired
    /// - `false` - No code issued, code expired, or code did not match
    pub async fn verify(&self, email: &str, code: &str) -> bool {
        self.verify_at(email, code, Instant::now()).await
    }

    /// Verifies a code as if the current time were `now`.
    pub async fn verify_at(&self, email: &str, code: &str, now: Instant) -> bool {
        let key = normalize(email);
        let mut codes = self.codes.write().await;

        let Some(issued) = codes.get(&key) else {
            return false;
        };

        if issued.is_expired(now) {
            codes.remove(&key);
            return false;
        }

        if issued.code != code.trim() {
            return false;
        }

        codes.remove(&key);
        true
    }

    /// Checks `code` without consuming it.
    ///
    /// Lets a multi-step flow confirm the code before the final step spends it.
    /// Expired entries are still evicted.
    pub async fn check(&self, email: &str, code: &str) -> bool {
        self.check_at(email, code, Instant::now()).await
    }

    /// Checks a code as if the current time were `now`.
    pub async fn check_at(&self, email: &str, code: &str, now: Instant) -> bool {
        let key = normalize(email);
        let mut codes = self.codes.write().await;

        match codes.get(&key) {
            Some(issued) if issued.is_expired(now) => {
                codes.remove(&key);
                false
            }
            Some(issued) => issued.code == code.trim(),
            None => false,
        }
    }

    fn generate_code() -> String {
        let mut rng = rand::rng();
        format!("{:06}", rng.random_range(0..1_000_000u32))
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, email: &str) -> bool {
        self.codes.read().await.contains_key(&normalize(email))
    }

    #[cfg(test)]
    pub(crate) async fn outstanding(&self, email: &str) -> Option<String> {
        self.codes
            .read()
            .await
            .get(&normalize(email))
            .map(|issued| issued.code.clone())
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "driver@gmail.com";

    /// Tests the generated code format.
    ///
    /// Expected: six ASCII digits
    #[tokio::test]
    async fn issues_six_digit_codes() {
        let store = VerificationCodeStore::new();
        let code = store.issue(EMAIL).await;

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(store.contains(EMAIL).await);
    }

    /// Tests that a code verified within its lifetime is consumed.
    ///
    /// Expected: first verify succeeds, the entry is gone, a replay fails
    #[tokio::test]
    async fn valid_code_is_single_use() {
        let store = VerificationCodeStore::new();
        let issued_at = Instant::now();
        let code = store.issue_at(EMAIL, issued_at).await;

        let later = issued_at + Duration::from_secs(1);
        assert!(store.verify_at(EMAIL, &code, later).await);
        assert!(!store.contains(EMAIL).await);
        assert!(!store.verify_at(EMAIL, &code, later).await);
    }

    /// Tests expiry after the ten minute lifetime.
    ///
    /// Expected: verify at T+601s fails and evicts the entry
    #[tokio::test]
    async fn expired_code_is_rejected() {
        let store = VerificationCodeStore::new();
        let issued_at = Instant::now();
        let code = store.issue_at(EMAIL, issued_at).await;

        let expired = issued_at + Duration::from_secs(601);
        assert!(!store.verify_at(EMAIL, &code, expired).await);
        assert!(!store.contains(EMAIL).await);
    }

    /// Tests that a wrong code does not burn the outstanding one.
    ///
    /// Expected: mismatch fails, the correct code still verifies afterwards
    #[tokio::test]
    async fn mismatch_keeps_entry() {
        let store = VerificationCodeStore::new();
        let code = store.issue(EMAIL).await;
        let wrong = if code == "000000" { "111111" } else { "000000" };

        assert!(!store.verify(EMAIL, wrong).await);
        assert!(store.contains(EMAIL).await);
        assert!(store.verify(EMAIL, &code).await);
    }

    /// Tests that a non-consuming check leaves the code usable.
    ///
    /// Expected: check succeeds twice, then verify consumes the code
    #[tokio::test]
    async fn check_does_not_consume() {
        let store = VerificationCodeStore::new();
        let issued_at = Instant::now();
        let code = store.issue_at(EMAIL, issued_at).await;
        let later = issued_at + Duration::from_secs(30);

        assert!(store.check_at(EMAIL, &code, later).await);
        assert!(store.check_at(EMAIL, &code, later).await);
        assert!(store.verify_at(EMAIL, &code, later).await);
        assert!(!store.check_at(EMAIL, &code, later).await);
    }

    /// Tests that lookups ignore email case and surrounding whitespace.
    ///
    /// Expected: code issued for a mixed-case address verifies for the lowercase one
    #[tokio::test]
    async fn email_keys_are_normalized() {
        let store = VerificationCodeStore::new();
        let code = store.issue("  Driver@Gmail.com ").await;

        assert!(store.verify(EMAIL, &code).await);
    }

    /// Tests that separate stores do not share codes.
    ///
    /// Expected: a code issued in one store is unknown to the other
    #[tokio::test]
    async fn stores_are_independent() {
        let signup = VerificationCodeStore::new();
        let reset = VerificationCodeStore::new();
        let code = signup.issue(EMAIL).await;

        assert!(!reset.verify(EMAIL, &code).await);
        assert!(signup.verify(EMAIL, &code).await);
    }

    /// Tests that clones share state.
    ///
    /// Expected: code issued through one clone verifies through another
    #[tokio::test]
    async fn clones_share_codes() {
        let store = VerificationCodeStore::new();
        let handle = store.clone();
        let code = store.issue(EMAIL).await;

        assert!(handle.verify(EMAIL, &code).await);
        assert!(!store.contains(EMAIL).await);
    }
}
