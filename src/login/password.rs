use crate::config::env_or;
use crate::error::AppError;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use lazy_static::lazy_static;
use ring::rand::{SecureRandom, SystemRandom};

lazy_static! {
    static ref HASHER: Argon2<'static> = {
        let m_cost = env_or("ARGON2_M_COST", "19456");
        let t_cost = env_or("ARGON2_T_COST", "2");
        let p_cost = env_or("ARGON2_P_COST", "1");

        let params = Params::new(m_cost, t_cost, p_cost, None).unwrap_or_else(|err| {
            log::warn!("Invalid argon2 cost parameters ({}), using defaults", err);
            Params::default()
        });

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    };
}

fn salt() -> SaltString {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes).expect("Randomness failed!");

    SaltString::encode_b64(&bytes).expect("Randomness failed!")
}

/// Salted argon2id digest in PHC string form. CPU-bound, call it before
/// opening any database transaction.
pub fn hash(password: &str) -> Result<String, AppError> {
    HASHER
        .hash_password(password.as_bytes(), &salt())
        .map(|digest| digest.to_string())
        .map_err(|err| {
            log::error!("password hashing failed: {}", err);
            AppError::Hashing
        })
}

/// False on mismatch and on malformed digests, never an error.
pub fn verify(password: &str, digest: &str) -> bool {
    PasswordHash::new(digest)
        .ok()
        .as_ref()
        .map(|parsed| HASHER.verify_password(password.as_bytes(), parsed).is_ok())
        .unwrap_or(false)
}
