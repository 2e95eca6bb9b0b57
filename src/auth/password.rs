use crate::error::{AppError, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST).map_err(|_| AppError::Internal)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<()> {
    let matches = verify(password, password_hash).map_err(|_| AppError::Internal)?;
    if matches {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify_password("hunter2", &hashed).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hashed = hash_password("hunter2").unwrap();
        let err = verify_password("hunter3", &hashed).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
