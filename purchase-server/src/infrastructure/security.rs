use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand_core::OsRng;

/// Email and plaintext password carried by an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Decodes `Basic base64(email:password)`. The scheme token is optional and
/// not checked. Anything that does not decode to `email:password` is `None`.
pub fn decode_basic_credentials(header: &str) -> Option<Credentials> {
    let header = header.trim();
    let encoded = match header.split_once(' ') {
        Some((_scheme, rest)) => rest.trim(),
        None => header,
    };

    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn decodes_basic_header() {
        let creds = decode_basic_credentials(&basic("ana@example.com:s3cret")).unwrap();
        assert_eq!(creds.email, "ana@example.com");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn scheme_is_optional_and_unchecked() {
        let bare = STANDARD.encode("ana@example.com:s3cret");
        assert!(decode_basic_credentials(&bare).is_some());
        assert!(decode_basic_credentials(&format!("Whatever {bare}")).is_some());
    }

    #[test]
    fn splits_on_first_colon_only() {
        let creds = decode_basic_credentials(&basic("ana@example.com:pa:ss")).unwrap();
        assert_eq!(creds.email, "ana@example.com");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn malformed_headers_resolve_to_none() {
        assert!(decode_basic_credentials("Basic !!!not-base64!!!").is_none());
        assert!(decode_basic_credentials(&basic("no-colon-here")).is_none());
        let not_utf8 = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        assert!(decode_basic_credentials(&not_utf8).is_none());
        assert!(decode_basic_credentials("").is_none());
    }
}
