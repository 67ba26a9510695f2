use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: u64,
}

/// Whether a platform token is a well formed JWT that has not expired yet.
pub fn is_valid_token<T: AsRef<str>>(token: T) -> bool {
    is_valid_token_at(token, current_timestamp())
}

pub fn is_valid_token_at<T: AsRef<str>>(token: T, now_timestamp: u64) -> bool {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    let token = token.as_ref();
    if token.split('.').count() != 3 {
        return false;
    }

    let mut validation = Validation::default();
    // The platform keeps the signing secret, only the expiration is checked.
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;

    let decoded = match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(decoded) => decoded,
        Err(err) => {
            debug!("token decoding failed: {}", err);
            return false;
        }
    };

    decoded.claims.exp > now_timestamp
}

fn current_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}
