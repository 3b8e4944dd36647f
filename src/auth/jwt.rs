use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Serialized as the login/registration credential payload, so the field
/// names are the wire names.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

fn create_token(
    user_id: Uuid,
    ttl_secs: i64,
    token_type: TokenType,
    config: &Config,
) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn create_access_token(user_id: Uuid, config: &Config) -> AppResult<String> {
    create_token(user_id, config.jwt_access_ttl_secs, TokenType::Access, config)
}

pub fn create_refresh_token(user_id: Uuid, config: &Config) -> AppResult<String> {
    create_token(
        user_id,
        config.jwt_refresh_ttl_secs,
        TokenType::Refresh,
        config,
    )
}

pub fn create_token_pair(user_id: Uuid, config: &Config) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access: create_access_token(user_id, config)?,
        refresh: create_refresh_token(user_id, config)?,
    })
}

fn decode_claims(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Validates an access credential presented on a protected route.
pub fn verify_access_token(token: &str, config: &Config) -> AppResult<Claims> {
    let claims = decode_claims(token, config).map_err(|_| AppError::Unauthorized)?;
    if claims.token_type != TokenType::Access {
        return Err(AppError::Unauthorized);
    }
    Ok(claims)
}

/// Validates a refresh credential presented to the refresh endpoint.
pub fn verify_refresh_token(token: &str, config: &Config) -> AppResult<Claims> {
    let claims = decode_claims(token, config).map_err(|_| AppError::ExpiredOrInvalidToken)?;
    if claims.token_type != TokenType::Refresh {
        return Err(AppError::ExpiredOrInvalidToken);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn access_token_round_trips_to_the_same_subject() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_is_rejected_on_protected_routes() {
        let config = test_config();
        let token = create_refresh_token(Uuid::new_v4(), &config).unwrap();

        assert!(matches!(
            verify_access_token(&token, &config),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn access_token_cannot_be_used_to_refresh() {
        let config = test_config();
        let token = create_access_token(Uuid::new_v4(), &config).unwrap();

        assert!(matches!(
            verify_refresh_token(&token, &config),
            Err(AppError::ExpiredOrInvalidToken)
        ));
    }

    #[test]
    fn expired_refresh_token_is_rejected() {
        let config = test_config();
        // Well past the decoder's default leeway.
        let token = create_token(Uuid::new_v4(), -300, TokenType::Refresh, &config).unwrap();

        assert!(matches!(
            verify_refresh_token(&token, &config),
            Err(AppError::ExpiredOrInvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "a-different-secret".into();

        let token = create_access_token(Uuid::new_v4(), &other).unwrap();
        assert!(verify_access_token(&token, &config).is_err());
    }

    #[test]
    fn token_pair_contains_both_token_types() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let pair = create_token_pair(user_id, &config).unwrap();

        assert_eq!(verify_access_token(&pair.access, &config).unwrap().sub, user_id);
        assert_eq!(
            verify_refresh_token(&pair.refresh, &config).unwrap().sub,
            user_id
        );
    }

    #[test]
    fn token_pair_serializes_with_wire_field_names() {
        let config = test_config();
        let pair = create_token_pair(Uuid::new_v4(), &config).unwrap();

        let json = serde_json::to_value(&pair).unwrap();
        assert!(json.get("access").is_some());
        assert!(json.get("refresh").is_some());
        assert!(json.get("access_token").is_none());
    }
}
