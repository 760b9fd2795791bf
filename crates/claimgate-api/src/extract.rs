//! Actor extraction.
//!
//! The identity provider sits upstream (gateway/session layer) and injects
//! the authenticated actor into each request as headers. The engine treats
//! the id as opaque and performs no authentication of its own.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use claimgate_workflow::{AuthorityLevel, DocumentActor};

use crate::error::ApiError;

/// Header carrying the authenticated actor's id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the actor's vouched authority tier.
pub const ACTOR_AUTHORITY_HEADER: &str = "x-actor-authority";

/// The authenticated actor behind the current request.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// Opaque actor id.
    pub id: Uuid,
    /// Authority tier vouched for by the identity provider; defaults to
    /// standard when the header is absent.
    pub authority_level: AuthorityLevel,
}

impl From<Actor> for DocumentActor {
    fn from(actor: Actor) -> Self {
        Self {
            id: actor.id,
            authority_level: actor.authority_level,
        }
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(ApiError::Unauthorized)?;

        let authority_level = match parts
            .headers
            .get(ACTOR_AUTHORITY_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some(raw) => raw
                .parse::<AuthorityLevel>()
                .map_err(|_| ApiError::Validation(format!("unknown authority level: {raw}")))?,
            None => AuthorityLevel::Standard,
        };

        Ok(Self {
            id,
            authority_level,
        })
    }
}
