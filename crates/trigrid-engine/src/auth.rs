//! Authentication gate for engine operations.
//!
//! The core does not validate credentials itself — an identity provider
//! (a JWT validator, a user database, a dev stub) resolves the opaque
//! request credential to a player, or to nothing. The engine only ever
//! consumes "authenticated player or none".

use std::future::Future;

use trigrid_model::Player;

use crate::GameError;

/// Resolves an opaque request credential to a player identity.
///
/// A missing, malformed, or unknown credential resolves to `None`; it is
/// deliberately not an error at this layer, so a bad token cannot take an
/// operation down before the gate. [`authenticated`] turns the absence
/// into [`GameError::Unauthenticated`] at the operation boundary.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Returns the player the credential belongs to, if any.
    fn resolve(
        &self,
        credential: &str,
    ) -> impl Future<Output = Option<Player>> + Send;
}

/// Admits only resolved identities.
pub fn authenticated(identity: Option<Player>) -> Result<Player, GameError> {
    identity.ok_or(GameError::Unauthenticated)
}
