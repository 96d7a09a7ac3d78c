//! ResolveIdentityHandler - turns session credentials into actors.
//!
//! Callers always get a definite actor: a verified user when the
//! credential checks out, anonymous otherwise. On read and send paths an
//! invalid credential silently downgrades to anonymous; only
//! account-scoped mutations fail closed, and they do so at the boundary,
//! not here.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::message::Actor;
use crate::domain::user::User;
use crate::ports::{TokenService, UserRepository};

/// Handler resolving session credentials and per-message attribution.
pub struct ResolveIdentityHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl ResolveIdentityHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Resolve a session credential into a user.
    ///
    /// Absent, malformed, expired, or signature-mismatched credentials,
    /// credentials referencing a user that no longer exists, and store
    /// failures all yield `None` — never an error.
    pub async fn resolve(&self, credential: Option<&str>) -> Option<User> {
        let token = credential?;
        let user_id = self.tokens.validate(token)?;
        match self.users.find_by_id(user_id).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "identity lookup failed, downgrading to anonymous");
                None
            }
        }
    }

    /// Resolve message-level attribution.
    ///
    /// The session user (authenticated at connection establishment) wins.
    /// A client-declared `author_id` in the message payload is not trusted
    /// for attribution: it is re-verified against the user store, and on
    /// any failure the message silently downgrades to anonymous with the
    /// self-declared display fields. This blocks impersonation via a
    /// forged id field.
    pub async fn resolve_message_author(
        &self,
        session_user: Option<&User>,
        claimed_author: Option<UserId>,
        declared_name: Option<String>,
        declared_color: Option<String>,
    ) -> Actor {
        if let Some(user) = session_user {
            return Actor::Authenticated(user.clone());
        }

        if let Some(claimed) = claimed_author {
            match self.users.find_by_id(claimed).await {
                Ok(Some(user)) => return Actor::Authenticated(user),
                Ok(None) => {
                    tracing::debug!(%claimed, "claimed author id unknown, downgrading to anonymous");
                }
                Err(err) => {
                    tracing::warn!(%claimed, error = %err, "claimed author verification failed");
                }
            }
        }

        Actor::anonymous(declared_name, declared_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{HmacTokenService, MockCredentialHasher};
    use crate::adapters::memory::InMemoryStore;
    use crate::ports::CredentialHasher;

    async fn seeded_user(store: &Arc<InMemoryStore>) -> User {
        let hash = MockCredentialHasher::new().hash("pw").await.unwrap();
        let user = User::new("ada", hash, Some("#123456".into())).unwrap();
        UserRepository::insert(store.as_ref(), &user).await.unwrap();
        user
    }

    fn tokens() -> Arc<HmacTokenService> {
        Arc::new(HmacTokenService::new("test-secret", 3600))
    }

    #[tokio::test]
    async fn valid_credential_resolves_the_user() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store).await;
        let tokens = tokens();
        let token = tokens.issue(user.id()).unwrap();

        let resolver = ResolveIdentityHandler::new(store.clone(), tokens);
        let resolved = resolver.resolve(Some(&token)).await;
        assert_eq!(resolved, Some(user));
    }

    #[tokio::test]
    async fn absent_and_malformed_credentials_are_anonymous() {
        let store = Arc::new(InMemoryStore::new());
        let resolver = ResolveIdentityHandler::new(store.clone(), tokens());

        assert_eq!(resolver.resolve(None).await, None);
        assert_eq!(resolver.resolve(Some("not-a-jwt")).await, None);
    }

    #[tokio::test]
    async fn credential_for_vanished_user_is_anonymous() {
        let store = Arc::new(InMemoryStore::new());
        let tokens = tokens();
        let token = tokens.issue(UserId::new()).unwrap();

        let resolver = ResolveIdentityHandler::new(store.clone(), tokens);
        assert_eq!(resolver.resolve(Some(&token)).await, None);
    }

    #[tokio::test]
    async fn claimed_author_id_is_reverified() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store).await;
        let resolver = ResolveIdentityHandler::new(store.clone(), tokens());

        let actor = resolver
            .resolve_message_author(None, Some(user.id()), Some("spoof".into()), None)
            .await;
        assert_eq!(actor.user_id(), Some(user.id()));
        assert_eq!(actor.display_name(), "ada");
    }

    #[tokio::test]
    async fn forged_author_id_downgrades_to_anonymous() {
        let store = Arc::new(InMemoryStore::new());
        let resolver = ResolveIdentityHandler::new(store.clone(), tokens());

        let actor = resolver
            .resolve_message_author(None, Some(UserId::new()), Some("spoof".into()), None)
            .await;
        assert_eq!(actor.user_id(), None);
        assert_eq!(actor.display_name(), "spoof");
    }

    #[tokio::test]
    async fn session_identity_wins_over_claimed_id() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store).await;
        let resolver = ResolveIdentityHandler::new(store.clone(), tokens());

        let actor = resolver
            .resolve_message_author(Some(&user), Some(UserId::new()), None, None)
            .await;
        assert_eq!(actor.user_id(), Some(user.id()));
    }
}
