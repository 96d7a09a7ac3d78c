//! Identity resolver handlers: registration, login, credential and
//! message-attribution resolution, identity updates.

mod login_user;
mod register_user;
mod resolve_identity;
mod update_identity;

pub use login_user::{LoginUserCommand, LoginUserHandler};
pub use register_user::{AuthenticatedSession, RegisterUserCommand, RegisterUserHandler};
pub use resolve_identity::ResolveIdentityHandler;
pub use update_identity::{UpdateIdentityCommand, UpdateIdentityHandler};
