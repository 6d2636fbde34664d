mod jwt_auth;

pub use jwt_auth::{JwtAuthMiddleware, UserId};
