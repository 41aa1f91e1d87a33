pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TokenSubject;
pub use errors::JwtError;
pub use errors::TokenError;
pub use service::IssuedToken;
pub use service::TokenService;
