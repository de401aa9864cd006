//! Repository implementations.

pub mod owner;
pub mod token;

pub use owner::OwnerRepository;
pub use token::TokenRepository;
