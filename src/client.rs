// src/client.rs

// Lado cliente da sessão: o objeto único que o painel injeta para
// autenticar, guardar o token e montar requisições autorizadas ao proxy.

pub mod error;
pub mod session;
pub mod token_store;

pub use error::ClientError;
pub use session::{SessionClient, SessionState, SignUpForm};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
