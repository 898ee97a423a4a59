mod session_cipher;

pub use session_cipher::{SessionCipher, SessionCipherError};
