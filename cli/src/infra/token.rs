//! Infrastructure implementation of the `TokenSource` port.

use crate::application::ports::TokenSource;
use crate::domain::secret::{TOKEN_BYTES, hex_encode};

/// Gateway tokens from the thread-local CSPRNG.
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn generate(&self) -> String {
        hex_encode(&rand::random::<[u8; TOKEN_BYTES]>())
    }
}
