use rand::RngCore;

const CONFIRMATION_TOKEN_BYTES: usize = 20;

/// Random single-use token for email confirmation links, hex encoded.
pub fn generate_confirmation_token() -> String {
    let mut bytes = [0u8; CONFIRMATION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
