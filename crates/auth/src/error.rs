use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username is already taken: {0}")]
    UserExists(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid authentication credentials")]
    Unauthenticated,

    #[error("Invalid registration input: {0}")]
    InvalidInput(String),

    #[error("Failed to sign token: {0}")]
    TokenCreation(String),

    #[error("Internal authentication failure: {0}")]
    Internal(String),
}
