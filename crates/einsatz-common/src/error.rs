/// Error types shared by the infrastructure clients.
///
/// These cover the external collaborators (traffic API, text-generation API,
/// mail relay). Application-specific errors live in the binary crate and wrap
/// `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned error: status={status} body={body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("response contained no generated text")]
    EmptyCompletion,

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("mail could not be built: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
