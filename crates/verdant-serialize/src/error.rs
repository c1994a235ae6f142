#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("failed to write serialized tree: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialized tree is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
