#[derive(Debug, thiserror::Error)]

pub enum AppError {
    #[error("InvalidConnectionString: {0}")]
    InvalidConnectionString(String),
}
