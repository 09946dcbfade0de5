use thiserror::Error;

pub type Result<T> = std::result::Result<T, WrapError>;

/// Inputs the engine refuses to process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    #[error("wrap width must be at least 1 (got {width})")]
    InvalidWidth { width: usize },

    #[error("input is {len} bytes, above the {limit}-byte limit")]
    InputTooLarge { len: usize, limit: usize },
}

#[cfg(test)]
mod tests {
    use super::WrapError;

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            WrapError::InvalidWidth { width: 0 }.to_string(),
            "wrap width must be at least 1 (got 0)"
        );
        assert_eq!(
            WrapError::InputTooLarge { len: 10, limit: 4 }.to_string(),
            "input is 10 bytes, above the 4-byte limit"
        );
    }
}
