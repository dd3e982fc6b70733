pub trait PasswordPolicy: Send + Sync {
    fn validate(&self, password: &str) -> Result<(), PasswordPolicyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("Password must be between {min} and {max} characters")]
    Length { min: usize, max: usize },

    #[error("Password is missing an uppercase letter")]
    MissingUppercase,

    #[error("Password is missing a lowercase letter")]
    MissingLowercase,

    #[error("Password is missing a digit")]
    MissingDigit,

    #[error("Password is missing a symbol")]
    MissingSymbol,
}
