use crate::auth::application::ports::incoming::password_policy::{
    PasswordPolicy, PasswordPolicyError,
};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;
pub const PASSWORD_SYMBOLS: &str = r"!@#$%^&*()_+{}[]:;<>,.?~\/-";

/// 8 to 20 characters with at least one uppercase, lowercase, digit and symbol.
#[derive(Debug, Clone, Default)]
pub struct StrongPasswordPolicy;

impl PasswordPolicy for StrongPasswordPolicy {
    fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let len = password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Err(PasswordPolicyError::Length {
                min: PASSWORD_MIN_LEN,
                max: PASSWORD_MAX_LEN,
            });
        }

        if !password.chars().any(char::is_uppercase) {
            return Err(PasswordPolicyError::MissingUppercase);
        }

        if !password.chars().any(char::is_lowercase) {
            return Err(PasswordPolicyError::MissingLowercase);
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(PasswordPolicyError::MissingSymbol);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(StrongPasswordPolicy.validate("Abcdefg1!").is_ok());
        assert!(StrongPasswordPolicy.validate(r"Path\to/Dir9").is_ok());
    }

    #[test]
    fn rejects_each_missing_class() {
        let policy = StrongPasswordPolicy;
        assert_eq!(
            policy.validate("abcdefg1!"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            policy.validate("ABCDEFG1!"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            policy.validate("Abcdefgh!"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            policy.validate("Abcdefg12"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn rejects_lowercase_digits_only() {
        assert!(StrongPasswordPolicy.validate("abcdefg1").is_err());
    }

    #[test]
    fn enforces_length_bounds() {
        let policy = StrongPasswordPolicy;
        assert!(matches!(
            policy.validate("Ab1!xyz"),
            Err(PasswordPolicyError::Length { .. })
        ));
        assert!(policy.validate("Ab1!xyzw").is_ok());
        assert!(policy.validate("Ab1!xyzwxyzwxyzwxyzw").is_ok());
        assert!(matches!(
            policy.validate("Ab1!xyzwxyzwxyzwxyzwx"),
            Err(PasswordPolicyError::Length { .. })
        ));
    }
}
