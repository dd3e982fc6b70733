pub mod strong_password_policy;

pub use strong_password_policy::StrongPasswordPolicy;
