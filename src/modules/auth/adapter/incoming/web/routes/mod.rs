mod errors;
mod login_user;
mod register_user;
mod user_verification;

pub use login_user::{__path_login_user_handler, login_user_handler, LoginRequestDto, SESSION_COOKIE};
pub use register_user::{__path_register_user_handler, register_user_handler, CreateUserRequest};
pub use user_verification::{__path_verify_user_handler, verify_user_handler, VerifyUserQuery};
