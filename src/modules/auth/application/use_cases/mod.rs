pub mod create_user;
pub mod login_user;
pub mod verify_user;
