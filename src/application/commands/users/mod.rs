mod login;
mod password;
mod register;
mod service;
mod update_profile;

pub use login::{LoginResult, LoginUserCommand};
pub use password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
pub use update_profile::UpdateProfileCommand;
