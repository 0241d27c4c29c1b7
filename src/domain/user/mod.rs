// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewUser, ProfileUpdate, User, UserAccount, UserProfile};
pub use repository::UserRepository;
pub use specifications::{CanEditProfile, ProfileSpecification};
pub use value_objects::{PasswordHash, PersonName, Timezone, UserId, Username};
