pub mod user;

pub use user::UserRepository;
pub use user::MockUserRepository;
