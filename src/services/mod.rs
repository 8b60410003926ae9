pub mod auth;
pub mod materials;
pub mod modules;
pub mod progress;
pub mod topics;
pub mod users;

pub use auth::AuthService;
pub use materials::MaterialService;
pub use modules::ModuleService;
pub use progress::ProgressService;
pub use topics::TopicService;
pub use users::UserService;
