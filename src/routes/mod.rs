pub mod auth;

pub mod modules;

pub mod materials;

pub mod progress;

pub mod users;

pub mod uploads;

pub use auth::configure_auth_routes;
pub use materials::configure_materials_routes;
pub use modules::configure_modules_routes;
pub use progress::configure_progress_routes;
pub use uploads::configure_uploads_routes;
pub use users::configure_user_routes;
