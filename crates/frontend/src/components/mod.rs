mod spinner;
mod user_menu;

pub use spinner::LoadingSpinner as Spinner;
pub use user_menu::UserMenu;
