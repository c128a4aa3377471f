pub mod card;
pub mod chips;
pub mod hints;
pub mod money;
pub mod tabs;
pub mod toast;
