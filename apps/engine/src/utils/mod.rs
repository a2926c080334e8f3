pub mod bot_identity;
pub mod join_code;
