pub mod auth;
pub mod health;
pub mod masking;

pub use auth::{hash_password, verify_password, Claims, TokenService};
pub use health::HealthMonitor;
pub use masking::mask_card_number;
