//! Value objects - validated, immutable building blocks of the aggregates.

pub mod email;
pub mod money;
pub mod names;
pub mod payment;
pub mod role;

pub use email::Email;
pub use money::Money;
pub use names::{GameLabel, PlayerName, Username};
pub use payment::PaymentType;
pub use role::UserRole;
