mod premium;
mod tma;

pub use premium::{PremiumMiddlewareFactory, PremiumMiddlewareService};
pub use tma::{TmaAuthMiddlewareFactory, TmaAuthMiddlewareService};
