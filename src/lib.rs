//! Engine crate for the WifiWala internet plan marketplace app.
//!
//! The UI shells (mobile/web) render state; everything they drive lives
//! here: the signup/signin OTP flow, plan catalog fetching and
//! filtering/sorting, complaint submission, offers, the speed test and the
//! persisted session. Backends and the phone-auth service are external
//! collaborators reached through the clients in this crate.

pub mod auth;
pub mod complaints;
pub mod config;
pub mod error;
pub mod offers;
pub mod plans;
pub mod speedtest;

pub use auth::flow::{AuthFlow, FlowKind, SignupForm, Step};
pub use auth::otp_input::OtpInput;
pub use auth::provider::{AuthProvider, Confirmation, DemoProvider, PhoneProvider, DEMO_OTP};
pub use auth::session::{signout, FileSessionStore, MemorySessionStore, SessionStore};
pub use auth::user::AuthUser;
pub use config::{AppConfig, AuthConfig, AuthMode, OtpPolicy};
pub use error::{Error, Result};
pub use plans::engine::{FilterDimension, FilterState, SortKey};
pub use plans::model::Plan;
