//! Measurement protocol tracker for Rust.
//!
//! Turns typed analytics hits (pageviews, screenviews, events, e-commerce,
//! social, exceptions, timings) into GET requests against a collection
//! endpoint. Each hit is one best-effort request; failures are reported in
//! the returned [`TrackingResult`] instead of panicking the host.
//!
//! ```rust,no_run
//! use ga_tracker::{Options, PageviewTracking, SystemEnvironment, Tracker};
//!
//! let tracker = Tracker::new(
//!     Options::new("UA-XXXXXX-1", "example.com"),
//!     &SystemEnvironment::detect(),
//! );
//! let result = tracker.track(&PageviewTracking::new("/home")).unwrap();
//! if !result.success() {
//!     eprintln!("hit not delivered: {:?}", result.error());
//! }
//! ```

mod client;
mod environment;
mod error;
pub mod parameters;
mod session;
mod transport;
mod types;

pub use client::{build_query, Tracker, TrackerConfig};
pub use environment::{default_user_agent, StaticEnvironment, SystemEnvironment, TrackerEnvironment};
pub use error::{TrackingError, TransportError, TransportErrorKind};
pub use parameters::{
    ContentParameters, EventTracking, ExceptionTracking, GeneralParameters, HitParameters,
    HitType, ItemTracking, PageviewTracking, ScreenviewTracking, SocialTracking, TimingTracking,
    TransactionTracking,
};
pub use session::{hash_client_id, AnalyticsSession, DefaultSession};
pub use transport::{HitRequest, Transport, UreqTransport};
pub use types::{
    Options, Parameters, TrackingResult, BEACON_URL, BEACON_URL_SSL, REFERRAL_URL_KEY,
    TRACKING_ACCOUNT_CONFIGURATION_KEY, TRACKING_DOMAIN_CONFIGURATION_KEY,
};
