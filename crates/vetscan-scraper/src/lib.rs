//! Veterinary clinic listing scraper.
//!
//! Drives a headless browser through a map platform's search results and
//! extracts one [`ClinicRecord`](vetscan_core::ClinicRecord) per listing.
//! The pipeline runs strictly forward:
//! [`SessionManager`] → [`Navigator`] → [`ScrollConverger`] →
//! [`ResultAssembler`] (driving [`FieldExtractor`]).

pub mod assemble;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod navigator;
pub mod scroll;
pub mod search;
pub mod session;

pub use assemble::{Assembly, ResultAssembler};
pub use config::{PlatformProfile, ScraperConfig, StealthConfig, Timings};
pub use dom::chrome::ChromeLauncher;
pub use dom::snapshot::{SnapshotDriver, SnapshotLauncher, SnapshotNode};
pub use dom::{DomDriver, DomError, DomNode, Launcher};
pub use error::ScraperError;
pub use extract::{FieldExtractor, NodeDiagnostics};
pub use navigator::{build_search_url, Navigator};
pub use scroll::{ScrollConverger, ScrollOutcome, StopReason};
pub use search::{FeedStatus, SearchReport, VetScraper};
pub use session::SessionManager;
