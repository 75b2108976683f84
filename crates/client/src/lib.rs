pub mod config;
pub mod error;
pub mod http;
pub mod hydration;
pub mod memory;
pub mod session;
pub mod sheet;
pub mod submission;
pub mod traits;

pub use config::ClientConfig;
pub use error::{ClientError, Result, SubmissionError};
pub use http::ApiClient;
pub use hydration::{RoundMarksState, TeamMarksState};
pub use memory::InMemoryBackend;
pub use session::{JuryIdentity, Session};
pub use sheet::ScoringSheet;
pub use submission::RoundSubmission;
pub use traits::{MarksStore, RoundAdmin, RoundProvider};
