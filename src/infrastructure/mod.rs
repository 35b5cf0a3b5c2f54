//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;
pub mod prediction;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use mail::{LogMailer, MailMessage, Mailer};
pub use prediction::{PredictionClient, PredictionReply};
