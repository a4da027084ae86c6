//! Animia SMS Dispatch - SMS notifications for anaemia-programme beneficiaries.
//!
//! This library derives a beneficiary's phone contacts, sends a message to each
//! of them over the best available delivery channel (direct native sending with
//! a pre-filled messaging app as fallback), records SMS history in the Animia
//! backend and summarizes the outcome. An MCP server exposes it to assistants.
//!
//! # Architecture
//!
//! - **domain**: Phone number normalization and validation
//! - **models**: Beneficiaries, contacts, dispatch outcomes and SMS history
//! - **contacts**: Beneficiary record to ordered contact list
//! - **channels**: Native and messaging-app delivery channels
//! - **dispatch**: Channel selection, send loops and post-dispatch observers
//! - **report**: User-facing summaries of send operations
//! - **client**: HTTP client for the Animia backend
//! - **repositories**: Data access over the client
//! - **services**: Business logic behind the MCP tools
//! - **server**: MCP protocol server

pub mod channels;
pub mod client;
pub mod config;
pub mod contacts;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;
pub mod repositories;
pub mod server;
pub mod services;

pub use channels::{AppIntentChannel, DeliveryChannel, NativeChannel, TargetPlatform};
pub use client::SmsApiClient;
pub use config::Config;
pub use contacts::ContactExtractor;
pub use dispatch::{BulkOrchestrator, DispatchObserver, HistoryRecorder, SmartDispatcher};
pub use domain::{is_valid, normalize, NormalizedPhone, PhoneNormalizer, ValidationError};
pub use error::{ChannelError, ConfigError, SmsApiError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Beneficiary, Contact, ContactKind, DispatchOutcome, DispatchSummary};
pub use report::{summarize, ReportDialog};
pub use server::AnimiaSmsServer;
