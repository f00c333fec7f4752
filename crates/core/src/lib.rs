//! Core of the offline download bot: turn a magnet link or a resource code
//! into an offline download job on the file-management backend.

pub mod backend;
pub mod config;
mod http;
pub mod magnet;
pub mod pipeline;
pub mod resolver;
pub mod testing;

pub use backend::{
    AuthCache, AuthError, Credential, DownloadJob, RefreshTrigger, Refresher, SubmitError,
    Submitter, TaskSubmitter,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use magnet::{MagnetLink, MAGNET_PREFIX};
pub use pipeline::{
    classify, messages, ChatRef, Classification, Notifier, NotifyError, Pipeline, PipelineOutcome,
};
pub use resolver::{ResolutionError, Resolver, SearchResolver};
