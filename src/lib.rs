pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{Environment, StripeConfig};
pub use error::{ApiError, StripeError};
pub use services::stripe::{
    DestinationChargeParams, KycParams, MultiTransferParams, StripeClient, UploadedFile,
};
