mod request_outcome;
mod success_ratio;
mod target_url;

pub use request_outcome::RequestOutcome;
pub use success_ratio::SuccessRatio;
pub use target_url::TargetUrl;
