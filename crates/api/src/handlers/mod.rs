pub mod provider_video;
pub mod takeone_webhook;
