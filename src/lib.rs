pub mod biometric_pipeline;
pub mod logger;
