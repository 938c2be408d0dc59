//! Service Configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings for the prediction service.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Path to the serialized shear modulus model
    pub shear_model_path: String,
    /// Path to the serialized damping model
    pub damping_model_path: String,
}

impl Settings {
    /// Load settings from defaults, an optional `soildyn.toml`, and
    /// `SOILDYN_*` environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("shear_model_path", "models/shear_modulus.onnx")?
            .set_default("damping_model_path", "models/damping.onnx")?
            .add_source(File::with_name("soildyn").required(false))
            .add_source(Environment::with_prefix("SOILDYN"))
            .build()?
            .try_deserialize()
    }
}
