/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and call `Config::from_env()`
/// once at startup; the loaded struct is immutable afterwards.
///
/// # Panics
///
/// Panics if a required env var is missing or cannot be deserialized —
/// configuration problems are fatal at startup, never per-request errors.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }
}
