use std::env;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// JSON file backing the record store. `None` keeps records in memory.
    pub store_path: Option<String>,
    /// JSON file holding the doctor roster. `None` uses the built-in roster.
    pub roster_path: Option<String>,
    /// Reject bookings on non-working days or already occupied slots.
    pub enforce_availability: bool,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store_path: None,
            roster_path: None,
            enforce_availability: false,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env::var("HEALTHBOOK_BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("HEALTHBOOK_BIND_ADDR not set, using default");
                    DEFAULT_BIND_ADDR.to_string()
                }),
            store_path: env::var("HEALTHBOOK_STORE_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .or_else(|| {
                    warn!("HEALTHBOOK_STORE_PATH not set, records will be kept in memory");
                    None
                }),
            roster_path: env::var("HEALTHBOOK_ROSTER_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .or_else(|| {
                    warn!("HEALTHBOOK_ROSTER_PATH not set, using the built-in doctor roster");
                    None
                }),
            enforce_availability: env_flag("HEALTHBOOK_ENFORCE_AVAILABILITY", false),
            seed_demo_data: env_flag("HEALTHBOOK_SEED_DEMO_DATA", true),
        };

        if !config.is_persistent() {
            warn!("Record store is not persistent - appointments are lost on restart");
        }

        config
    }

    pub fn is_persistent(&self) -> bool {
        self.store_path.is_some()
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    parse_flag(name, env::var(name).ok(), default)
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> bool {
    match value {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                warn!("{} has unrecognised value '{}', using default {}", name, other, default);
                default
            }
        },
        None => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}
