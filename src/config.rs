use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub data_dir: String,

    // Assistant capability; absent key means the assistant degrades to a
    // fixed unavailability message.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,

    pub auto_checkout_hours: i64,

    /// Optional "lat,lon" standing in for a positioning device.
    pub fixed_location: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            data_dir: env::var("EMS_DATA_DIR").unwrap_or_else(|_| ".ems-data".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            auto_checkout_hours: env::var("AUTO_CHECKOUT_HOURS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap(),
            fixed_location: env::var("EMS_FIXED_LOCATION").ok(),
        }
    }
}
