//! Application configuration. Credentials, template, pacing, endpoints.

use serde::Deserialize;

/// Default delay in ms between consecutive sends (provider rate limiting).
pub const DEFAULT_SEND_DELAY_MS: u64 = 1000;

/// Default Graph API root, version pinned.
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com/v22.0";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Cloud API access token. Read from ZAPBLAST_ACCESS_TOKEN; prompted for when unset.
    #[serde(default)]
    pub access_token: Option<String>,

    /// WhatsApp Business phone number id. Read from ZAPBLAST_PHONE_NUMBER_ID; prompted for when unset.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Recipient sheet path. Read from ZAPBLAST_CSV_PATH; prompted for when unset.
    #[serde(default)]
    pub csv_path: Option<String>,

    /// Country code prefixed to numbers that lack it (default "55"). Read from ZAPBLAST_COUNTRY_CODE.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Delay in ms between consecutive sends (default 1000). Read from ZAPBLAST_SEND_DELAY_MS.
    #[serde(default)]
    pub send_delay_ms: Option<u64>,

    /// Template name registered with the business account (default "welcome_message").
    /// Read from ZAPBLAST_TEMPLATE_NAME.
    #[serde(default)]
    pub template_name: Option<String>,

    /// Language code the template was approved for (default "en_US"). Read from ZAPBLAST_LANGUAGE_CODE.
    #[serde(default)]
    pub language_code: Option<String>,

    /// Pass the recipient name as the template body parameter (default off).
    /// Read from ZAPBLAST_INCLUDE_NAME_PARAM.
    #[serde(default)]
    pub include_name_param: Option<bool>,

    /// Graph API root including version. Read from ZAPBLAST_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds (default 30). Read from ZAPBLAST_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ZAPBLAST"));
        if let Ok(path) = std::env::var("ZAPBLAST_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Numeric/bool envs are parsed directly; the env source hands them over as strings.
        if let Ok(s) = std::env::var("ZAPBLAST_SEND_DELAY_MS") {
            if let Ok(ms) = s.parse::<u64>() {
                cfg.send_delay_ms = Some(ms);
            }
        }
        if let Ok(s) = std::env::var("ZAPBLAST_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = s.parse::<u64>() {
                cfg.request_timeout_secs = Some(secs);
            }
        }
        if let Ok(s) = std::env::var("ZAPBLAST_INCLUDE_NAME_PARAM") {
            if let Ok(flag) = s.parse::<bool>() {
                cfg.include_name_param = Some(flag);
            }
        }
        Ok(cfg)
    }

    /// Returns the country code used by address normalization. Defaults to "55" (Brazil).
    pub fn country_code_or_default(&self) -> String {
        self.country_code.clone().unwrap_or_else(|| "55".to_string())
    }

    /// Returns the inter-send delay in milliseconds. Defaults to 1000 if unset or invalid.
    pub fn send_delay_ms_or_default(&self) -> u64 {
        self.send_delay_ms.unwrap_or(DEFAULT_SEND_DELAY_MS)
    }

    /// Returns the template name. Defaults to "welcome_message".
    pub fn template_name_or_default(&self) -> String {
        self.template_name
            .clone()
            .unwrap_or_else(|| "welcome_message".to_string())
    }

    /// Returns the template language code. Defaults to "en_US".
    pub fn language_code_or_default(&self) -> String {
        self.language_code
            .clone()
            .unwrap_or_else(|| "en_US".to_string())
    }

    /// Returns whether the recipient name is passed as the body parameter. Defaults to false.
    pub fn include_name_param(&self) -> bool {
        self.include_name_param.unwrap_or(false)
    }

    /// Returns the Graph API root. Defaults to the pinned production endpoint.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Returns the per-request timeout in seconds. Defaults to 30.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(30)
    }
}
