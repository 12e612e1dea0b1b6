use contracts::enums::kanban_type::KanbanType;
use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub spreadsheet: SpreadsheetConfig,
    /// Service-account identity, supplied through the environment only
    #[serde(skip)]
    pub credentials: Option<ServiceAccountCredentials>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpreadsheetConfig {
    /// Spreadsheet identifier; overridden by SPREADSHEET_ID
    pub id: String,
    pub worksheets: WorksheetNames,
}

/// Worksheet (tab) names inside the backing spreadsheet
#[derive(Debug, Deserialize, Clone)]
pub struct WorksheetNames {
    pub internal_inventory: String,
    pub external_inventory: String,
    pub internal_tracking: String,
    pub external_tracking: String,
    pub usage_log: String,
}

impl WorksheetNames {
    pub fn inventory_for(&self, kanban_type: KanbanType) -> &str {
        match kanban_type {
            KanbanType::Internal => &self.internal_inventory,
            KanbanType::External => &self.external_inventory,
        }
    }

    pub fn tracking_for(&self, kanban_type: KanbanType) -> &str {
        match kanban_type {
            KanbanType::Internal => &self.internal_tracking,
            KanbanType::External => &self.external_tracking,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[spreadsheet]
id = ""

[spreadsheet.worksheets]
internal_inventory = "Kanban Internal"
external_inventory = "Kanban External"
internal_tracking = "Tracking PR Internal"
external_tracking = "Tracking PR External"
usage_log = "Pemakaian"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables override the file afterwards: SPREADSHEET_ID for
/// the spreadsheet identifier; GOOGLE_SERVICE_ACCOUNT_EMAIL,
/// GOOGLE_PRIVATE_KEY, GOOGLE_CLIENT_ID and GOOGLE_PROJECT_ID for the
/// service-account credentials, which never live in the file.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_config_file()?;

    if let Ok(id) = std::env::var("SPREADSHEET_ID") {
        if !id.trim().is_empty() {
            config.spreadsheet.id = id.trim().to_string();
        }
    }
    config.credentials = load_credentials_from_env();
    if config.credentials.is_none() {
        tracing::warn!("Service account credentials not set; sheet access will fail");
    }

    Ok(config)
}

fn load_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn load_credentials_from_env() -> Option<ServiceAccountCredentials> {
    let client_email = std::env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL").ok()?;
    let private_key = std::env::var("GOOGLE_PRIVATE_KEY").ok()?;
    if client_email.trim().is_empty() || private_key.trim().is_empty() {
        return None;
    }
    Some(ServiceAccountCredentials {
        client_email: client_email.trim().to_string(),
        // Deployment environments store the PEM with literal \n sequences
        private_key: private_key.replace("\\n", "\n"),
        client_id: std::env::var("GOOGLE_CLIENT_ID").ok(),
        project_id: std::env::var("GOOGLE_PROJECT_ID").ok(),
    })
}

/// Initialize the process-wide configuration; call once at startup
pub fn init() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// The process-wide configuration; `init` must have run first
pub fn get() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.spreadsheet.worksheets.usage_log, "Pemakaian");
    }

    #[test]
    fn test_worksheet_selection_by_type() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let names = &config.spreadsheet.worksheets;
        assert_eq!(names.inventory_for(KanbanType::Internal), "Kanban Internal");
        assert_eq!(
            names.tracking_for(KanbanType::External),
            "Tracking PR External"
        );
    }
}
