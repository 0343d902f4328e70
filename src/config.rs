use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

// development-only fallbacks, never ship these in production
pub const DEFAULT_USER_PASSWORD: &str = "spicy2023";
pub const DEFAULT_ADMIN_PASSWORD: &str = "adminSpicy2023";

#[derive(Parser, Debug)]
pub struct FlatConfig {
    #[arg(long, env = "USER_PASSWORD", default_value = DEFAULT_USER_PASSWORD, help = "Shared secret for the user tier")]
    user_password: String,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = DEFAULT_ADMIN_PASSWORD, help = "Shared secret for the admin tier")]
    admin_password: String,

    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads", help = "Directory that stores uploaded media")]
    upload_dir: PathBuf,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 104_857_600, help = "Upper bound for a single upload request, in bytes")]
    max_upload_bytes: usize,

    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',', help = "Origins allowed for cross-origin requests; any origin when unset")]
    allowed_origins: Vec<String>,

    #[arg(long, env = "LISTEN_ADDR", default_value = "[::]:3000", help = "Socket address to listen on")]
    listen_addr: SocketAddr,
}

#[derive(Debug)]
pub struct Config {
    pub auth: AuthConfiguration,
    pub storage: StorageConfiguration,
    pub http: HttpConfiguration,
}

#[derive(Debug, Clone)]
pub struct AuthConfiguration {
    pub user_password: String, // USER_PASSWORD
    pub admin_password: String, // ADMIN_PASSWORD
}

impl AuthConfiguration {
    pub fn uses_default_secret(&self) -> bool {
        self.user_password == DEFAULT_USER_PASSWORD || self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfiguration {
    pub upload_dir: PathBuf, // UPLOAD_DIR
}

#[derive(Debug, Clone)]
pub struct HttpConfiguration {
    pub max_upload_bytes: usize, // MAX_UPLOAD_BYTES
    pub allowed_origins: Vec<String>, // ALLOWED_ORIGINS
    pub listen_addr: SocketAddr, // LISTEN_ADDR
}

impl From<FlatConfig> for Config {
    fn from(value: FlatConfig) -> Self {
        Config {
            auth: AuthConfiguration {
                user_password: value.user_password,
                admin_password: value.admin_password,
            },
            storage: StorageConfiguration {
                upload_dir: value.upload_dir,
            },
            http: HttpConfiguration {
                max_upload_bytes: value.max_upload_bytes,
                allowed_origins: value.allowed_origins,
                listen_addr: value.listen_addr,
            },
        }
    }
}
