use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub store: Store,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB
    pub body_limit: u64,
    /// seconds
    pub timeout: u64,
    pub api_prefix: String,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Store {
    Supabase(Supabase),
    Postgres(Database),
}

impl Store {
    pub fn label(&self) -> &'static str {
        match self {
            Store::Supabase(_) => "supabase",
            Store::Postgres(_) => "postgres",
        }
    }
}

#[derive(Clone)]
pub struct Supabase {
    pub url: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Supabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supabase")
            .field("url", &self.url)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
pub struct Database {
    pub url: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Connection strings carry the password.
        f.debug_struct("Database").field("url", &"[REDACTED]").finish()
    }
}
