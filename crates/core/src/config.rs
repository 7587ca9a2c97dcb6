use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a certified Royal Enfield mechanic. Answer clearly and step-by-step.";

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub paths: PathsConfig,
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub azure: AzureConfig,
    pub ollama: OllamaConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `MANUALQA_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("MANUALQA_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            paths: PathsConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
            embedding: EmbeddingConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            azure: AzureConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
        }
    }

    /// Reject settings that would make ingestion or retrieval meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunking.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                size: self.chunking.chunk_size,
                overlap: self.chunking.chunk_overlap,
            });
        }
        if self.llm.default_k == 0 {
            return Err(ConfigError::ZeroK);
        }
        Ok(())
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  paths:      pdf_dir={}, index_dir={}",
            self.paths.pdf_dir.display(),
            self.paths.index_dir.display()
        );
        tracing::info!(
            "  chunking:   size={}, overlap={}",
            self.chunking.chunk_size, self.chunking.chunk_overlap
        );
        tracing::info!(
            "  embedding:  provider={}, model={}",
            self.embedding.provider, self.embedding.model
        );
        tracing::info!("  llm:        provider={}, k={}", self.llm.provider, self.llm.default_k);
        tracing::info!(
            "  azure:      base={}, deployment={}, key={}",
            if self.azure.api_base.is_empty() { "(none)" } else { self.azure.api_base.as_str() },
            self.azure.deployment_id,
            if self.azure.api_key.is_empty() { "(none)" } else { "(set)" }
        );
        tracing::info!("  ollama:     url={}", self.ollama.url);
    }
}

// ── Filesystem ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned for `*.pdf` manuals.
    pub pdf_dir: PathBuf,
    /// Directory holding the persisted vector index.
    pub index_dir: PathBuf,
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            pdf_dir: PathBuf::from(profiled_env_or(p, "PDF_DIR", "raw")),
            index_dir: PathBuf::from(profiled_env_or(p, "INDEX_DIR", "index_store")),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks.
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_usize(p, "CHUNK_SIZE", 1000),
            chunk_overlap: profiled_env_usize(p, "CHUNK_OVERLAP", 200),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "fastembed", "ollama", "azure"
    pub provider: String,
    /// Model name for the fastembed backend.
    pub model: String,
    /// Azure deployment serving embeddings (azure backend only).
    pub deployment_id: Option<String>,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "EMBEDDING_PROVIDER", "fastembed"),
            model: profiled_env_or(p, "EMBED_MODEL", "all-MiniLM-L6-v2"),
            deployment_id: profiled_env_opt(p, "EMBEDDING_DEPLOYMENT_ID"),
            batch_size: profiled_env_usize(p, "EMBEDDING_BATCH_SIZE", 64).max(1),
        }
    }
}

// ── LLM ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "azure", "ollama"
    pub provider: String,
    pub system_prompt: String,
    /// Context chunks per question when the caller does not choose.
    pub default_k: usize,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "azure"),
            system_prompt: profiled_env_or(p, "SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            default_k: profiled_env_usize(p, "DEFAULT_K", 4),
        }
    }
}

// ── Azure OpenAI ──────────────────────────────────────────────

/// Credentials are not validated; empty values surface as an
/// authentication failure from the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    pub api_base: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment_id: String,
}

impl AzureConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_base: profiled_env_or(p, "AZURE_OPENAI_API_BASE", ""),
            api_key: profiled_env_or(p, "AZURE_OPENAI_API_KEY", ""),
            api_version: profiled_env_or(p, "AZURE_OPENAI_API_VERSION", "2023-05-15"),
            deployment_id: profiled_env_or(p, "DEPLOYMENT_ID", "gpt-4o"),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
            embedding_model: profiled_env_or(p, "OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests never race
    // on the same variables.

    #[test]
    fn defaults_without_environment() {
        let config = Config::for_profile("MQA_TEST_DEFAULTS");
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.llm.default_k, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("MQA_TEST_PROFILE_CHUNK_SIZE", "512");
        env::set_var("MQA_TEST_PROFILE_DEPLOYMENT_ID", "gpt-4o-mini");
        let config = Config::for_profile("mqa_test_profile");
        assert_eq!(config.profile, "MQA_TEST_PROFILE");
        assert_eq!(config.chunking.chunk_size, 512);
        assert_eq!(config.azure.deployment_id, "gpt-4o-mini");
    }

    #[test]
    fn malformed_number_falls_back_to_default() {
        env::set_var("MQA_TEST_BADNUM_CHUNK_OVERLAP", "lots");
        let config = Config::for_profile("MQA_TEST_BADNUM");
        assert_eq!(config.chunking.chunk_overlap, 200);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk() {
        let mut config = Config::for_profile("MQA_TEST_OVERLAP");
        config.chunking.chunk_size = 100;
        config.chunking.chunk_overlap = 100;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverlapTooLarge { size: 100, overlap: 100 })
        ));
    }

    #[test]
    fn zero_k_is_rejected() {
        let mut config = Config::for_profile("MQA_TEST_ZEROK");
        config.llm.default_k = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroK)));
    }

    #[test]
    fn profile_label_for_default() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");
    }
}
