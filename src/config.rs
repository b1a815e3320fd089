// ============================================================================
// Configuration
// ============================================================================
// Le fichier config.toml est embarqué dans le binaire à la compilation
// (include_str!), il ne peut donc pas manquer à l'exécution. Un autre
// fichier peut le remplacer avec --config.
//
// Le chemin stock.cac_40 est relatif :
// - au répertoire courant pour la configuration embarquée, avec repli sur
//   la liste CAC40 embarquée elle aussi
// - au répertoire du fichier pour une configuration --config
//
// CONCEPT RUST : include_str!
// - Lit le fichier au moment de la compilation
// - Produit un &'static str stocké dans le binaire
// ============================================================================

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CatcherError, Result};
use crate::tickers::{get_fr_stock_tickers, parse_tickers};

/// Contenu brut du config.toml livré avec le paquet
pub const PACKAGED_CONFIG: &str = include_str!("../config.toml");

/// Liste CAC40 livrée avec le paquet
pub const PACKAGED_CAC40: &str = include_str!("../data/cac40.txt");

/// Tickers autorisés par défaut si la section [analyzer] est absente
const DEFAULT_ALLOW_TICKERS: [&str; 2] = ["ticker1", "ticker2"];

/// Configuration complète
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    stock: StockSection,

    #[serde(default)]
    analyzer: AnalyzerSection,

    /// Répertoire du fichier de configuration (None si embarquée)
    #[serde(skip)]
    base_dir: Option<PathBuf>,

    /// Vrai pour la configuration embarquée
    #[serde(skip)]
    packaged: bool,
}

/// Section [stock]
#[derive(Debug, Clone, Deserialize)]
struct StockSection {
    /// Chemin du fichier listant les tickers du CAC40
    cac_40: PathBuf,
}

/// Section [analyzer]
#[derive(Debug, Clone, Deserialize)]
struct AnalyzerSection {
    #[serde(default = "default_allow_tickers")]
    allow_tickers: Vec<String>,
}

impl Default for AnalyzerSection {
    fn default() -> Self {
        Self {
            allow_tickers: default_allow_tickers(),
        }
    }
}

fn default_allow_tickers() -> Vec<String> {
    DEFAULT_ALLOW_TICKERS.iter().map(|t| t.to_string()).collect()
}

impl Settings {
    /// Parse la configuration embarquée dans le binaire
    pub fn packaged() -> Result<Self> {
        let mut settings = Self::from_str(PACKAGED_CONFIG)?;
        settings.packaged = true;
        Ok(settings)
    }

    /// Parse une configuration depuis une chaîne TOML
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CatcherError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Charge une configuration depuis un fichier TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration file");
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatcherError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut settings = Self::from_str(&content)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    /// Chemin par défaut du fichier de tickers (clé stock.cac_40)
    pub fn default_cac_file_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) if self.stock.cac_40.is_relative() => dir.join(&self.stock.cac_40),
            _ => self.stock.cac_40.clone(),
        }
    }

    /// Lit la liste de tickers par défaut
    ///
    /// Avec la configuration embarquée, un fichier absent n'est pas une
    /// erreur : on utilise la liste CAC40 embarquée.
    pub fn default_tickers(&self) -> Result<Vec<String>> {
        let path = self.default_cac_file_path();
        match get_fr_stock_tickers(&path) {
            Err(CatcherError::FileNotFound { .. }) if self.packaged => {
                warn!(path = %path.display(), "Default ticker file not found, using packaged CAC40 list");
                Ok(parse_tickers(PACKAGED_CAC40))
            }
            other => other,
        }
    }

    /// Liste des tickers autorisés pour l'analyseur
    pub fn allow_tickers(&self) -> &[String] {
        &self.analyzer.allow_tickers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packaged_config() {
        let settings = Settings::packaged().unwrap();
        assert_eq!(settings.default_cac_file_path(), PathBuf::from("data/cac40.txt"));
        assert_eq!(settings.allow_tickers(), ["ticker1", "ticker2"]);
    }

    #[test]
    fn test_missing_analyzer_section_uses_defaults() {
        let settings = Settings::from_str("[stock]\ncac_40 = \"tickers.txt\"\n").unwrap();
        assert_eq!(settings.default_cac_file_path(), PathBuf::from("tickers.txt"));
        assert_eq!(settings.allow_tickers(), ["ticker1", "ticker2"]);
    }

    #[test]
    fn test_custom_allow_list() {
        let toml = r#"
            [stock]
            cac_40 = "cac.txt"

            [analyzer]
            allow_tickers = ["AI.PA"]
        "#;
        let settings = Settings::from_str(toml).unwrap();
        assert_eq!(settings.allow_tickers(), ["AI.PA"]);
    }

    #[test]
    fn test_missing_cac_40_key_is_config_error() {
        let result = Settings::from_str("[stock]\n");
        assert!(matches!(result, Err(CatcherError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = Settings::from_str("[stock\ncac_40 = ");
        assert!(matches!(result, Err(CatcherError::Config(_))));
    }

    #[test]
    fn test_packaged_default_falls_back_to_embedded_list() {
        let mut settings = Settings::packaged().unwrap();
        settings.stock.cac_40 = PathBuf::from("no/such/dir/cac40.txt");

        let tickers = settings.default_tickers().unwrap();
        assert_eq!(tickers.len(), 40);
        assert!(tickers.iter().any(|t| t == "MC.PA"));
    }

    #[test]
    fn test_config_file_resolves_list_next_to_it() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("list.txt"), "AI.PA\nMC.PA\n").unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(&config_path, "[stock]\ncac_40 = \"list.txt\"\n").unwrap();

        let settings = Settings::from_file(&config_path).unwrap();

        assert_eq!(settings.default_cac_file_path(), dir.path().join("list.txt"));
        assert_eq!(settings.default_tickers().unwrap(), vec!["AI.PA", "MC.PA"]);
    }

    #[test]
    fn test_config_file_missing_list_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(&config_path, "[stock]\ncac_40 = \"absent.txt\"\n").unwrap();

        let settings = Settings::from_file(&config_path).unwrap();

        match settings.default_tickers() {
            Err(CatcherError::FileNotFound { path }) => {
                assert_eq!(path, dir.path().join("absent.txt"))
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_missing_file() {
        let result = Settings::from_file("does/not/exist.toml");
        assert!(matches!(result, Err(CatcherError::Config(_))));
    }
}
