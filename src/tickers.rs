// ============================================================================
// Lecture des fichiers de tickers
// ============================================================================
// Format : texte brut, un ticker par ligne. Les lignes vides sont ignorées.
// ============================================================================

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{CatcherError, Result};

/// Lit la liste des tickers depuis un fichier texte
///
/// Le contenu est découpé sur les espaces et retours à la ligne, l'ordre du
/// fichier est conservé.
///
/// # Erreurs
/// * `CatcherError::FileNotFound` si le chemin n'existe pas
/// * `CatcherError::Io` pour toute autre erreur de lecture
#[instrument(skip(path), fields(path = %path.display()))]
pub fn get_fr_stock_tickers(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CatcherError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CatcherError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let tickers = parse_tickers(&content);

    debug!(count = tickers.len(), "Read stock tickers");
    Ok(tickers)
}

/// Découpe une liste de tickers sur les espaces et retours à la ligne
pub fn parse_tickers(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ticker_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_tickers_in_order() {
        let file = ticker_file("AI.PA\nMC.PA\nOR.PA\n");
        let tickers = get_fr_stock_tickers(file.path()).unwrap();
        assert_eq!(tickers, vec!["AI.PA", "MC.PA", "OR.PA"]);
    }

    #[test]
    fn test_skips_blank_lines_and_padding() {
        let file = ticker_file("\n  AI.PA  \n\n\r\nMC.PA\r\n\n");
        let tickers = get_fr_stock_tickers(file.path()).unwrap();
        assert_eq!(tickers, vec!["AI.PA", "MC.PA"]);
    }

    #[test]
    fn test_empty_file() {
        let file = ticker_file("");
        assert!(get_fr_stock_tickers(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        match get_fr_stock_tickers(&path) {
            Err(CatcherError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_packaged_cac40_list() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/cac40.txt");
        let tickers = get_fr_stock_tickers(&path).unwrap();
        assert_eq!(tickers.len(), 40);
        assert!(tickers.iter().any(|t| t == "MC.PA"));
    }
}
