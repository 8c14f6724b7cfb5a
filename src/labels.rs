use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, ScoreError};

/// Class names, index-aligned with the classifier output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labels(Vec<String>);

impl Labels {
    /// Read one class name per line, trimming surrounding whitespace.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ScoreError::Labels {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self(text.lines().map(|line| line.trim().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.0
            .get(index)
            .map(String::as_str)
            .ok_or(ScoreError::LabelOutOfRange {
                index,
                count: self.0.len(),
            })
    }

    /// Pair every label with its probability, in label order. Only the
    /// overlapping prefix is kept; a repeated name stays at its first position
    /// and takes the later value.
    pub fn zip_probabilities(&self, probabilities: &[f32]) -> IndexMap<String, f32> {
        self.0
            .iter()
            .zip(probabilities)
            .map(|(name, p)| (name.clone(), *p))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Labels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_trims_lines() {
        let labels = Labels::parse("  cat \r\ndog\n\tbird\n");
        assert_eq!(labels, Labels::from_iter(["cat", "dog", "bird"]));
    }

    #[test]
    fn blank_line_in_the_middle_is_kept() {
        let labels = Labels::parse("a\n\nb\n");
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(1).unwrap(), "");
    }

    #[test]
    fn get_past_the_end_fails() {
        let labels = Labels::from_iter(["a"]);
        assert!(matches!(
            labels.get(3),
            Err(ScoreError::LabelOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn zip_stops_at_shorter_side() {
        let labels = Labels::from_iter(["a", "b", "c"]);
        let map = labels.zip_probabilities(&[0.1, 0.9]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"], 0.9);
    }

    #[test]
    fn duplicate_names_keep_last() {
        let labels = Labels::from_iter(["a", "b", "a"]);
        let map = labels.zip_probabilities(&[0.3, 0.1, 0.6]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 0.6);
        assert_eq!(map.get_index_of("a"), Some(0));
    }

    #[test]
    fn zip_follows_label_order() {
        let labels = Labels::from_iter(["twenty_baht", "five_baht", "ten_baht"]);
        let map = labels.zip_probabilities(&[0.2, 0.5, 0.3]);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["twenty_baht", "five_baht", "ten_baht"]);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "heads").unwrap();
        writeln!(file, "tails").unwrap();
        let labels = Labels::load(file.path()).unwrap();
        assert_eq!(labels, Labels::from_iter(["heads", "tails"]));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Labels::load(&dir.path().join("labels.txt")).unwrap_err();
        assert!(matches!(err, ScoreError::Labels { .. }));
    }
}
